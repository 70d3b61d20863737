/// Factory: build `AuthzService` from application `Config`.
use std::sync::Arc;

use crate::config::{Config, PublicKeySource};
use crate::services::authz::{AuthzService, SystemClock};
use crate::services::keys::{FileKeyProvider, KeyError, KeyProvider, StaticKeyProvider};

pub fn build_authz_service(config: &Config) -> Result<Arc<AuthzService>, KeyError> {
    let keys: Arc<dyn KeyProvider> = match &config.public_key {
        PublicKeySource::Inline(pem) => Arc::new(StaticKeyProvider::new(pem.as_bytes())),
        PublicKeySource::File { path, reload: true } => Arc::new(FileKeyProvider::new(path.clone())),
        PublicKeySource::File {
            path,
            reload: false,
        } => Arc::new(StaticKeyProvider::load(path)?),
    };

    Ok(Arc::new(AuthzService::new(
        keys,
        Arc::new(SystemClock),
        config.validate_subscription,
    )))
}
