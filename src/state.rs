/*
 * Responsibility
 * - Shared context attached to the Router (AppState)
 * - Cheap to clone (Arc inside)
 */
use std::sync::Arc;

use crate::config::AttributeNames;
use crate::services::authz::AuthzService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub authz: Arc<AuthzService>,
    pub attributes: Arc<AttributeNames>,
}

impl AppState {
    pub fn new(authz: Arc<AuthzService>, attributes: AttributeNames) -> Self {
        Self {
            authz,
            attributes: Arc::new(attributes),
        }
    }
}
