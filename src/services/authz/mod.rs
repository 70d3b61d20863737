pub mod claims;
pub mod context;
pub mod credential;
pub mod decision;
pub mod error;
pub mod expiry;
pub mod factory;
pub mod scope;
pub mod signature;
pub mod subscription;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{AuthorizationContext, UNKNOWN};
pub use decision::{AUTHORIZATION_ATTRIBUTE, AuthzService, CheckRequest, Decision, evaluate};
pub use error::{DenyKind, TokenError};
pub use expiry::{Clock, FixedClock, SystemClock};
pub use factory::build_authz_service;
pub use subscription::ApiTarget;
