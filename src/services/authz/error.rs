use thiserror::Error;

use crate::services::keys::KeyError;

/// Coarse-grained denial reasons.
///
/// This is the only error information that leaves the decision service. The
/// detailed cause stays in [`TokenError`] and is logged server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DenyKind {
    #[error("Invalid access token")]
    Unauthorized,
    #[error("Resource forbidden")]
    Forbidden,
}

// Detailed failure of a single validation step.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("no 'authorization' attribute in request")]
    MissingCredential,

    #[error("invalid JWT token received, token must have 3 parts (got {segments})")]
    MalformedCredential { segments: usize },

    #[error("public key is unavailable: {0}")]
    KeyUnavailable(#[from] KeyError),

    #[error("invalid RSA public key pem: {0}")]
    InvalidKeyMaterial(#[source] jsonwebtoken::errors::Error),

    #[error("signature verification failed")]
    SignatureInvalid(#[source] Option<jsonwebtoken::errors::Error>),

    #[error("payload is not valid base64url: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("payload is not a valid claim set: {0}")]
    ClaimParse(#[from] serde_json::Error),

    #[error("token expired at {exp} (now {now})")]
    Expired { exp: i64, now: i64 },

    #[error("no matching scopes found for '{scope}'")]
    ScopeNotGranted { scope: String },

    #[error("subscription is not valid for API '{name}' '{version}'")]
    SubscriptionNotFound { name: String, version: String },
}

impl TokenError {
    /// Collapse the detailed cause into what may be returned to the caller.
    ///
    /// Only a missing entitlement is distinguishable from the outside; every
    /// credential, key, encoding or temporal failure looks the same.
    pub fn deny_kind(&self) -> DenyKind {
        match self {
            Self::SubscriptionNotFound { .. } => DenyKind::Forbidden,
            _ => DenyKind::Unauthorized,
        }
    }
}
