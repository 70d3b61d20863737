use std::{collections::HashMap, fmt, sync::Arc};

use tracing::{debug, error, warn};

use super::claims::decode_payload;
use super::context::AuthorizationContext;
use super::credential::CompactToken;
use super::error::{DenyKind, TokenError};
use super::expiry::{Clock, is_expired};
use super::scope::scope_granted;
use super::signature::verify_signature;
use super::subscription::{ApiTarget, find_subscription};
use crate::services::keys::KeyProvider;

/// Request attribute holding the credential. The raw value is the token;
/// no `Bearer ` prefix is stripped.
pub const AUTHORIZATION_ATTRIBUTE: &str = "authorization";

/// Outcome of a single authorization check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow(AuthorizationContext),
    Deny(DenyKind),
}

impl Decision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Allow(_))
    }

    pub fn context(&self) -> Option<&AuthorizationContext> {
        match self {
            Self::Allow(ctx) => Some(ctx),
            Self::Deny(_) => None,
        }
    }

    pub fn deny_kind(&self) -> Option<DenyKind> {
        match self {
            Self::Allow(_) => None,
            Self::Deny(kind) => Some(*kind),
        }
    }

    /// Flattens the decision into the `(authorized, context, error)` triple handed
    /// to the proxy adapter. On denial the context is the default one.
    pub fn into_parts(self) -> (bool, AuthorizationContext, Option<DenyKind>) {
        match self {
            Self::Allow(ctx) => (true, ctx, None),
            Self::Deny(kind) => (false, AuthorizationContext::default(), Some(kind)),
        }
    }
}

/// Per-request input of a check.
#[derive(Debug, Clone)]
pub struct CheckRequest<'a> {
    pub attributes: &'a HashMap<String, String>,
    // Where the request is routed; only consulted for subscription checks.
    pub target: ApiTarget,
    pub required_scope: Option<&'a str>,
}

impl<'a> CheckRequest<'a> {
    pub fn new(attributes: &'a HashMap<String, String>, target: ApiTarget) -> Self {
        Self {
            attributes,
            target,
            required_scope: None,
        }
    }

    pub fn with_required_scope(mut self, scope: Option<&'a str>) -> Self {
        self.required_scope = scope;
        self
    }
}

/// Decide on a request given the verification key and the current time.
///
/// Steps run in order and the first failure denies:
/// parse → signature → claims → expiry → scope → subscription → context.
/// Only the coarse [`DenyKind`] is returned; details are logged.
pub fn evaluate(
    validate_subscription: bool,
    public_key_pem: &[u8],
    request: &CheckRequest<'_>,
    now: i64,
) -> Decision {
    match validate(validate_subscription, public_key_pem, request, now) {
        Ok(ctx) => Decision::Allow(ctx),
        Err(err) => {
            let kind = err.deny_kind();
            warn!(error = %err, deny = ?kind, "access token rejected");
            Decision::Deny(kind)
        }
    }
}

fn validate(
    validate_subscription: bool,
    public_key_pem: &[u8],
    request: &CheckRequest<'_>,
    now: i64,
) -> Result<AuthorizationContext, TokenError> {
    let credential = request
        .attributes
        .get(AUTHORIZATION_ATTRIBUTE)
        .ok_or(TokenError::MissingCredential)?;

    let token = CompactToken::parse(credential)?;

    verify_signature(public_key_pem, &token.signed_content(), token.signature)?;

    let claims = decode_payload(token.payload)?;

    if is_expired(&claims, now) {
        return Err(TokenError::Expired {
            exp: claims.exp,
            now,
        });
    }

    if !scope_granted(&claims, request.required_scope) {
        return Err(TokenError::ScopeNotGranted {
            scope: request.required_scope.unwrap_or_default().to_string(),
        });
    }

    if !validate_subscription {
        debug!(sub = %claims.sub, "access token accepted without subscription check");
        return Ok(AuthorizationContext::default());
    }

    let target = &request.target;
    let subscription =
        find_subscription(&claims, target).ok_or_else(|| TokenError::SubscriptionNotFound {
            name: target.name.clone(),
            version: target.version.clone(),
        })?;

    debug!(
        sub = %claims.sub,
        api_name = %subscription.name,
        api_version = %subscription.version,
        "access token accepted"
    );

    Ok(AuthorizationContext::from_claims(&claims, Some(subscription)))
}

/// Authorization decision service.
///
/// Holds the injected key provider and clock; every call is independent.
#[derive(Clone)]
pub struct AuthzService {
    keys: Arc<dyn KeyProvider>,
    clock: Arc<dyn Clock>,
    validate_subscription: bool,
}

impl fmt::Debug for AuthzService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthzService")
            .field("validate_subscription", &self.validate_subscription)
            .finish()
    }
}

impl AuthzService {
    pub fn new(
        keys: Arc<dyn KeyProvider>,
        clock: Arc<dyn Clock>,
        validate_subscription: bool,
    ) -> Self {
        Self {
            keys,
            clock,
            validate_subscription,
        }
    }

    pub fn check(&self, request: &CheckRequest<'_>) -> Decision {
        let public_key = match self.keys.public_key() {
            Ok(pem) => pem,
            Err(err) => {
                let err = TokenError::from(err);
                error!(error = %err, "cannot verify access token");
                return Decision::Deny(err.deny_kind());
            }
        };

        evaluate(
            self.validate_subscription,
            &public_key,
            request,
            self.clock.now_unix(),
        )
    }
}
