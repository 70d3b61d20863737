/*
 * Responsibility
 * - ext-authz style check: forwarded headers in, ALLOW (200) / DENY (401) out
 * - Target API / version / scope are read from the configured attributes
 * - On ALLOW, the derived context is returned as x-authz-* headers so the
 *   proxy can pass it upstream
 */
use axum::{
    extract::State,
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::api::extractors::RequestAttributes;
use crate::error::AppError;
use crate::services::authz::{ApiTarget, AuthorizationContext, CheckRequest, DenyKind};
use crate::state::AppState;

pub async fn check(
    State(state): State<AppState>,
    attributes: RequestAttributes,
) -> Result<Response, AppError> {
    let authz = state.authz.clone();
    let names = state.attributes.clone();

    // Signature math and (optionally) a key file read: keep them off the async workers.
    let decision = tokio::task::spawn_blocking(move || {
        let target = ApiTarget::new(
            attributes.get_or_empty(&names.api_name),
            attributes.get_or_empty(&names.api_version),
        );
        let request = CheckRequest::new(&attributes.0, target)
            .with_required_scope(attributes.get_non_empty(&names.request_scope));

        authz.check(&request)
    })
    .await
    .map_err(|e| {
        error!(error = %e, "authorization check task failed");
        AppError::Denied(DenyKind::Unauthorized)
    })?;

    let (authorized, ctx, denied) = decision.into_parts();
    if !authorized {
        return Err(denied.unwrap_or(DenyKind::Unauthorized).into());
    }

    Ok(allow(&ctx))
}

fn allow(ctx: &AuthorizationContext) -> Response {
    let mut response = StatusCode::OK.into_response();

    // The default context (no subscription check) carries no identity to forward.
    if !ctx.authorized {
        return response;
    }

    let headers = response.headers_mut();
    for (name, value) in ctx.fields() {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                headers.insert(HeaderName::from_static(name), value);
            }
            Err(_) => warn!(header = name, "context value is not a valid header value"),
        }
    }

    response
}
