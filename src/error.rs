/*
 * Responsibility
 * - HTTP-facing error of the check endpoint
 * - Every denial becomes the same 401 with a generic body; the reason
 *   is only visible in server logs
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::authz::DenyKind;

/// Body text returned for every denied request.
pub const DENIED_MESSAGE: &str = "Error occurred while authenticating.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("request denied: {0}")]
    Denied(DenyKind),
}

#[derive(Serialize)]
struct ErrorResponseBody {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    code: &'static str,
    message: &'static str,
}

impl From<DenyKind> for AppError {
    fn from(kind: DenyKind) -> Self {
        AppError::Denied(kind)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match self {
            AppError::Denied(DenyKind::Unauthorized | DenyKind::Forbidden) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
            }
        };

        let body = ErrorResponseBody {
            error: ErrorBody {
                code,
                message: DENIED_MESSAGE,
            },
        };

        (status, Json(body)).into_response()
    }
}
