//! Outward-facing error shapes for guarded endpoints.
//!
//! # Purpose
//! Centralizes error response construction so every guarded handler exposes
//! the same two denial states: "authentication required" and "access
//! denied".
//!
//! # Security considerations
//! - Bodies never echo the internal deny reason, the role that was missing,
//!   or whether a resource exists; fine-grained reasons are audit-only.
//! - Infrastructure failures log details server-side and surface a generic
//!   service-unavailable message.
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

/// JSON body returned on any guard failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Structured API error returned by guarded handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// 401: no usable identity on the request.
pub fn api_unauthorized() -> ApiError {
    ApiError {
        status: StatusCode::UNAUTHORIZED,
        body: ErrorResponse {
            code: "unauthorized".to_string(),
            message: "authentication required".to_string(),
        },
    }
}

/// 403: authenticated but not permitted. Used for every deny reason other
/// than missing authentication, with an identical body each time.
pub fn api_forbidden() -> ApiError {
    ApiError {
        status: StatusCode::FORBIDDEN,
        body: ErrorResponse {
            code: "forbidden".to_string(),
            message: "access denied".to_string(),
        },
    }
}

/// 503: a collaborator the decision depends on is unavailable.
pub fn api_unavailable(err: &sprig_authz::AuthzError) -> ApiError {
    tracing::error!(error = %err, "authorization infrastructure failure");
    ApiError {
        status: StatusCode::SERVICE_UNAVAILABLE,
        body: ErrorResponse {
            code: "unavailable".to_string(),
            message: "service unavailable".to_string(),
        },
    }
}
