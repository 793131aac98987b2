use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::normalize::UpstreamFailure;

/// Errors a route handler can surface to a caller. Every failure path in
/// the gateway resolves to one of these; callers always receive a
/// structured JSON body with a `detail` message, never a raw upstream
/// payload or a transport error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed client input.
    #[error("{0}")]
    Validation(String),

    /// Signup collision with an existing account.
    #[error("{0}")]
    Conflict(String),

    /// The backend responded but signaled failure, or the transport failed.
    #[error("{message}")]
    Upstream { status_code: u16, message: String },

    /// Anything else.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream { status_code, .. } => {
                StatusCode::from_u16(*status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<UpstreamFailure> for ApiError {
    fn from(failure: UpstreamFailure) -> Self {
        ApiError::Upstream {
            status_code: failure.status_code,
            message: failure.message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_is_forwarded() {
        let err = ApiError::from(UpstreamFailure {
            status_code: 503,
            message: "index unavailable".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn invalid_upstream_status_falls_back_to_500() {
        let err = ApiError::Upstream {
            status_code: 42,
            message: "weird".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn conflict_maps_to_409() {
        assert_eq!(
            ApiError::Conflict("exists".to_string()).status_code(),
            StatusCode::CONFLICT
        );
    }
}
