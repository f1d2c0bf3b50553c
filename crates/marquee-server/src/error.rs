//! HTTP error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use marquee_core::error::MarqueeError;
use serde_json::json;
use tracing::error;

/// An error rendered as the `{ "success": false, "message": … }`
/// envelope.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "success": false,
            "message": self.message,
        }));
        (self.status, body).into_response()
    }
}

impl From<MarqueeError> for ApiError {
    fn from(err: MarqueeError) -> Self {
        match err {
            MarqueeError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "User not found"),
            MarqueeError::AlreadyExists { .. } => {
                Self::new(StatusCode::CONFLICT, "User already exists")
            }
            MarqueeError::AuthenticationFailed { reason } => {
                Self::new(StatusCode::UNAUTHORIZED, reason)
            }
            MarqueeError::Validation { message } => Self::new(StatusCode::BAD_REQUEST, message),
            other => {
                // Detail goes to the log; the client gets a generic
                // message.
                error!(error = %other, "Request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_matches_the_error_taxonomy() {
        let cases = [
            (
                MarqueeError::NotFound {
                    entity: "account".to_string(),
                    id: "x".to_string(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                MarqueeError::AlreadyExists {
                    entity: "account".to_string(),
                },
                StatusCode::CONFLICT,
            ),
            (
                MarqueeError::AuthenticationFailed {
                    reason: "Invalid credentials".to_string(),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                MarqueeError::Validation {
                    message: "Missing details".to_string(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                MarqueeError::Database("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                MarqueeError::Mail("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn internal_detail_never_reaches_the_client() {
        let api = ApiError::from(MarqueeError::Database("secret dsn".to_string()));
        assert_eq!(api.message, "Internal server error");
    }
}
