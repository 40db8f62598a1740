use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Reasons an incoming callback is refused.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("Invalid notification payload: {0}")]
    InvalidPayload(String),
    #[error("Notification secret does not match")]
    SecretMismatch,
    #[error("Notification receiver is shutting down")]
    ReceiverClosed,
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = match self {
            WebhookError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            WebhookError::SecretMismatch => StatusCode::UNAUTHORIZED,
            WebhookError::ReceiverClosed => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
