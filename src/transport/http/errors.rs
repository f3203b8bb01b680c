use crate::domain::error::BookingError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Newtype over the domain error so HTTP mapping lives in the transport
/// layer only.
pub struct ApiError(pub BookingError);

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self.0 {
            BookingError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            BookingError::GatewayUnavailable(msg) => {
                tracing::error!("gateway unavailable: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "gateway_unavailable",
                    "payment gateway unavailable".to_string(),
                )
            }
            BookingError::GatewayRejected(msg) => {
                tracing::error!("gateway rejected: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "gateway_rejected",
                    "payment gateway rejected the request".to_string(),
                )
            }
            BookingError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("reservation {id} not found"),
            ),
            BookingError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            BookingError::Database(err) => {
                tracing::error!("database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            BookingError::Serialization(err) => {
                tracing::error!("serialization error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
            BookingError::Token(err) => {
                tracing::error!("token error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal error".to_string(),
                )
            }
        };

        let body = serde_json::json!({
            "error_code": error_code,
            "message": message,
        });

        (status, Json(body)).into_response()
    }
}
