use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("validation: {0}")]
    Validation(String),

    #[error("gateway unavailable: {0}")]
    GatewayUnavailable(String),

    #[error("gateway rejected request: {0}")]
    GatewayRejected(String),

    #[error("reservation {0} not found")]
    NotFound(uuid::Uuid),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("database: {0}")]
    Database(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("token handling: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}
