pub mod adapters;
pub mod config;
pub mod domain;
pub mod infra;
pub mod services;
pub mod transport;

use {
    crate::config::{AuthConfig, CheckoutConfig},
    crate::domain::gateway::PaymentGateway,
    std::sync::Arc,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub gateway: Arc<dyn PaymentGateway>,
    pub checkout: Arc<CheckoutConfig>,
    pub auth: Arc<AuthConfig>,
}
