use {
    crate::domain::{gateway::BackUrls, money::Currency},
    std::{env, time::Duration},
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: String,
    pub gateway: GatewayConfig,
    pub checkout: CheckoutConfig,
    pub auth: AuthConfig,
    pub sweeper: SweeperConfig,
}

/// Explicit, by-value gateway configuration. The provider client is built
/// from this at construction; there is no process-wide mutable client state.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub access_token: String,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    pub currency: Currency,
    pub back_urls: BackUrls,
    /// Where the provider should deliver payment notifications; derived
    /// from this service's public base URL when one is configured.
    pub notification_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: chrono::Duration,
}

#[derive(Debug, Clone)]
pub struct SweeperConfig {
    pub interval: Duration,
    pub min_age: chrono::Duration,
    pub batch: i64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let listen_addr = optional("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string());

        let gateway = GatewayConfig {
            access_token: required("MP_ACCESS_TOKEN")?,
            base_url: optional("MP_BASE_URL")
                .unwrap_or_else(|| "https://api.mercadopago.com".to_string()),
            timeout: Duration::from_secs(numeric("GATEWAY_TIMEOUT_SECS", 10)?),
        };

        let currency = match optional("CHECKOUT_CURRENCY") {
            Some(raw) => {
                Currency::try_from(raw.as_str()).map_err(|e| ConfigError::Invalid {
                    var: "CHECKOUT_CURRENCY",
                    reason: e.to_string(),
                })?
            }
            None => Currency::Cop,
        };

        let checkout = CheckoutConfig {
            currency,
            back_urls: BackUrls {
                success: required("CHECKOUT_SUCCESS_URL")?,
                failure: required("CHECKOUT_FAILURE_URL")?,
                pending: required("CHECKOUT_PENDING_URL")?,
            },
            notification_url: optional("BASE_URL")
                .map(|base| format!("{}/webhook", base.trim_end_matches('/'))),
        };

        let auth = AuthConfig {
            jwt_secret: required("JWT_SECRET")?,
            token_ttl: chrono::Duration::hours(numeric("JWT_TTL_HOURS", 8)? as i64),
        };

        let sweeper = SweeperConfig {
            interval: Duration::from_secs(numeric("SWEEP_INTERVAL_SECS", 60)?),
            min_age: chrono::Duration::seconds(numeric("SWEEP_MIN_AGE_SECS", 600)? as i64),
            batch: numeric("SWEEP_BATCH", 50)? as i64,
        };

        Ok(Self {
            database_url,
            listen_addr,
            gateway,
            checkout,
            auth,
            sweeper,
        })
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var).map_err(|_| ConfigError::Missing(var))
}

fn optional(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.is_empty())
}

fn numeric(var: &'static str, default: u64) -> Result<u64, ConfigError> {
    match optional(var) {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            var,
            reason: format!("expected an integer, got {raw:?}"),
        }),
    }
}
