use {
    crate::config::AuthConfig,
    crate::domain::error::BookingError,
    crate::infra::postgres::admin_repo,
    chrono::Utc,
    jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode},
    serde::{Deserialize, Serialize},
    sqlx::PgPool,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Admin account id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Verify the admin password against the stored bcrypt hash and issue a
/// bearer token. Bad password and missing admin account are both
/// `Unauthorized`; the caller learns nothing about which.
pub async fn login(
    pool: &PgPool,
    config: &AuthConfig,
    password: &str,
) -> Result<String, BookingError> {
    if password.is_empty() {
        return Err(BookingError::Validation("password is required".into()));
    }

    let Some(admin) = admin_repo::find_first(pool).await? else {
        return Err(BookingError::Unauthorized("invalid credentials".into()));
    };

    let valid = match bcrypt::verify(password, &admin.password_hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::error!(error = %e, "stored password hash is unreadable");
            false
        }
    };

    if !valid {
        return Err(BookingError::Unauthorized("invalid credentials".into()));
    }

    issue_token(&admin.id.to_string(), config)
}

pub fn issue_token(subject: &str, config: &AuthConfig) -> Result<String, BookingError> {
    let now = Utc::now();
    let claims = AdminClaims {
        sub: subject.to_string(),
        iat: now.timestamp(),
        exp: (now + config.token_ttl).timestamp(),
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?)
}

pub fn verify_token(token: &str, config: &AuthConfig) -> Result<AdminClaims, BookingError> {
    decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| BookingError::Unauthorized(format!("invalid bearer token: {e}")))
}
