mod common;

use common::*;
use reserva_sync::domain::error::BookingError;
use reserva_sync::infra::postgres::admin_repo;
use reserva_sync::services::auth::{issue_token, login, verify_token};

// ── 1. admin_login_flow ────────────────────────────────────────────────────
// One test covers the whole flow: the admins table holds a single account
// and the cases have to observe it in a fixed order.

#[tokio::test]
async fn admin_login_flow() {
    let pool = setup_pool("reserva_sync_test_auth").await;
    let config = auth_config("test-secret");

    // Low cost keeps the test fast; production uses bcrypt's default.
    let hash = bcrypt::hash("hunter2", 4).unwrap();
    let admin_id = admin_repo::insert(&pool, "admin@bookings.test", &hash)
        .await
        .unwrap();

    // Empty password is a validation failure, not an auth failure.
    let empty = login(&pool, &config, "").await;
    assert!(matches!(empty, Err(BookingError::Validation(_))));

    // Wrong password is rejected without detail.
    let wrong = login(&pool, &config, "letmein").await;
    assert!(matches!(wrong, Err(BookingError::Unauthorized(_))));

    // Right password issues a token that verifies back to the admin id.
    let token = login(&pool, &config, "hunter2").await.unwrap();
    let claims = verify_token(&token, &config).unwrap();
    assert_eq!(claims.sub, admin_id.to_string());
}

// ── 2. token_signed_with_another_secret_is_rejected ────────────────────────

#[test]
fn token_signed_with_another_secret_is_rejected() {
    let signer = auth_config("secret-a");
    let verifier = auth_config("secret-b");

    let token = issue_token("admin-1", &signer).unwrap();
    let result = verify_token(&token, &verifier);

    assert!(matches!(result, Err(BookingError::Unauthorized(_))));
}

// ── 3. expired_token_is_rejected ───────────────────────────────────────────

#[test]
fn expired_token_is_rejected() {
    let mut config = auth_config("test-secret");
    config.token_ttl = chrono::Duration::hours(-2);

    let token = issue_token("admin-1", &config).unwrap();
    let result = verify_token(&token, &config);

    assert!(matches!(result, Err(BookingError::Unauthorized(_))));
}
