mod common;

use common::*;
use reserva_sync::domain::gateway::GatewayStatus;
use reserva_sync::services::sweeper::sweep_once;

// ── 1. sweeper_settles_an_aged_pending_reservation ─────────────────────────

#[tokio::test]
async fn sweeper_settles_an_aged_pending_reservation() {
    let pool = setup_pool("reserva_sync_test_sweeper").await;

    let id = insert_aged_reservation(&pool, 3_600, Some("pref-lost")).await;
    let reference = id.to_string();
    let gateway = StubGateway::new().with_payment(canonical(
        "551",
        GatewayStatus::Approved,
        Some(&reference),
    ));

    let settled = sweep_once(&pool, &gateway, &sweeper_config(600)).await.unwrap();

    assert_eq!(settled, 1);
    assert_eq!(get_status(&pool, id).await, "paid");
}

// ── 2. sweeper_applies_failed_outcomes_too ─────────────────────────────────

#[tokio::test]
async fn sweeper_applies_failed_outcomes_too() {
    let pool = setup_pool("reserva_sync_test_sweeper").await;

    let id = insert_aged_reservation(&pool, 3_600, Some("pref-rejected")).await;
    let reference = id.to_string();
    let gateway = StubGateway::new().with_payment(canonical(
        "552",
        GatewayStatus::Rejected,
        Some(&reference),
    ));

    sweep_once(&pool, &gateway, &sweeper_config(600)).await.unwrap();

    assert_eq!(get_status(&pool, id).await, "failed");
}

// ── 3. unsettled_payment_stays_pending ─────────────────────────────────────

#[tokio::test]
async fn unsettled_payment_stays_pending() {
    let pool = setup_pool("reserva_sync_test_sweeper").await;

    let id = insert_aged_reservation(&pool, 3_600, Some("pref-waiting")).await;
    let reference = id.to_string();
    let gateway = StubGateway::new().with_payment(canonical(
        "553",
        GatewayStatus::Pending,
        Some(&reference),
    ));

    let settled = sweep_once(&pool, &gateway, &sweeper_config(600)).await.unwrap();

    assert_eq!(settled, 0);
    assert_eq!(get_status(&pool, id).await, "pending");
}

// ── 4. reservation_without_provider_payment_is_left_alone ──────────────────

#[tokio::test]
async fn reservation_without_provider_payment_is_left_alone() {
    let pool = setup_pool("reserva_sync_test_sweeper").await;

    let id = insert_aged_reservation(&pool, 3_600, Some("pref-nopay")).await;
    let gateway = StubGateway::new();

    let settled = sweep_once(&pool, &gateway, &sweeper_config(600)).await.unwrap();

    assert_eq!(settled, 0);
    assert_eq!(get_status(&pool, id).await, "pending");
}

// ── 5. gateway_failure_skips_the_row_without_erroring ──────────────────────

#[tokio::test]
async fn gateway_failure_skips_the_row_without_erroring() {
    let pool = setup_pool("reserva_sync_test_sweeper").await;

    let id = insert_aged_reservation(&pool, 3_600, Some("pref-flaky")).await;
    let gateway = StubGateway::new().failing_fetch();

    let settled = sweep_once(&pool, &gateway, &sweeper_config(600)).await.unwrap();

    assert_eq!(settled, 0, "failed lookups are skipped, not fatal");
    assert_eq!(get_status(&pool, id).await, "pending");
}
