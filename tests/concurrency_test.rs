mod common;

use common::*;
use reserva_sync::domain::gateway::GatewayStatus;
use reserva_sync::domain::reservation::ReservationStatus;
use reserva_sync::infra::postgres::reservation_repo;
use reserva_sync::services::reconciler::{ReconcileOutcome, process_notification};
use std::sync::Arc;

// ── 1. concurrent_transitions_settle_exactly_once ──────────────────────────
// 10 tasks race transition_if_pending(paid). Exactly one wins.

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_transitions_settle_exactly_once() {
    let pool = setup_pool("reserva_sync_test_concurrency").await;
    let reservation = create_reservation(&pool).await;

    let mut handles = Vec::new();
    for _ in 0..10 {
        let pool = pool.clone();
        let id = reservation.id;
        handles.push(tokio::spawn(async move {
            reservation_repo::transition_if_pending(&pool, id, ReservationStatus::Paid)
                .await
                .unwrap()
        }));
    }

    let mut applied = 0;
    for handle in handles {
        if handle.await.unwrap() {
            applied += 1;
        }
    }

    assert_eq!(applied, 1, "exactly one transition wins");
    assert_eq!(get_status(&pool, reservation.id).await, "paid");
}

// ── 2. opposing_transitions_have_a_single_winner ───────────────────────────
// paid and failed race each other; whichever wins, the loser observes false
// and the final state matches the winner.

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn opposing_transitions_have_a_single_winner() {
    let pool = setup_pool("reserva_sync_test_concurrency").await;
    let reservation = create_reservation(&pool).await;

    let mut handles = Vec::new();
    for i in 0..10 {
        let pool = pool.clone();
        let id = reservation.id;
        let target = if i % 2 == 0 {
            ReservationStatus::Paid
        } else {
            ReservationStatus::Failed
        };
        handles.push(tokio::spawn(async move {
            let won = reservation_repo::transition_if_pending(&pool, id, target)
                .await
                .unwrap();
            (target, won)
        }));
    }

    let mut winners = Vec::new();
    for handle in handles {
        let (target, won) = handle.await.unwrap();
        if won {
            winners.push(target);
        }
    }

    assert_eq!(winners.len(), 1, "exactly one transition wins");
    assert_eq!(
        get_status(&pool, reservation.id).await,
        winners[0].as_str(),
        "final state matches the winning transition"
    );
}

// ── 3. concurrent_notifications_apply_once ─────────────────────────────────
// 8 deliveries of the same notification race through the full reconciler.
// One Applied, the rest observe AlreadySettled.

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_notifications_apply_once() {
    let pool = setup_pool("reserva_sync_test_concurrency").await;
    let reservation = create_reservation(&pool).await;

    let reference = reservation.id.to_string();
    let gateway = Arc::new(StubGateway::new().with_payment(canonical(
        "901",
        GatewayStatus::Approved,
        Some(&reference),
    )));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        let gateway = gateway.clone();
        let delivery = notification("901");
        handles.push(tokio::spawn(async move {
            process_notification(&pool, &*gateway, &delivery).await.unwrap()
        }));
    }

    let mut applied = 0;
    let mut already_settled = 0;
    for handle in handles {
        match handle.await.unwrap() {
            ReconcileOutcome::Applied { .. } => applied += 1,
            ReconcileOutcome::AlreadySettled(_) => already_settled += 1,
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    assert_eq!(applied, 1, "exactly one delivery applies the transition");
    assert_eq!(already_settled, 7, "the rest observe the terminal state");
    assert_eq!(get_status(&pool, reservation.id).await, "paid");
}
