use {
    crate::{
        AppState,
        domain::notification::PaymentNotification,
        services::reconciler::{ReconcileOutcome, process_notification},
    },
    axum::{Json, extract::State},
};

/// Payment notification endpoint. Always acknowledges with 2xx: the
/// provider redelivers on anything else, and a poisoned payload would
/// otherwise retry forever. Internal failures are logged, never surfaced.
#[tracing::instrument(name = "webhook", skip_all, fields(payment_id = tracing::field::Empty))]
pub async fn receive_notification(
    State(state): State<AppState>,
    body: String,
) -> Json<serde_json::Value> {
    let payload: serde_json::Value = match serde_json::from_str(&body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable notification payload, acknowledging");
            return ack("ignored");
        }
    };

    let notification = PaymentNotification::from_payload(&payload);
    if let Some(id) = notification.payment_id() {
        tracing::Span::current().record("payment_id", tracing::field::display(id));
    }

    let outcome = match process_notification(&state.pool, &*state.gateway, &notification).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "reconciliation failed, acknowledging anyway");
            return ack("error_acknowledged");
        }
    };

    match outcome {
        ReconcileOutcome::MissingPaymentId => {
            tracing::info!("notification without payment id, ignored");
            ack("ignored")
        }
        ReconcileOutcome::FetchFailed => ack("deferred"),
        ReconcileOutcome::Orphan => ack("discarded"),
        ReconcileOutcome::UnknownReservation => {
            tracing::info!("notification for unknown reservation, discarded");
            ack("discarded")
        }
        ReconcileOutcome::NotSettled(status) => {
            tracing::info!(gateway_status = %status, "payment not settled yet");
            ack("not_settled")
        }
        ReconcileOutcome::Applied { id, status } => {
            tracing::info!(reservation_id = %id, status = %status, "transition applied");
            ack("applied")
        }
        ReconcileOutcome::AlreadySettled(id) => {
            tracing::info!(reservation_id = %id, "already settled, duplicate delivery");
            ack("already_settled")
        }
    }
}

fn ack(status: &str) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": status }))
}
