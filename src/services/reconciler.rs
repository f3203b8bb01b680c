use {
    crate::domain::error::BookingError,
    crate::domain::gateway::{GatewayStatus, PaymentGateway},
    crate::domain::notification::PaymentNotification,
    crate::domain::reservation::ReservationStatus,
    crate::infra::postgres::reservation_repo,
    sqlx::PgPool,
    uuid::Uuid,
};

/// What happened to one notification. Every variant is acknowledged to the
/// transport; "already paid" is a value here, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Payload carried no payment id; nothing to reconcile.
    MissingPaymentId,
    /// Canonical lookup failed; acknowledged anyway so the provider stops
    /// redelivering. The sweeper revisits the reservation later.
    FetchFailed,
    /// The canonical payment carries no external reference.
    Orphan,
    /// The reference does not resolve to a reservation we hold.
    UnknownReservation,
    /// Canonical status has not settled; wait for a later notification.
    NotSettled(GatewayStatus),
    /// Terminal status applied. The one write that wins.
    Applied {
        id: Uuid,
        status: ReservationStatus,
    },
    /// Reservation was already terminal: a duplicate or out-of-order
    /// delivery observed as a no-op.
    AlreadySettled(Uuid),
}

/// Reconcile one inbound notification against the canonical payment record.
///
/// The payload is never trusted: the payment is re-fetched from the gateway
/// and only its `external_reference` and status drive the transition. The
/// conditional write in the store guarantees at most one transition per
/// reservation under concurrent, duplicated, or reordered delivery.
pub async fn process_notification(
    pool: &PgPool,
    gateway: &dyn PaymentGateway,
    notification: &PaymentNotification,
) -> Result<ReconcileOutcome, BookingError> {
    let Some(payment_id) = notification.payment_id() else {
        return Ok(ReconcileOutcome::MissingPaymentId);
    };

    let payment = match gateway.fetch_payment(payment_id).await {
        Ok(payment) => payment,
        Err(e) => {
            tracing::warn!(
                payment_id = %payment_id,
                error = %e,
                "canonical payment lookup failed, acknowledging"
            );
            return Ok(ReconcileOutcome::FetchFailed);
        }
    };

    let Some(reference) = payment.external_reference.as_deref() else {
        tracing::warn!(payment_id = %payment_id, "payment has no external reference");
        return Ok(ReconcileOutcome::Orphan);
    };

    let Ok(reservation_id) = Uuid::parse_str(reference) else {
        tracing::warn!(reference, "external reference is not a reservation id");
        return Ok(ReconcileOutcome::UnknownReservation);
    };

    let Some(reservation) = reservation_repo::get(pool, reservation_id).await? else {
        return Ok(ReconcileOutcome::UnknownReservation);
    };

    let Some(target) = payment.status.settles_to() else {
        return Ok(ReconcileOutcome::NotSettled(payment.status));
    };

    if reservation_repo::transition_if_pending(pool, reservation.id, target).await? {
        tracing::info!(
            reservation_id = %reservation.id,
            status = %target,
            "reservation settled"
        );
        Ok(ReconcileOutcome::Applied {
            id: reservation.id,
            status: target,
        })
    } else {
        Ok(ReconcileOutcome::AlreadySettled(reservation.id))
    }
}
