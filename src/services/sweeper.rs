use {
    crate::config::SweeperConfig,
    crate::domain::error::BookingError,
    crate::domain::gateway::PaymentGateway,
    crate::infra::postgres::reservation_repo,
    sqlx::PgPool,
    std::sync::Arc,
    tokio::sync::watch,
};

/// Periodic reconciliation sweep: re-query the gateway for pending
/// reservations whose notifications were lost or deferred, and settle them
/// through the same conditional write the webhook path uses.
pub async fn run_sweeper(
    pool: PgPool,
    gateway: Arc<dyn PaymentGateway>,
    config: SweeperConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    tracing::info!(
        interval_secs = config.interval.as_secs(),
        min_age_secs = config.min_age.num_seconds(),
        "reconciliation sweeper started"
    );

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                tracing::info!("reconciliation sweeper shutting down");
                return;
            }
            _ = tokio::time::sleep(config.interval) => {}
        }

        match sweep_once(&pool, &*gateway, &config).await {
            Ok(0) => {}
            Ok(n) => tracing::info!(count = n, "sweeper settled reservations"),
            Err(e) => tracing::error!(error = %e, "sweep error"),
        }
    }
}

/// One pass over stale pending reservations. Gateway failures for a single
/// reservation are logged and skipped; the row stays pending and the next
/// pass retries it.
pub async fn sweep_once(
    pool: &PgPool,
    gateway: &dyn PaymentGateway,
    config: &SweeperConfig,
) -> Result<u64, BookingError> {
    let stale = reservation_repo::list_unsettled(pool, config.min_age, config.batch).await?;

    let mut settled = 0;
    for reservation in stale {
        let reference = reservation.id.to_string();
        let payment = match gateway.find_payment_by_reference(&reference).await {
            Ok(Some(payment)) => payment,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!(
                    reservation_id = %reservation.id,
                    error = %e,
                    "sweep lookup failed"
                );
                continue;
            }
        };

        let Some(target) = payment.status.settles_to() else {
            continue;
        };

        if reservation_repo::transition_if_pending(pool, reservation.id, target).await? {
            tracing::info!(
                reservation_id = %reservation.id,
                status = %target,
                "sweeper settled reservation"
            );
            settled += 1;
        }
    }

    Ok(settled)
}
