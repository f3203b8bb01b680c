use {
    crate::config::CheckoutConfig,
    crate::domain::error::BookingError,
    crate::domain::gateway::{PaymentGateway, PreferenceRequest},
    crate::domain::reservation::NewReservation,
    crate::infra::postgres::reservation_repo,
    sqlx::PgPool,
    uuid::Uuid,
};

#[derive(Debug, Clone)]
pub struct CheckoutLink {
    pub reservation_id: Uuid,
    pub url: String,
}

/// Create a reservation and open a checkout session for it.
///
/// Exactly two observable end states: the reservation carries a preference
/// and the caller gets a checkout URL, or the reservation stays `pending`
/// with no preference and the error propagates. The row is never rolled
/// back on gateway failure: a pending reservation without a checkout is
/// the admin's signal to retry manually.
pub async fn start_checkout(
    pool: &PgPool,
    gateway: &dyn PaymentGateway,
    config: &CheckoutConfig,
    new: NewReservation,
) -> Result<CheckoutLink, BookingError> {
    let reservation = reservation_repo::create(pool, &new).await?;

    let request = PreferenceRequest {
        title: format!("{} - {}", new.category(), new.professional()),
        quantity: 1,
        unit_price: new.price(),
        currency: new.currency().clone(),
        external_reference: reservation.id.to_string(),
        back_urls: config.back_urls.clone(),
        notification_url: config.notification_url.clone(),
    };

    let preference = gateway.create_preference(&request).await?;
    reservation_repo::attach_preference(pool, reservation.id, &preference.id).await?;

    tracing::info!(
        reservation_id = %reservation.id,
        preference_id = %preference.id,
        "checkout issued"
    );

    Ok(CheckoutLink {
        reservation_id: reservation.id,
        url: preference.checkout_url,
    })
}
