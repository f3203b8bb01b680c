use {
    crate::{
        AppState,
        domain::{error::BookingError, reservation::NewReservation},
        services::checkout::start_checkout,
        transport::http::errors::ApiError,
    },
    axum::{
        Json,
        extract::{State, rejection::JsonRejection},
        http::StatusCode,
    },
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

/// Booking request. Field aliases accept the Spanish names the original
/// clients send.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    #[serde(alias = "profesional")]
    pub professional: String,
    #[serde(alias = "categoria")]
    pub category: String,
    #[serde(alias = "ciudad")]
    pub city: String,
    #[serde(alias = "precio")]
    pub price: i64,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub reservation_id: Uuid,
    pub checkout_url: String,
}

pub async fn create_checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CheckoutResponse>), ApiError> {
    // Malformed bodies (wrong types included) are validation failures, not
    // the default 422 the Json extractor would produce.
    let Json(request) = payload.map_err(|e| BookingError::Validation(e.body_text()))?;

    let new = NewReservation::new(
        request.professional,
        request.category,
        request.city,
        request.price,
        state.checkout.currency.clone(),
    )?;

    let link = start_checkout(&state.pool, &*state.gateway, &state.checkout, new).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            reservation_id: link.reservation_id,
            checkout_url: link.url,
        }),
    ))
}
