pub mod admin;
pub mod checkout;
pub mod errors;
pub mod webhook;

use {
    crate::AppState,
    axum::{
        Json, Router,
        extract::DefaultBodyLimit,
        routing::{get, post},
    },
    std::time::Duration,
    tower_http::{cors::CorsLayer, timeout::TimeoutLayer},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/checkout", post(checkout::create_checkout))
        .route("/webhook", post(webhook::receive_notification))
        .route("/admin/login", post(admin::login))
        .route("/admin/reservations", get(admin::list_reservations))
        .route("/admin/reservations/{id}", get(admin::get_reservation))
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(DefaultBodyLimit::max(64 * 1024)) // notification payloads are small
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "ok": true }))
}
