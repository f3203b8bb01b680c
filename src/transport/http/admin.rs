use {
    crate::{
        AppState,
        domain::{error::BookingError, reservation::Reservation},
        infra::postgres::reservation_repo,
        services::auth::{self, AdminClaims},
        transport::http::errors::ApiError,
    },
    axum::{
        Json,
        extract::{FromRequestParts, Path, State},
        http::{header::AUTHORIZATION, request::Parts},
    },
    serde::{Deserialize, Serialize},
    uuid::Uuid,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = auth::login(&state.pool, &state.auth, &request.password).await?;
    Ok(Json(LoginResponse { token }))
}

/// Bearer-token guard for admin routes. Extract it as a handler argument;
/// requests without a valid token never reach the handler body.
pub struct AdminSession(pub AdminClaims);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                BookingError::Unauthorized("missing authorization header".into())
            })?;

        let token = header.strip_prefix("Bearer ").ok_or_else(|| {
            BookingError::Unauthorized("authorization header is not a bearer token".into())
        })?;

        let claims = auth::verify_token(token, &state.auth)?;
        Ok(Self(claims))
    }
}

pub async fn list_reservations(
    State(state): State<AppState>,
    _session: AdminSession,
) -> Result<Json<Vec<Reservation>>, ApiError> {
    let reservations = reservation_repo::list(&state.pool).await?;
    Ok(Json(reservations))
}

/// Unlike the webhook path, an unknown id here is the caller's mistake.
pub async fn get_reservation(
    State(state): State<AppState>,
    _session: AdminSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Reservation>, ApiError> {
    let reservation = reservation_repo::get(&state.pool, id)
        .await?
        .ok_or(BookingError::NotFound(id))?;
    Ok(Json(reservation))
}
