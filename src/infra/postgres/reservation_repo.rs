use {
    crate::domain::error::BookingError,
    crate::domain::id::PreferenceId,
    crate::domain::money::{Currency, Price},
    crate::domain::reservation::{NewReservation, Reservation, ReservationStatus},
    chrono::{DateTime, Utc},
    sqlx::PgPool,
    uuid::Uuid,
};

const RESERVATION_COLUMNS: &str =
    "id, professional, category, city, price, currency, status, preference_id, created_at";

#[derive(sqlx::FromRow)]
struct ReservationRow {
    id: Uuid,
    professional: String,
    category: String,
    city: String,
    price: i64,
    currency: String,
    status: String,
    preference_id: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ReservationRow> for Reservation {
    type Error = BookingError;

    fn try_from(row: ReservationRow) -> Result<Self, Self::Error> {
        Ok(Reservation {
            id: row.id,
            professional: row.professional,
            category: row.category,
            city: row.city,
            price: Price::new(row.price)?,
            currency: Currency::try_from(row.currency.as_str())?,
            status: ReservationStatus::try_from(row.status.as_str())?,
            preference_id: row.preference_id.map(PreferenceId::new).transpose()?,
            created_at: row.created_at,
        })
    }
}

/// Insert a new pending reservation. Validation already happened in
/// `NewReservation::new`; the id is generated here (v7, time-ordered).
pub async fn create(pool: &PgPool, new: &NewReservation) -> Result<Reservation, BookingError> {
    let row: ReservationRow = sqlx::query_as(&format!(
        r#"
        INSERT INTO reservations (id, professional, category, city, price, currency, status)
        VALUES ($1, $2, $3, $4, $5, $6, 'pending')
        RETURNING {RESERVATION_COLUMNS}
        "#
    ))
    .bind(Uuid::now_v7())
    .bind(new.professional())
    .bind(new.category())
    .bind(new.city())
    .bind(new.price().amount())
    .bind(new.currency().as_str())
    .fetch_one(pool)
    .await?;

    row.try_into()
}

pub async fn get(pool: &PgPool, id: Uuid) -> Result<Option<Reservation>, BookingError> {
    let row: Option<ReservationRow> = sqlx::query_as(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    row.map(Reservation::try_from).transpose()
}

/// Admin-facing listing, newest first.
pub async fn list(pool: &PgPool) -> Result<Vec<Reservation>, BookingError> {
    let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
        "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY created_at DESC, id DESC"
    ))
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Reservation::try_from).collect()
}

/// Attach the provider preference exactly once. A second call finds the
/// column already set and is a no-op. Preference issuance is not
/// guaranteed to run exactly once, so this must not error.
pub async fn attach_preference(
    pool: &PgPool,
    id: Uuid,
    preference: &PreferenceId,
) -> Result<bool, BookingError> {
    let result = sqlx::query(
        "UPDATE reservations SET preference_id = $2 WHERE id = $1 AND preference_id IS NULL",
    )
    .bind(id)
    .bind(preference.as_str())
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Atomic conditional transition: the single serialization point for all
/// concurrent settlement paths. The `status = 'pending'` guard makes
/// duplicate and out-of-order deliveries observable no-ops: exactly one
/// caller per reservation ever sees `true`.
pub async fn transition_if_pending(
    pool: &PgPool,
    id: Uuid,
    target: ReservationStatus,
) -> Result<bool, BookingError> {
    if !target.is_terminal() {
        return Err(BookingError::Validation(format!(
            "transition target must be terminal, got: {target}"
        )));
    }

    let result = sqlx::query("UPDATE reservations SET status = $2 WHERE id = $1 AND status = 'pending'")
        .bind(id)
        .bind(target.as_str())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Pending reservations with a preference attached that have waited longer
/// than `older_than`: the sweeper's work queue, oldest first. Rows without
/// a preference never settle through the gateway and are excluded; they are
/// the manual-recovery signal in the admin listing.
pub async fn list_unsettled(
    pool: &PgPool,
    older_than: chrono::Duration,
    limit: i64,
) -> Result<Vec<Reservation>, BookingError> {
    let cutoff = Utc::now() - older_than;

    let rows: Vec<ReservationRow> = sqlx::query_as(&format!(
        r#"
        SELECT {RESERVATION_COLUMNS} FROM reservations
        WHERE status = 'pending' AND preference_id IS NOT NULL AND created_at < $1
        ORDER BY created_at
        LIMIT $2
        "#
    ))
    .bind(cutoff)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(Reservation::try_from).collect()
}
