use {crate::domain::error::BookingError, sqlx::PgPool, uuid::Uuid};

#[derive(Debug, sqlx::FromRow)]
pub struct AdminRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

/// Single-admin deployment: the login path checks against the first (and in
/// practice only) admin account.
pub async fn find_first(pool: &PgPool) -> Result<Option<AdminRow>, BookingError> {
    let row = sqlx::query_as::<_, AdminRow>(
        "SELECT id, email, password_hash FROM admins ORDER BY created_at LIMIT 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

pub async fn insert(pool: &PgPool, email: &str, password_hash: &str) -> Result<Uuid, BookingError> {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO admins (id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .await?;

    Ok(id)
}
