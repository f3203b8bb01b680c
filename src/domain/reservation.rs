use {
    super::error::BookingError,
    super::id::PreferenceId,
    super::money::{Currency, Price},
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::fmt,
    uuid::Uuid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Paid,
    Failed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    /// Paid and failed are terminal: nothing ever leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Paid | Self::Failed)
    }

    pub fn can_transition_to(&self, next: &ReservationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Paid) | (Self::Pending, Self::Failed)
        )
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for ReservationStatus {
    type Error = BookingError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(BookingError::Validation(format!(
                "unknown reservation status: {other}"
            ))),
        }
    }
}

/// Reservation row as stored. The store is the sole writer of `status`
/// and `preference_id`; everything else is immutable after creation.
#[derive(Debug, Clone, Serialize)]
pub struct Reservation {
    pub id: Uuid,
    pub professional: String,
    pub category: String,
    pub city: String,
    pub price: Price,
    pub currency: Currency,
    pub status: ReservationStatus,
    pub preference_id: Option<PreferenceId>,
    pub created_at: DateTime<Utc>,
}

/// Validated booking input. Construction is the only validation point;
/// nothing reaches the store without passing through here.
#[derive(Debug, Clone)]
pub struct NewReservation {
    professional: String,
    category: String,
    city: String,
    price: Price,
    currency: Currency,
}

impl NewReservation {
    pub fn new(
        professional: impl Into<String>,
        category: impl Into<String>,
        city: impl Into<String>,
        price: i64,
        currency: Currency,
    ) -> Result<Self, BookingError> {
        let professional = non_empty("professional", professional.into())?;
        let category = non_empty("category", category.into())?;
        let city = non_empty("city", city.into())?;
        let price = Price::new(price)?;

        Ok(Self {
            professional,
            category,
            city,
            price,
            currency,
        })
    }

    pub fn professional(&self) -> &str {
        &self.professional
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }
}

fn non_empty(field: &str, value: String) -> Result<String, BookingError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(BookingError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(value)
}
