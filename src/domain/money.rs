use {
    super::error::BookingError,
    serde::{Deserialize, Serialize},
    std::fmt,
};

/// Amount in the currency's smallest unit. Strictly positive; a booking
/// with nothing to charge is not a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(i64);

impl Price {
    pub fn new(amount: i64) -> Result<Self, BookingError> {
        if amount <= 0 {
            return Err(BookingError::Validation(format!(
                "price must be positive, got: {amount}"
            )));
        }
        Ok(Self(amount))
    }

    pub fn amount(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Currencies the provider settles in. COP has no fractional minor unit,
/// so `Price` carries whole pesos there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    Cop,
    Ars,
    Clp,
    Mxn,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cop => "cop",
            Self::Ars => "ars",
            Self::Clp => "clp",
            Self::Mxn => "mxn",
        }
    }

    /// Uppercase code the provider API expects as `currency_id`.
    pub fn provider_code(&self) -> &'static str {
        match self {
            Self::Cop => "COP",
            Self::Ars => "ARS",
            Self::Clp => "CLP",
            Self::Mxn => "MXN",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Currency {
    type Error = BookingError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s {
            "cop" => Ok(Self::Cop),
            "ars" => Ok(Self::Ars),
            "clp" => Ok(Self::Clp),
            "mxn" => Ok(Self::Mxn),
            other => Err(BookingError::Validation(format!(
                "unknown currency: {other}"
            ))),
        }
    }
}
