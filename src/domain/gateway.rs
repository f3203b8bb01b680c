use {
    super::error::BookingError,
    super::id::{PaymentId, PreferenceId},
    super::money::{Currency, Price},
    super::reservation::ReservationStatus,
    serde::{Deserialize, Serialize},
    std::fmt,
    std::{future::Future, pin::Pin},
};

/// Payment status as reported by the provider's API: the canonical record,
/// as opposed to whatever a notification payload claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayStatus {
    Approved,
    Rejected,
    Cancelled,
    Pending,
    Unknown,
}

impl GatewayStatus {
    /// Unrecognized provider values map to `Unknown` rather than erroring:
    /// the provider may grow statuses we have no mapping for, and an
    /// unmapped status simply means "no transition yet".
    pub fn from_provider(s: &str) -> Self {
        match s {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            "cancelled" => Self::Cancelled,
            "pending" => Self::Pending,
            _ => Self::Unknown,
        }
    }

    /// The terminal reservation status this payment outcome settles to,
    /// if it settles at all.
    pub fn settles_to(&self) -> Option<ReservationStatus> {
        match self {
            Self::Approved => Some(ReservationStatus::Paid),
            Self::Rejected | Self::Cancelled => Some(ReservationStatus::Failed),
            Self::Pending | Self::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
            Self::Pending => "pending",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GatewayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Canonical payment record fetched from the provider.
#[derive(Debug, Clone)]
pub struct CanonicalPayment {
    pub id: PaymentId,
    pub status: GatewayStatus,
    pub external_reference: Option<String>,
}

/// Redirect targets the provider sends the payer back to.
#[derive(Debug, Clone)]
pub struct BackUrls {
    pub success: String,
    pub failure: String,
    pub pending: String,
}

/// Everything needed to open a checkout session with the provider.
#[derive(Debug, Clone)]
pub struct PreferenceRequest {
    pub title: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub currency: Currency,
    pub external_reference: String,
    pub back_urls: BackUrls,
    pub notification_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct IssuedPreference {
    pub id: PreferenceId,
    pub checkout_url: String,
}

pub trait PaymentGateway: Send + Sync {
    fn create_preference(
        &self,
        request: &PreferenceRequest,
    ) -> Pin<Box<dyn Future<Output = Result<IssuedPreference, BookingError>> + Send + '_>>;

    /// The only trusted source of payment status. Called on every
    /// notification instead of trusting the payload.
    fn fetch_payment(
        &self,
        id: &PaymentId,
    ) -> Pin<Box<dyn Future<Output = Result<CanonicalPayment, BookingError>> + Send + '_>>;

    /// Provider-side search by our reservation id; used by the sweeper to
    /// revisit reservations whose notifications were lost or deferred.
    fn find_payment_by_reference(
        &self,
        external_reference: &str,
    ) -> Pin<Box<dyn Future<Output = Result<Option<CanonicalPayment>, BookingError>> + Send + '_>>;
}
