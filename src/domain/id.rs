use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::error::BookingError;

/// Payment identifier assigned by the provider. Numeric in practice,
/// treated as opaque here.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(String);

impl PaymentId {
    pub fn new(id: impl Into<String>) -> Result<Self, BookingError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BookingError::Validation(
                "payment id must not be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Checkout preference identifier assigned by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceId(String);

impl PreferenceId {
    pub fn new(id: impl Into<String>) -> Result<Self, BookingError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BookingError::Validation(
                "preference id must not be empty".into(),
            ));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
