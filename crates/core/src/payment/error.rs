//! Payment validation errors.

use banjara_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while validating a payment draft.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaymentError {
    /// Paid amount is zero or negative.
    #[error("Paid amount must be positive, got {0}")]
    InvalidPaidAmount(Decimal),

    /// Rent amount is zero or negative.
    #[error("Rent amount must be positive, got {0}")]
    InvalidRentAmount(Decimal),

    /// Payment mode is blank.
    #[error("Payment mode is required")]
    MissingMode,

    /// A meter reading or the rate is negative.
    #[error("Invalid light reading: {0}")]
    InvalidLightReading(String),
}

impl PaymentError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidPaidAmount(_) => "INVALID_PAID_AMOUNT",
            Self::InvalidRentAmount(_) => "INVALID_RENT_AMOUNT",
            Self::MissingMode => "MISSING_PAYMENT_MODE",
            Self::InvalidLightReading(_) => "INVALID_LIGHT_READING",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidPaidAmount(_)
            | Self::InvalidRentAmount(_)
            | Self::MissingMode
            | Self::InvalidLightReading(_) => 400,
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(err: PaymentError) -> Self {
        Self::Validation(err.to_string())
    }
}
