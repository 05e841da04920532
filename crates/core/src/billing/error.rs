//! Billing error types.

use banjara_shared::AppError;
use banjara_shared::types::FamilyId;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur while building a monthly ledger.
///
/// A payment whose month falls outside the tenancy is not an error; it is
/// reported through [`crate::billing::UnmatchedTransaction`].
#[derive(Debug, Error)]
pub enum BillingError {
    /// The period ends before it starts.
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidRange {
        /// Start of the period.
        start: NaiveDate,
        /// End of the period.
        end: NaiveDate,
    },

    /// Tenancy record is missing dates or rent, or they cannot be parsed.
    #[error("Invalid tenancy for family {family_id}: {reason}")]
    InvalidTenancy {
        /// Family whose record is invalid.
        family_id: FamilyId,
        /// What is wrong with the record.
        reason: String,
    },

    /// No tenancy record exists for the family.
    #[error("Tenancy not found for family {0}")]
    TenancyNotFound(FamilyId),

    /// The record source failed to deliver tenancy or payment records.
    #[error("Record source error: {0}")]
    Source(String),
}

impl BillingError {
    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange { .. } => "INVALID_RANGE",
            Self::InvalidTenancy { .. } => "INVALID_TENANCY",
            Self::TenancyNotFound(_) => "TENANCY_NOT_FOUND",
            Self::Source(_) => "RECORD_SOURCE_ERROR",
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            Self::InvalidTenancy { .. } => 400,
            Self::TenancyNotFound(_) => 404,
            Self::InvalidRange { .. } => 422,
            Self::Source(_) => 500,
        }
    }
}

impl From<BillingError> for AppError {
    fn from(err: BillingError) -> Self {
        let message = err.to_string();
        match err {
            BillingError::InvalidRange { .. } => Self::BusinessRule(message),
            BillingError::InvalidTenancy { .. } => Self::Validation(message),
            BillingError::TenancyNotFound(_) => Self::NotFound(message),
            BillingError::Source(_) => Self::RecordSource(message),
        }
    }
}
