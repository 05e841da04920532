//! Ledger requests against a record source.

use banjara_shared::types::FamilyId;
use chrono::NaiveDate;
use tracing::debug;

use super::engine::BillingEngine;
use super::error::BillingError;
use super::records::BillingRecords;
use super::reconcile::order_for_reconciliation;
use super::types::{MonthlyLedger, Tenancy};

/// Builds ledgers from a [`BillingRecords`] source.
///
/// Holds no ledger state. Every request re-reads the records, so a payment
/// added between two calls shows up in the second ledger.
pub struct BillingService<R> {
    records: R,
}

impl<R: BillingRecords> BillingService<R> {
    /// Creates a service over the given record source.
    pub const fn new(records: R) -> Self {
        Self { records }
    }

    /// The underlying record source.
    pub const fn records(&self) -> &R {
        &self.records
    }

    /// Mutable access to the record source, for recording payments.
    pub const fn records_mut(&mut self) -> &mut R {
        &mut self.records
    }

    /// Fetches and validates the family's tenancy.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::TenancyNotFound` or `BillingError::Source` from
    /// the record source, and `BillingError::InvalidTenancy` for a malformed
    /// record.
    pub async fn tenancy(&self, family_id: FamilyId) -> Result<Tenancy, BillingError> {
        let record = self.records.tenancy(family_id).await?;
        Tenancy::try_from(&record)
    }

    /// Builds the family's ledger as of the given date.
    ///
    /// Tenancy and payments are fetched concurrently. Reconciliation starts
    /// only after both reads complete, with payments in ascending `paid_on`
    /// order.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::TenancyNotFound` or `BillingError::Source` from
    /// the record source, and any engine error for an invalid tenancy.
    pub async fn monthly_ledger(
        &self,
        family_id: FamilyId,
        as_of: NaiveDate,
    ) -> Result<MonthlyLedger, BillingError> {
        let (record, mut payments) = tokio::try_join!(
            self.records.tenancy(family_id),
            self.records.payments(family_id),
        )?;

        debug!(%family_id, payments = payments.len(), "Fetched billing records");

        order_for_reconciliation(&mut payments);
        BillingEngine::build_monthly_ledger_from_record(&record, &payments, as_of)
    }
}
