//! Billing engine: builds a family's monthly ledger.

use chrono::{NaiveDate, Utc};
use tracing::debug;

use super::error::BillingError;
use super::ledger::init_ledger;
use super::month::generate_months;
use super::reconcile::{is_reconciliation_ordered, reconcile};
use super::status::classify;
use super::types::{MonthlyLedger, PaymentTransaction, Tenancy, TenancyRecord};

/// Engine composing month generation, initialization, reconciliation and
/// classification.
///
/// Stateless: every call allocates a fresh ledger and never mutates its
/// inputs, so it can run concurrently for different tenancies.
pub struct BillingEngine;

impl BillingEngine {
    /// Builds the monthly ledger for a tenancy, most recent month first.
    ///
    /// Months run from the check-in month to the check-out month, or to the
    /// `as_of` month while the tenancy is ongoing. Transactions are applied in
    /// the order given.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidRange` if the effective end is before
    /// the check-in date.
    pub fn build_monthly_ledger(
        tenancy: &Tenancy,
        transactions: &[PaymentTransaction],
        as_of: NaiveDate,
    ) -> Result<MonthlyLedger, BillingError> {
        let end = tenancy.effective_end(as_of);
        let months = generate_months(tenancy.check_in_date, end)?;

        if !is_reconciliation_ordered(transactions) {
            debug!(
                family_id = %tenancy.family_id,
                "Payments are not in ascending paid-on order, applying as given"
            );
        }

        let mut ledger = init_ledger(&months, tenancy.rent);
        let unmatched = reconcile(&mut ledger, transactions);

        let entries = ledger
            .into_values()
            .rev()
            .map(|mut entry| {
                entry.status = classify(&entry, as_of);
                entry
            })
            .collect::<Vec<_>>();

        debug!(
            family_id = %tenancy.family_id,
            months = entries.len(),
            payments = transactions.len(),
            %as_of,
            "Built monthly ledger"
        );

        Ok(MonthlyLedger { entries, unmatched })
    }

    /// Validates a raw tenancy record, then builds its ledger.
    ///
    /// # Errors
    ///
    /// Returns `BillingError::InvalidTenancy` if the record's dates or rent
    /// are missing or malformed, and `BillingError::InvalidRange` as
    /// [`Self::build_monthly_ledger`] does.
    pub fn build_monthly_ledger_from_record(
        record: &TenancyRecord,
        transactions: &[PaymentTransaction],
        as_of: NaiveDate,
    ) -> Result<MonthlyLedger, BillingError> {
        let tenancy = Tenancy::try_from(record)?;
        Self::build_monthly_ledger(&tenancy, transactions, as_of)
    }

    /// Builds the ledger as of today (UTC).
    ///
    /// # Errors
    ///
    /// See [`Self::build_monthly_ledger`].
    pub fn build_current_ledger(
        tenancy: &Tenancy,
        transactions: &[PaymentTransaction],
    ) -> Result<MonthlyLedger, BillingError> {
        Self::build_monthly_ledger(tenancy, transactions, Utc::now().date_naive())
    }
}
