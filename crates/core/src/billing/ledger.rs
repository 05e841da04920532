//! Ledger initialization.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::month::YearMonth;
use super::types::{MonthlyLedgerEntry, PaymentStatus};

impl MonthlyLedgerEntry {
    /// Creates an unpaid entry owing the room's fixed rent.
    #[must_use]
    pub fn opening(month: YearMonth, rent: Decimal) -> Self {
        Self {
            month,
            rent_amount: rent,
            light_bill_amount: Decimal::ZERO,
            total_due: rent,
            total_paid: Decimal::ZERO,
            balance: -rent,
            status: PaymentStatus::Pending,
            transactions: Vec::new(),
        }
    }
}

/// Builds one opening entry per month, keyed and ordered by month.
///
/// Repeated months produce a single entry.
#[must_use]
pub fn init_ledger(months: &[YearMonth], rent: Decimal) -> BTreeMap<YearMonth, MonthlyLedgerEntry> {
    let mut ledger = BTreeMap::new();
    for &month in months {
        ledger
            .entry(month)
            .or_insert_with(|| MonthlyLedgerEntry::opening(month, rent));
    }
    ledger
}
