//! Monthly payment status classification.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::types::{MonthlyLedgerEntry, PaymentStatus};

/// Classifies a ledger month relative to `as_of`.
///
/// - balance >= 0 → `Paid`
/// - something paid, balance negative → `PartiallyPaid`
/// - nothing paid → `Pending`, or `Overdue` once the month's last day is
///   strictly before `as_of`
#[must_use]
pub fn classify(entry: &MonthlyLedgerEntry, as_of: NaiveDate) -> PaymentStatus {
    if entry.balance >= Decimal::ZERO {
        PaymentStatus::Paid
    } else if entry.total_paid > Decimal::ZERO {
        PaymentStatus::PartiallyPaid
    } else if entry.month.last_day() < as_of {
        PaymentStatus::Overdue
    } else {
        PaymentStatus::Pending
    }
}
