//! Folding payment transactions into ledger entries.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use super::month::YearMonth;
use rust_decimal::Decimal;

use super::types::{MonthlyLedgerEntry, PaymentTransaction, UnmatchedReason, UnmatchedTransaction};

impl MonthlyLedgerEntry {
    /// Applies one payment to this entry.
    ///
    /// `total_paid` accumulates. The due figures follow the last-wins rule:
    /// the payment's `rent_amount` and `light_bill_amount` replace the
    /// entry's, so the most recently applied payment defines what the month
    /// owes.
    pub fn apply(&mut self, transaction: &PaymentTransaction) {
        self.total_paid += transaction.paid_amount;
        self.rent_amount = transaction.rent_amount;
        self.light_bill_amount = transaction.light_bill_amount;
        self.total_due = self.rent_amount + self.light_bill_amount;
        self.balance = self.total_paid - self.total_due;
        self.transactions.push(transaction.clone());
    }
}

/// Reconciles payments into the ledger in the order given.
///
/// Callers pass transactions in a consistent order (ascending `paid_on` is
/// what [`order_for_reconciliation`] produces), because the last payment
/// applied to a month sets that month's due amounts (see
/// [`MonthlyLedgerEntry::apply`]).
///
/// Payments for months that are not in the ledger, and payments with a
/// negative amount, are skipped and returned as diagnostics. They never
/// affect any entry.
pub fn reconcile(
    ledger: &mut BTreeMap<YearMonth, MonthlyLedgerEntry>,
    transactions: &[PaymentTransaction],
) -> Vec<UnmatchedTransaction> {
    let mut unmatched = Vec::new();

    for transaction in transactions {
        if transaction.paid_amount < Decimal::ZERO {
            warn!(
                payment_id = %transaction.id,
                month = %transaction.month,
                paid_amount = %transaction.paid_amount,
                "Payment amount is negative, skipping"
            );
            unmatched.push(UnmatchedTransaction::new(transaction, UnmatchedReason::NegativeAmount));
            continue;
        }

        let Some(entry) = ledger.get_mut(&transaction.month) else {
            warn!(
                payment_id = %transaction.id,
                month = %transaction.month,
                paid_amount = %transaction.paid_amount,
                "Payment month is outside the tenancy period, skipping"
            );
            unmatched.push(UnmatchedTransaction::new(transaction, UnmatchedReason::OutsideTenancy));
            continue;
        };
        entry.apply(transaction);
    }

    debug!(
        applied = transactions.len() - unmatched.len(),
        unmatched = unmatched.len(),
        "Reconciled payments"
    );
    unmatched
}

/// Sorts transactions into reconciliation order: ascending `paid_on`.
///
/// The sort is stable, so same-day payments keep their source order.
pub fn order_for_reconciliation(transactions: &mut [PaymentTransaction]) {
    transactions.sort_by_key(|transaction| transaction.paid_on);
}

/// Returns true if `paid_on` never decreases between consecutive payments.
#[must_use]
pub fn is_reconciliation_ordered(transactions: &[PaymentTransaction]) -> bool {
    transactions
        .windows(2)
        .all(|pair| pair[0].paid_on <= pair[1].paid_on)
}
