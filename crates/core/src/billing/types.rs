//! Billing data types.

use banjara_shared::types::{Currency, FamilyId, Money, PaymentId, RoomId};
use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::BillingError;
use super::month::YearMonth;

/// A family's validated occupancy of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenancy {
    /// Resident family.
    pub family_id: FamilyId,
    /// Occupied room.
    pub room_id: RoomId,
    /// Fixed monthly rent of the room.
    pub rent: Decimal,
    /// First day of the tenancy, inclusive.
    pub check_in_date: NaiveDate,
    /// Last day of the tenancy; `None` while the family still resides.
    pub check_out_date: Option<NaiveDate>,
}

impl Tenancy {
    /// Returns true if the family has not checked out.
    #[must_use]
    pub fn is_ongoing(&self) -> bool {
        self.check_out_date.is_none()
    }

    /// The date that bounds ledger generation: check-out if known, else `as_of`.
    #[must_use]
    pub fn effective_end(&self, as_of: NaiveDate) -> NaiveDate {
        self.check_out_date.unwrap_or(as_of)
    }
}

/// Tenancy as delivered by the family record lookup, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenancyRecord {
    /// Resident family.
    pub family_id: FamilyId,
    /// Occupied room.
    pub room_id: RoomId,
    /// Check-in date as stored (ISO date or RFC 3339 timestamp).
    #[serde(default)]
    pub check_in_date: Option<String>,
    /// Check-out date as stored, absent while residing.
    #[serde(default)]
    pub check_out_date: Option<String>,
    /// Room rent, resolved from the room record.
    #[serde(default)]
    pub rent: Option<Decimal>,
    /// Whether the family is currently residing.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Parses a stored date. Accepts `2025-01-15` and `2025-01-15T00:00:00.000Z`.
///
/// Returns `Ok(None)` for blank input.
fn parse_record_date(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(None);
    };

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map(Some)
        .map_err(|_| format!("unparsable date {raw:?}"))
}

impl TryFrom<&TenancyRecord> for Tenancy {
    type Error = BillingError;

    fn try_from(record: &TenancyRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| BillingError::InvalidTenancy {
            family_id: record.family_id,
            reason,
        };

        let check_in_date = parse_record_date(record.check_in_date.as_deref())
            .map_err(|e| invalid(format!("check-in date: {e}")))?
            .ok_or_else(|| invalid("check-in date is missing".to_string()))?;
        let check_out_date = parse_record_date(record.check_out_date.as_deref())
            .map_err(|e| invalid(format!("check-out date: {e}")))?;

        let rent = record
            .rent
            .ok_or_else(|| invalid("room rent is missing".to_string()))?;
        if rent <= Decimal::ZERO {
            return Err(invalid(format!("room rent must be positive, got {rent}")));
        }

        if record.is_active == check_out_date.is_some() {
            warn!(
                family_id = %record.family_id,
                is_active = record.is_active,
                check_out_date = ?check_out_date,
                "Tenancy active flag disagrees with check-out date, using check-out date"
            );
        }

        Ok(Self {
            family_id: record.family_id,
            room_id: record.room_id,
            rent,
            check_in_date,
            check_out_date,
        })
    }
}

/// Electricity meter readings backing a light bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightReading {
    /// Reading at the previous bill.
    pub previous: Decimal,
    /// Reading at this bill.
    pub current: Decimal,
    /// Charge per consumed unit.
    pub rate_per_unit: Decimal,
}

impl LightReading {
    /// Units consumed. A meter reset (current below previous) counts as zero.
    #[must_use]
    pub fn units(&self) -> Decimal {
        (self.current - self.previous).max(Decimal::ZERO)
    }

    /// Electricity charge for the consumed units.
    #[must_use]
    pub fn bill(&self) -> Decimal {
        self.units() * self.rate_per_unit
    }
}

/// A recorded rent/electricity payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentTransaction {
    /// Payment ID.
    pub id: PaymentId,
    /// Family that paid.
    pub family_id: FamilyId,
    /// Ledger month the payment applies to.
    pub month: YearMonth,
    /// Rent figure recorded with the payment.
    pub rent_amount: Decimal,
    /// Electricity figure recorded with the payment.
    pub light_bill_amount: Decimal,
    /// Amount actually paid.
    pub paid_amount: Decimal,
    /// Date of payment.
    pub paid_on: NaiveDate,
    /// Payment mode (Cash, UPI, ...).
    #[serde(default)]
    pub mode: String,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Meter readings justifying `light_bill_amount`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light_reading: Option<LightReading>,
}

/// Derived payment status of one ledger month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Paid in full or overpaid.
    Paid,
    /// Something was paid but a balance remains.
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    /// Nothing paid yet and the month is still running.
    Pending,
    /// Nothing paid and the month has ended.
    Overdue,
}

/// One month of a family's ledger. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLedgerEntry {
    /// Ledger month.
    pub month: YearMonth,
    /// Rent due for the month.
    pub rent_amount: Decimal,
    /// Electricity due for the month.
    pub light_bill_amount: Decimal,
    /// `rent_amount + light_bill_amount`.
    pub total_due: Decimal,
    /// Sum of all payments for the month.
    pub total_paid: Decimal,
    /// `total_paid - total_due`; negative while money is owed.
    pub balance: Decimal,
    /// Derived status.
    pub status: PaymentStatus,
    /// Payments applied to this month, in processing order.
    pub transactions: Vec<PaymentTransaction>,
}

impl MonthlyLedgerEntry {
    /// Returns true if the dashboard should offer an "add payment" action.
    #[must_use]
    pub fn accepts_payment(&self) -> bool {
        self.status != PaymentStatus::Paid
    }

    /// Amount still owed for the month, never negative.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        (-self.balance).max(Decimal::ZERO)
    }
}

/// Why a payment was left out of the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnmatchedReason {
    /// The payment's month is outside the tenancy period.
    OutsideTenancy,
    /// The paid amount is negative.
    NegativeAmount,
}

/// Diagnostic for a payment that was not applied to any month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedTransaction {
    /// Payment ID.
    pub transaction_id: PaymentId,
    /// Month the payment claims to belong to.
    pub month: YearMonth,
    /// Amount excluded from the ledger.
    pub paid_amount: Decimal,
    /// Why the payment was skipped.
    pub reason: UnmatchedReason,
}

impl UnmatchedTransaction {
    /// Records `transaction` as skipped for `reason`.
    #[must_use]
    pub fn new(transaction: &PaymentTransaction, reason: UnmatchedReason) -> Self {
        Self {
            transaction_id: transaction.id,
            month: transaction.month,
            paid_amount: transaction.paid_amount,
            reason,
        }
    }
}

/// A family's monthly ledger, most recent month first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyLedger {
    /// Ledger entries, most recent month first.
    pub entries: Vec<MonthlyLedgerEntry>,
    /// Payments skipped because their month is outside the tenancy or
    /// their amount is negative.
    pub unmatched: Vec<UnmatchedTransaction>,
}

impl MonthlyLedger {
    /// Returns the entry for `month`, if it is part of the ledger.
    #[must_use]
    pub fn entry(&self, month: YearMonth) -> Option<&MonthlyLedgerEntry> {
        self.entries.iter().find(|entry| entry.month == month)
    }

    /// Consumes the ledger, keeping only the entries.
    #[must_use]
    pub fn into_entries(self) -> Vec<MonthlyLedgerEntry> {
        self.entries
    }

    /// Aggregates the ledger into totals and status counts.
    #[must_use]
    pub fn summary(&self, currency: Currency) -> LedgerSummary {
        let count = |status: PaymentStatus| self.entries.iter().filter(|e| e.status == status).count();
        let total_due: Decimal = self.entries.iter().map(|e| e.total_due).sum();
        let total_paid: Decimal = self.entries.iter().map(|e| e.total_paid).sum();
        let outstanding: Decimal = self.entries.iter().map(MonthlyLedgerEntry::outstanding).sum();

        LedgerSummary {
            currency,
            months: self.entries.len(),
            total_due: Money::new(total_due, currency),
            total_paid: Money::new(total_paid, currency),
            outstanding: Money::new(outstanding, currency),
            paid_months: count(PaymentStatus::Paid),
            partially_paid_months: count(PaymentStatus::PartiallyPaid),
            pending_months: count(PaymentStatus::Pending),
            overdue_months: count(PaymentStatus::Overdue),
        }
    }
}

/// Ledger totals for the tenancy header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSummary {
    /// Currency of all amounts.
    pub currency: Currency,
    /// Number of ledger months.
    pub months: usize,
    /// Sum of monthly dues.
    pub total_due: Money,
    /// Sum of monthly payments.
    pub total_paid: Money,
    /// Sum of amounts still owed. Overpayment in one month does not offset another.
    pub outstanding: Money,
    /// Months paid in full.
    pub paid_months: usize,
    /// Months partially paid.
    pub partially_paid_months: usize,
    /// Months pending.
    pub pending_months: usize,
    /// Months overdue.
    pub overdue_months: usize,
}
