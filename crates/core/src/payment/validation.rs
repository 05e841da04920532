//! Payment draft validation.

use banjara_shared::types::{FamilyId, PaymentId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::PaymentError;
use crate::billing::{LightReading, MonthlyLedgerEntry, PaymentTransaction, Tenancy, YearMonth};

/// Payment mode offered first on the form.
pub const DEFAULT_MODE: &str = "Cash";

/// An "add payment" form before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDraft {
    /// Family paying.
    pub family_id: FamilyId,
    /// Ledger month the payment is for.
    pub month: YearMonth,
    /// Rent figure for the month.
    pub rent_amount: Decimal,
    /// Amount handed over.
    pub paid_amount: Decimal,
    /// Date of payment.
    pub paid_on: NaiveDate,
    /// Payment mode.
    pub mode: String,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Meter readings, if an electricity bill is charged.
    #[serde(default)]
    pub light_reading: Option<LightReading>,
    /// Rate applied by [`Self::with_meter`].
    pub rate_per_unit: Decimal,
}

impl PaymentDraft {
    /// Pre-fills a draft for one month of `tenancy`.
    ///
    /// Returns `None` for a month that is already paid. The rent is the
    /// tenancy's current room rent, and meter readings added with
    /// [`Self::with_meter`] are charged at `rate_per_unit`. The paid amount
    /// starts at the rent less what the month has already received.
    #[must_use]
    pub fn for_entry(
        tenancy: &Tenancy,
        entry: &MonthlyLedgerEntry,
        paid_on: NaiveDate,
        rate_per_unit: Decimal,
    ) -> Option<Self> {
        if !entry.accepts_payment() {
            return None;
        }

        Some(Self {
            family_id: tenancy.family_id,
            month: entry.month,
            rent_amount: tenancy.rent,
            paid_amount: (tenancy.rent - entry.total_paid).max(Decimal::ZERO),
            paid_on,
            mode: DEFAULT_MODE.to_string(),
            notes: None,
            light_reading: None,
            rate_per_unit,
        })
    }

    /// Attaches meter readings charged at the draft's rate.
    #[must_use]
    pub fn with_meter(self, previous: Decimal, current: Decimal) -> Self {
        let rate_per_unit = self.rate_per_unit;
        self.with_light_reading(previous, current, rate_per_unit)
    }

    /// Attaches meter readings charged at `rate_per_unit`.
    #[must_use]
    pub fn with_light_reading(mut self, previous: Decimal, current: Decimal, rate_per_unit: Decimal) -> Self {
        self.light_reading = Some(LightReading {
            previous,
            current,
            rate_per_unit,
        });
        self
    }

    /// Total the month will owe once this payment is recorded.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.rent_amount + self.light_reading.map_or(Decimal::ZERO, |reading| reading.bill())
    }
}

/// Validates a draft and produces the transaction to store.
///
/// The light bill is computed from the meter readings, zero without them.
///
/// # Errors
///
/// Returns a `PaymentError` for a non-positive paid or rent amount, a blank
/// mode, or a negative meter reading or rate.
pub fn validate_payment(draft: PaymentDraft) -> Result<PaymentTransaction, PaymentError> {
    if draft.paid_amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidPaidAmount(draft.paid_amount));
    }
    if draft.rent_amount <= Decimal::ZERO {
        return Err(PaymentError::InvalidRentAmount(draft.rent_amount));
    }

    let mode = draft.mode.trim();
    if mode.is_empty() {
        return Err(PaymentError::MissingMode);
    }

    if let Some(reading) = &draft.light_reading {
        validate_reading(reading)?;
    }

    let light_bill_amount = draft.light_reading.map_or(Decimal::ZERO, |reading| reading.bill());
    let notes = draft
        .notes
        .map(|notes| notes.trim().to_string())
        .filter(|notes| !notes.is_empty());

    Ok(PaymentTransaction {
        id: PaymentId::new(),
        family_id: draft.family_id,
        month: draft.month,
        rent_amount: draft.rent_amount,
        light_bill_amount,
        paid_amount: draft.paid_amount,
        paid_on: draft.paid_on,
        mode: mode.to_string(),
        notes,
        light_reading: draft.light_reading,
    })
}

fn validate_reading(reading: &LightReading) -> Result<(), PaymentError> {
    for (name, value) in [
        ("previous", reading.previous),
        ("current", reading.current),
        ("rate per unit", reading.rate_per_unit),
    ] {
        if value < Decimal::ZERO {
            return Err(PaymentError::InvalidLightReading(format!(
                "{name} must not be negative, got {value}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::PaymentStatus;
    use banjara_shared::BillingConfig;
    use banjara_shared::types::RoomId;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march() -> YearMonth {
        YearMonth::new(2025, 3).unwrap()
    }

    fn draft() -> PaymentDraft {
        PaymentDraft {
            family_id: FamilyId::new(),
            month: march(),
            rent_amount: dec!(6000),
            paid_amount: dec!(6000),
            paid_on: date(2025, 3, 5),
            mode: "UPI".to_string(),
            notes: None,
            light_reading: None,
            rate_per_unit: dec!(13),
        }
    }

    fn tenancy(rent: Decimal) -> Tenancy {
        Tenancy {
            family_id: FamilyId::new(),
            room_id: RoomId::new(),
            rent,
            check_in_date: date(2025, 1, 1),
            check_out_date: None,
        }
    }

    fn partially_paid_march(recorded_rent: Decimal, paid: Decimal) -> MonthlyLedgerEntry {
        let mut entry = MonthlyLedgerEntry::opening(march(), recorded_rent);
        entry.total_paid = paid;
        entry.balance = paid - recorded_rent;
        entry.status = PaymentStatus::PartiallyPaid;
        entry
    }

    #[test]
    fn test_valid_draft_without_reading() {
        let draft = draft();
        let tx = validate_payment(draft.clone()).unwrap();

        assert_eq!(tx.family_id, draft.family_id);
        assert_eq!(tx.month, march());
        assert_eq!(tx.light_bill_amount, Decimal::ZERO);
        assert_eq!(tx.paid_amount, dec!(6000));
        assert_eq!(tx.mode, "UPI");
    }

    #[test]
    fn test_light_bill_from_reading() {
        let draft = draft().with_light_reading(dec!(1200), dec!(1250), dec!(13));
        assert_eq!(draft.total_amount(), dec!(6650));

        let tx = validate_payment(draft).unwrap();
        assert_eq!(tx.light_bill_amount, dec!(650));
        assert_eq!(tx.light_reading.unwrap().units(), dec!(50));
    }

    #[test]
    fn test_meter_reset_charges_nothing() {
        let tx = validate_payment(draft().with_light_reading(dec!(900), dec!(20), dec!(13))).unwrap();
        assert_eq!(tx.light_bill_amount, Decimal::ZERO);
    }

    #[test]
    fn test_each_validation_gets_fresh_id() {
        let first = validate_payment(draft()).unwrap();
        let second = validate_payment(draft()).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[rstest]
    #[case::zero(dec!(0))]
    #[case::negative(dec!(-100))]
    fn test_rejects_non_positive_paid_amount(#[case] paid: Decimal) {
        let mut draft = draft();
        draft.paid_amount = paid;
        assert_eq!(validate_payment(draft), Err(PaymentError::InvalidPaidAmount(paid)));
    }

    #[test]
    fn test_rejects_non_positive_rent() {
        let mut draft = draft();
        draft.rent_amount = dec!(0);
        assert_eq!(validate_payment(draft), Err(PaymentError::InvalidRentAmount(dec!(0))));
    }

    #[rstest]
    #[case::empty("")]
    #[case::whitespace("   ")]
    fn test_rejects_blank_mode(#[case] mode: &str) {
        let mut draft = draft();
        draft.mode = mode.to_string();
        assert_eq!(validate_payment(draft), Err(PaymentError::MissingMode));
    }

    #[test]
    fn test_rejects_negative_reading() {
        let draft = draft().with_light_reading(dec!(-1), dec!(10), dec!(13));
        assert!(matches!(
            validate_payment(draft),
            Err(PaymentError::InvalidLightReading(_))
        ));
    }

    #[test]
    fn test_blank_notes_dropped() {
        let mut draft = draft();
        draft.notes = Some("  ".to_string());
        assert_eq!(validate_payment(draft).unwrap().notes, None);
    }

    #[test]
    fn test_for_entry_prefills_remaining_rent() {
        let tenancy = tenancy(dec!(6000));
        let entry = partially_paid_march(dec!(6000), dec!(2500));

        let draft = PaymentDraft::for_entry(&tenancy, &entry, date(2025, 3, 20), dec!(13)).unwrap();
        assert_eq!(draft.family_id, tenancy.family_id);
        assert_eq!(draft.month, march());
        assert_eq!(draft.rent_amount, dec!(6000));
        assert_eq!(draft.paid_amount, dec!(3500));
        assert_eq!(draft.mode, DEFAULT_MODE);
        assert_eq!(draft.light_reading, None);
    }

    #[test]
    fn test_for_entry_uses_current_room_rent() {
        // Rent was raised after a partial payment recorded at the old rent.
        let tenancy = tenancy(dec!(6500));
        let entry = partially_paid_march(dec!(6000), dec!(3000));

        let draft = PaymentDraft::for_entry(&tenancy, &entry, date(2025, 3, 20), dec!(13)).unwrap();
        assert_eq!(draft.rent_amount, dec!(6500));
        assert_eq!(draft.paid_amount, dec!(3500));

        let tx = validate_payment(draft).unwrap();
        assert_eq!(tx.rent_amount, dec!(6500));
    }

    #[test]
    fn test_configured_rate_drives_light_bill() {
        let config = BillingConfig {
            default_rate_per_unit: dec!(8.5),
            ..BillingConfig::default()
        };
        let entry = partially_paid_march(dec!(6000), dec!(0));

        let draft = PaymentDraft::for_entry(
            &tenancy(dec!(6000)),
            &entry,
            date(2025, 3, 20),
            config.default_rate_per_unit,
        )
        .unwrap()
        .with_meter(dec!(1200), dec!(1240));

        assert_eq!(draft.total_amount(), dec!(6340));
        let tx = validate_payment(draft).unwrap();
        assert_eq!(tx.light_bill_amount, dec!(340));
        assert_eq!(tx.light_reading.unwrap().rate_per_unit, dec!(8.5));
    }

    #[test]
    fn test_default_rate_is_thirteen_per_unit() {
        let entry = partially_paid_march(dec!(6000), dec!(0));
        let draft = PaymentDraft::for_entry(
            &tenancy(dec!(6000)),
            &entry,
            date(2025, 3, 20),
            BillingConfig::default().default_rate_per_unit,
        )
        .unwrap()
        .with_meter(dec!(100), dec!(150));

        assert_eq!(validate_payment(draft).unwrap().light_bill_amount, dec!(650));
    }

    #[test]
    fn test_for_entry_refuses_paid_month() {
        let mut entry = MonthlyLedgerEntry::opening(march(), dec!(6000));
        entry.total_paid = dec!(6000);
        entry.balance = dec!(0);
        entry.status = PaymentStatus::Paid;

        assert!(PaymentDraft::for_entry(&tenancy(dec!(6000)), &entry, date(2025, 3, 20), dec!(13)).is_none());
    }
}
