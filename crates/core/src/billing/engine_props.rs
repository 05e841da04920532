//! Property-based tests for the billing engine.

use banjara_shared::types::{FamilyId, PaymentId, RoomId};
use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::BillingEngine;
use super::month::{YearMonth, generate_months};
use super::types::{PaymentStatus, PaymentTransaction, Tenancy, UnmatchedReason};

/// Strategy for dates between 2020 and 2029.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2020i32..2030, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Strategy for a tenancy window and an as-of date at or after check-in.
fn tenancy_strategy() -> impl Strategy<Value = (Tenancy, NaiveDate)> {
    (date_strategy(), 0i64..900, proptest::option::of(0i64..900), 1i64..20_000).prop_map(
        |(check_in, as_of_offset, checkout_offset, rent)| {
            let tenancy = Tenancy {
                family_id: FamilyId::new(),
                room_id: RoomId::new(),
                rent: Decimal::from(rent),
                check_in_date: check_in,
                check_out_date: checkout_offset.map(|days| check_in + chrono::Duration::days(days)),
            };
            (tenancy, check_in + chrono::Duration::days(as_of_offset))
        },
    )
}

/// Strategy for payments spread over months near 2020-2029, some with
/// negative amounts.
fn payments_strategy() -> impl Strategy<Value = Vec<PaymentTransaction>> {
    proptest::collection::vec(
        (date_strategy(), -2_000i64..10_000, 0i64..2_000),
        0..25,
    )
    .prop_map(|raw| {
        raw.into_iter()
            .map(|(paid_on, paid, light)| PaymentTransaction {
                id: PaymentId::new(),
                family_id: FamilyId::new(),
                month: YearMonth::from_date(paid_on),
                rent_amount: Decimal::from(5_000),
                light_bill_amount: Decimal::from(light),
                paid_amount: Decimal::from(paid),
                paid_on,
                mode: "Cash".to_string(),
                notes: None,
                light_reading: None,
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Ledger covers every month from check-in to effective end, most recent first.
    #[test]
    fn prop_ledger_covers_tenancy_without_gaps((tenancy, as_of) in tenancy_strategy()) {
        let end = tenancy.effective_end(as_of);
        let ledger = BillingEngine::build_monthly_ledger(&tenancy, &[], as_of).unwrap();

        let expected_len = (end.year() - tenancy.check_in_date.year()) * 12
            + i32::try_from(end.month()).unwrap()
            - i32::try_from(tenancy.check_in_date.month()).unwrap()
            + 1;
        prop_assert_eq!(ledger.entries.len(), usize::try_from(expected_len).unwrap());
        prop_assert_eq!(ledger.entries.first().unwrap().month, YearMonth::from_date(end));
        prop_assert_eq!(
            ledger.entries.last().unwrap().month,
            YearMonth::from_date(tenancy.check_in_date)
        );
        for pair in ledger.entries.windows(2) {
            prop_assert_eq!(pair[1].month.next(), Some(pair[0].month));
        }
    }

    /// Every payment is either applied to exactly one month or reported unmatched.
    #[test]
    fn prop_payments_are_applied_or_reported(
        (tenancy, as_of) in tenancy_strategy(),
        payments in payments_strategy(),
    ) {
        let ledger = BillingEngine::build_monthly_ledger(&tenancy, &payments, as_of).unwrap();

        let applied: usize = ledger.entries.iter().map(|e| e.transactions.len()).sum();
        prop_assert_eq!(applied + ledger.unmatched.len(), payments.len());

        let paid_in_ledger: Decimal = ledger.entries.iter().map(|e| e.total_paid).sum();
        let paid_unmatched: Decimal = ledger.unmatched.iter().map(|u| u.paid_amount).sum();
        let paid_total: Decimal = payments.iter().map(|p| p.paid_amount).sum();
        prop_assert_eq!(paid_in_ledger + paid_unmatched, paid_total);

        let negative = payments.iter().filter(|p| p.paid_amount < Decimal::ZERO).count();
        let reported_negative = ledger
            .unmatched
            .iter()
            .filter(|u| u.reason == UnmatchedReason::NegativeAmount)
            .count();
        prop_assert_eq!(negative, reported_negative);
        prop_assert!(ledger.entries.iter().all(|e| e.total_paid >= Decimal::ZERO));
    }

    /// Entry arithmetic and status agree for every month.
    #[test]
    fn prop_entry_invariants(
        (tenancy, as_of) in tenancy_strategy(),
        payments in payments_strategy(),
    ) {
        let ledger = BillingEngine::build_monthly_ledger(&tenancy, &payments, as_of).unwrap();

        for entry in &ledger.entries {
            prop_assert_eq!(entry.total_due, entry.rent_amount + entry.light_bill_amount);
            prop_assert_eq!(entry.balance, entry.total_paid - entry.total_due);
            let paid: Decimal = entry.transactions.iter().map(|t| t.paid_amount).sum();
            prop_assert_eq!(entry.total_paid, paid);

            if let Some(last) = entry.transactions.last() {
                prop_assert_eq!(entry.light_bill_amount, last.light_bill_amount);
            } else {
                prop_assert_eq!(entry.total_due, tenancy.rent);
            }

            match entry.status {
                PaymentStatus::Paid => {
                    prop_assert!(entry.balance >= Decimal::ZERO);
                }
                PaymentStatus::PartiallyPaid => {
                    prop_assert!(entry.balance < Decimal::ZERO && entry.total_paid > Decimal::ZERO);
                }
                PaymentStatus::Pending => {
                    prop_assert!(entry.total_paid.is_zero() && entry.month.last_day() >= as_of);
                }
                PaymentStatus::Overdue => {
                    prop_assert!(entry.total_paid.is_zero() && entry.month.last_day() < as_of);
                }
            }
        }
    }

    /// Same inputs, same ledger.
    #[test]
    fn prop_build_is_idempotent(
        (tenancy, as_of) in tenancy_strategy(),
        payments in payments_strategy(),
    ) {
        let first = BillingEngine::build_monthly_ledger(&tenancy, &payments, as_of).unwrap();
        let second = BillingEngine::build_monthly_ledger(&tenancy, &payments, as_of).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Generation fails exactly when the range is reversed.
    #[test]
    fn prop_generate_months_range_check(start in date_strategy(), end in date_strategy()) {
        let result = generate_months(start, end);
        prop_assert_eq!(result.is_err(), end < start);
    }
}
