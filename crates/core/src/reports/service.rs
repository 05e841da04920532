//! Revenue report generation.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use super::types::{RevenueChart, RevenuePoint};
use crate::billing::{PaymentTransaction, YearMonth};

/// Service for generating dashboard revenue reports.
pub struct ReportService;

impl ReportService {
    /// Revenue received during `as_of`'s calendar month, by payment date.
    #[must_use]
    pub fn monthly_revenue(transactions: &[PaymentTransaction], as_of: NaiveDate) -> Decimal {
        let current = YearMonth::from_date(as_of);
        transactions
            .iter()
            .filter(|tx| current.contains(tx.paid_on))
            .map(|tx| tx.paid_amount)
            .sum()
    }

    /// Revenue per ledger month for the trailing `months` calendar months
    /// ending with `as_of`'s month.
    ///
    /// Only payments made inside the window count. They are grouped by the
    /// month they were recorded against, and months outside the window are
    /// dropped.
    #[must_use]
    pub fn revenue_chart(transactions: &[PaymentTransaction], months: u32, as_of: NaiveDate) -> RevenueChart {
        let last = YearMonth::from_date(as_of);
        let Some(first) = months.checked_sub(1).and_then(|back| last.months_back(back)) else {
            return RevenueChart::default();
        };

        let mut buckets: BTreeMap<YearMonth, Decimal> =
            first.through(last).map(|month| (month, Decimal::ZERO)).collect();
        let window_start = first.first_day();
        let window_end = last.last_day();

        for tx in transactions
            .iter()
            .filter(|tx| tx.paid_on >= window_start && tx.paid_on <= window_end)
        {
            if let Some(revenue) = buckets.get_mut(&tx.month) {
                *revenue += tx.paid_amount;
            }
        }

        debug!(%first, %last, payments = transactions.len(), "Built revenue chart");

        RevenueChart {
            points: buckets
                .into_iter()
                .map(|(month, revenue)| RevenuePoint::new(month, revenue))
                .collect(),
        }
    }
}
