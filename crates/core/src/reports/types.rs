//! Report data types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::billing::YearMonth;

/// Revenue collected for one ledger month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Ledger month.
    pub month: YearMonth,
    /// Three-letter month name.
    pub label: String,
    /// Sum of paid amounts recorded against the month.
    pub revenue: Decimal,
}

impl RevenuePoint {
    /// Creates a point labelled with the month's short name.
    #[must_use]
    pub fn new(month: YearMonth, revenue: Decimal) -> Self {
        Self {
            month,
            label: month.first_day().format("%b").to_string(),
            revenue,
        }
    }
}

/// Trailing revenue chart, oldest month first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueChart {
    /// One point per month in the window, zeros included.
    pub points: Vec<RevenuePoint>,
}

impl RevenueChart {
    /// Revenue over the whole window.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.points.iter().map(|p| p.revenue).sum()
    }
}
