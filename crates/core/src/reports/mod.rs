//! Dashboard revenue reports.
//!
//! Revenue is what was actually paid. Both reports aggregate `paid_amount`
//! over payment records and never look at dues.

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::{RevenueChart, RevenuePoint};
