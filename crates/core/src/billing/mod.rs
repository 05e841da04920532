//! Monthly rent and electricity billing.
//!
//! A family's ledger is derived on every request from its tenancy and its
//! payment records. The pipeline is split into stages that can be tested on
//! their own:
//! - Month sequence generation over the tenancy period
//! - Ledger initialization with the room rent
//! - Reconciliation of payments into the monthly entries
//! - Status classification relative to an as-of date
//! - The engine that runs the stages in order
//! - Record sources and the service that reads them

pub mod engine;
pub mod error;
pub mod ledger;
pub mod month;
pub mod reconcile;
pub mod records;
pub mod service;
pub mod status;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::BillingEngine;
pub use error::BillingError;
pub use ledger::init_ledger;
pub use month::{MonthRange, ParseYearMonthError, YearMonth, generate_months};
pub use reconcile::{is_reconciliation_ordered, order_for_reconciliation, reconcile};
pub use records::{BillingRecords, FamilyRecord, InMemoryRecords, RoomRecord};
pub use service::BillingService;
pub use status::classify;
pub use types::{
    LedgerSummary, LightReading, MonthlyLedger, MonthlyLedgerEntry, PaymentStatus,
    PaymentTransaction, Tenancy, TenancyRecord, UnmatchedReason, UnmatchedTransaction,
};
