//! Core business logic for Banjara.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Tenancy and payment records come in fully resolved; everything derived from
//! them is computed here.
//!
//! # Modules
//!
//! - `billing` - Monthly rent/electricity ledger reconciliation
//! - `payment` - Rules for recording a new payment
//! - `reports` - Dashboard revenue aggregation

pub mod billing;
pub mod payment;
pub mod reports;
