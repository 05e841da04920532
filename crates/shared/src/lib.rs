//! Shared types, errors, and configuration for Banjara.
//!
//! This crate provides common types used across all other crates:
//! - Money types with decimal precision
//! - Typed IDs for families, rooms and payments
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, BillingConfig, LoggingConfig};
pub use error::{AppError, AppResult};
