//! Recording a new payment.
//!
//! A [`PaymentDraft`] is what staff fill in for a month that is not yet
//! paid. [`validate_payment`] turns it into a [`PaymentTransaction`] ready to
//! be stored.
//!
//! [`PaymentTransaction`]: crate::billing::PaymentTransaction

pub mod error;
pub mod validation;

pub use error::PaymentError;
pub use validation::{PaymentDraft, validate_payment};
