//! Tests for money types.

use super::*;
use rust_decimal_macros::dec;
use std::str::FromStr;

#[test]
fn test_money_zero() {
    let money = Money::zero(Currency::Inr);
    assert!(money.is_zero());
    assert_eq!(money.currency, Currency::Inr);
}

#[test]
fn test_money_new() {
    let money = Money::new(dec!(4500.50), Currency::Eur);
    assert_eq!(money.amount, dec!(4500.50));
    assert_eq!(money.currency, Currency::Eur);
    assert!(!money.is_zero());
}

#[test]
fn test_money_display() {
    assert_eq!(Money::new(dec!(4500), Currency::Inr).to_string(), "₹4500");
    assert_eq!(Money::new(dec!(12.50), Currency::Usd).to_string(), "$12.50");
}

#[test]
fn test_currency_from_str() {
    assert_eq!(Currency::from_str("INR").unwrap(), Currency::Inr);
    assert_eq!(Currency::from_str("inr").unwrap(), Currency::Inr);
    assert_eq!(Currency::from_str("EUR").unwrap(), Currency::Eur);
    assert!(Currency::from_str("XXX").is_err());
    assert!(Currency::from_str("").is_err());
}
