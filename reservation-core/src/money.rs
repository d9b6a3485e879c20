//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic runs on `Decimal` internally; amounts are stored
//! as `f64` in the models and converted at this boundary.

use crate::folio::LedgerError;
use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Tolerance for monetary comparisons (0.01)
pub const MONEY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Maximum allowed nightly price or charge amount
pub const MAX_PRICE: f64 = 1_000_000.0;
/// Maximum allowed payment amount
pub const MAX_PAYMENT_AMOUNT: f64 = 1_000_000.0;

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a Decimal to the monetary precision (2 dp, half-up)
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Validate that a f64 value is finite (not NaN, not Infinity)
#[inline]
fn require_finite(value: f64, field: &str) -> Result<(), LedgerError> {
    if !value.is_finite() {
        return Err(LedgerError::InvalidAmount(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// Validate a charge amount before appending it to a folio
pub fn validate_charge(amount: f64) -> Result<(), LedgerError> {
    require_finite(amount, "charge amount")?;
    if amount <= 0.0 {
        return Err(LedgerError::InvalidAmount(format!(
            "charge amount must be positive, got {amount}"
        )));
    }
    if amount > MAX_PRICE {
        return Err(LedgerError::InvalidAmount(format!(
            "charge amount exceeds maximum allowed ({MAX_PRICE}), got {amount}"
        )));
    }
    Ok(())
}

/// Validate a payment amount before appending it to a folio
pub fn validate_payment(amount: f64) -> Result<(), LedgerError> {
    require_finite(amount, "payment amount")?;
    if amount <= 0.0 {
        return Err(LedgerError::InvalidAmount(format!(
            "payment amount must be positive, got {amount}"
        )));
    }
    if amount > MAX_PAYMENT_AMOUNT {
        return Err(LedgerError::InvalidAmount(format!(
            "payment amount exceeds maximum allowed ({MAX_PAYMENT_AMOUNT}), got {amount}"
        )));
    }
    Ok(())
}

/// Compare two monetary values for equality (within 0.01 tolerance)
pub fn money_eq(a: f64, b: f64) -> bool {
    (to_decimal(a) - to_decimal(b)).abs() < MONEY_TOLERANCE
}

/// A balance counts as settled when it is zero or in credit, within tolerance
pub fn is_settled(balance: Decimal) -> bool {
    balance <= MONEY_TOLERANCE
}
