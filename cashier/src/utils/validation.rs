//! Input validation helpers
//!
//! Centralized limits for catalog input and transaction building.

use rust_decimal::Decimal;

use crate::core::CashierError;

// ── Limits ──────────────────────────────────────────────────────────

/// Entity names: product, payment method, buyer
pub const MAX_NAME_LEN: usize = 200;

/// Units of one product on a single transaction line
pub const MAX_QUANTITY: u32 = 9999;

/// Highest accepted unit price (Rupiah)
pub const MAX_PRICE: i64 = 1_000_000_000;

// ── Helpers ─────────────────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(
    value: &str,
    field: &'static str,
    max_len: usize,
) -> Result<(), CashierError> {
    if value.trim().is_empty() {
        return Err(CashierError::invalid_input(field, "must not be empty"));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CashierError::invalid_input(
            field,
            format!("is too long ({len} chars, max {max_len})"),
        ));
    }
    Ok(())
}

/// Validate a unit price: non-negative and not absurdly large.
pub fn validate_price(price: Decimal) -> Result<(), CashierError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(CashierError::invalid_input(
            "price",
            format!("must be non-negative, got {price}"),
        ));
    }
    if price > Decimal::from(MAX_PRICE) {
        return Err(CashierError::invalid_input(
            "price",
            format!("exceeds maximum allowed value of {MAX_PRICE}, got {price}"),
        ));
    }
    Ok(())
}
