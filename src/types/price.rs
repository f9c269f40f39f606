//! Tick <-> decimal price conversion.
//!
//! ## Overview
//!
//! The book stores every price as an integer number of ticks. A tick size
//! (`rust_decimal::Decimal`, e.g. `0.01`) maps ticks to the decimal prices
//! humans type and read. Conversions never go through floating point.
//!
//! ## Examples
//!
//! ```
//! use limit_book::types::price::{parse_ticks, format_ticks};
//! use rust_decimal::Decimal;
//!
//! let cent = Decimal::new(1, 2);
//! assert_eq!(parse_ticks("99.50", cent), Some(9_950));
//! assert_eq!(format_ticks(9_950, cent), "99.5");
//!
//! // Not a whole number of ticks
//! assert_eq!(parse_ticks("99.505", cent), None);
//! ```

use rust_decimal::prelude::*;
use rust_decimal::Decimal;

// ============================================================================
// Conversion Functions
// ============================================================================

/// Convert a decimal price to ticks.
///
/// # Returns
///
/// * `Some(u64)` - The price in ticks
/// * `None` - If the value is negative, not a whole multiple of `tick_size`,
///   or does not fit in a `u64`
pub fn decimal_to_ticks(value: Decimal, tick_size: Decimal) -> Option<u64> {
    if value.is_sign_negative() || tick_size <= Decimal::ZERO {
        return None;
    }

    let ticks = value.checked_div(tick_size)?;
    if !ticks.fract().is_zero() {
        return None;
    }
    ticks.to_u64()
}

/// Convert ticks to a decimal price.
///
/// `None` when the product does not fit in a `Decimal` (about 7.9e28).
pub fn ticks_to_decimal(ticks: u64, tick_size: Decimal) -> Option<Decimal> {
    Decimal::from(ticks).checked_mul(tick_size)
}

/// Parse a decimal price string into ticks
///
/// # Example
///
/// ```
/// use limit_book::types::price::parse_ticks;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_ticks("101", Decimal::ONE), Some(101));
/// assert_eq!(parse_ticks("abc", Decimal::ONE), None);
/// ```
pub fn parse_ticks(s: &str, tick_size: Decimal) -> Option<u64> {
    let decimal = Decimal::from_str(s.trim()).ok()?;
    decimal_to_ticks(decimal, tick_size)
}

/// Render ticks as a decimal string with trailing zeros trimmed.
///
/// A price too large for a `Decimal` is rendered as `"<ticks> ticks"`, which
/// `parse_ticks` rejects.
pub fn format_ticks(ticks: u64, tick_size: Decimal) -> String {
    match ticks_to_decimal(ticks, tick_size) {
        Some(decimal) => decimal.normalize().to_string(),
        None => format!("{ticks} ticks"),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
