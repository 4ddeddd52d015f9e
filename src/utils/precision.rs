// src/utils/precision.rs
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Divides, returning zero when the divisor is zero.
/// A flat position or an untouched stop is a legitimate input, not an error.
pub fn ratio_or_zero(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator / denominator
}

/// Rounds a unit count UP to a whole unit. Sell quantities use this so the
/// safety guarantee is never under-sold.
/// Example: 3.2 -> 4
pub fn ceil_units(quantity: Decimal) -> u64 {
    to_units(quantity.ceil())
}

/// Rounds a unit count DOWN to a whole unit. Add-on quantities use this so
/// capital is never over-committed.
/// Example: 3.8 -> 3
pub fn floor_units(quantity: Decimal) -> u64 {
    to_units(quantity.floor())
}

fn to_units(whole: Decimal) -> u64 {
    if whole <= Decimal::ZERO {
        return 0;
    }
    whole.to_u64().unwrap_or(u64::MAX)
}

pub fn units(quantity: u64) -> Decimal {
    Decimal::from(quantity)
}
