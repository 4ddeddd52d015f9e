// src/core/stress.rs
use crate::types::Side;
use crate::utils::precision::units;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exposure if the market gaps against the position by a fixed shock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashScenario {
    pub shock: Decimal,
    pub crash_price: Decimal,
    /// Loss carrying the whole original position.
    pub loss_full: Decimal,
    /// Loss after the recommended partial close.
    pub loss_after_sell: Decimal,
    /// Loss on the held position plus the recommended add-on.
    pub loss_after_add_on: Decimal,
}

impl CrashScenario {
    /// `held_with_add_on` counts whatever backs the add-on (original or
    /// post-sell units) plus the added units.
    pub fn evaluate(
        side: Side,
        current_price: Decimal,
        shock: Decimal,
        unit_multiplier: Decimal,
        total: u64,
        remaining: u64,
        held_with_add_on: u64,
    ) -> Self {
        // Longs crash down, shorts squeeze up.
        let crash_price = current_price * (Decimal::ONE - shock * side.sign());
        let loss_per_unit = (current_price - crash_price).abs() * unit_multiplier;

        Self {
            shock,
            crash_price,
            loss_full: loss_per_unit * units(total),
            loss_after_sell: loss_per_unit * units(remaining),
            loss_after_add_on: loss_per_unit * units(held_with_add_on),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn long_crash_is_twenty_percent_lower() {
        let crash = CrashScenario::evaluate(Side::Long, dec!(1350), dec!(0.2), Decimal::ONE, 350, 100, 400);
        assert_eq!(crash.crash_price, dec!(1080));
        assert_eq!(crash.loss_full, dec!(94500));
        assert_eq!(crash.loss_after_sell, dec!(27000));
        assert_eq!(crash.loss_after_add_on, dec!(108000));
    }

    #[test]
    fn short_crash_is_twenty_percent_higher() {
        let crash = CrashScenario::evaluate(Side::Short, dec!(50), dec!(0.2), Decimal::ONE, 10, 4, 10);
        assert_eq!(crash.crash_price, dec!(60));
        assert_eq!(crash.loss_full, dec!(100));
        assert_eq!(crash.loss_after_sell, dec!(40));
    }

    #[test]
    fn multiplier_scales_losses() {
        let one = CrashScenario::evaluate(Side::Long, dec!(20), dec!(0.2), Decimal::ONE, 3, 1, 5);
        let lot = CrashScenario::evaluate(Side::Long, dec!(20), dec!(0.2), dec!(1000), 3, 1, 5);
        assert_eq!(lot.loss_full, one.loss_full * dec!(1000));
        assert_eq!(lot.loss_after_add_on, one.loss_after_add_on * dec!(1000));
        assert_eq!(lot.crash_price, one.crash_price);
    }
}
