// src/types.rs
use crate::core::stress::CrashScenario;
use crate::error::InputError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Long,
    Short,
}

impl Side {
    /// +1 for longs, -1 for shorts. Every price difference is multiplied by this.
    pub fn sign(self) -> Decimal {
        match self {
            Side::Long => Decimal::ONE,
            Side::Short => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        }
    }
}

/// Upper bound applied to the theoretical add-on quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnCapPolicy {
    Uncapped,
    /// Never add more than the original position (1:1).
    #[default]
    MatchOriginal,
    /// Held plus added units never exceed twice the original position.
    DoubleOriginal,
}

/// Which held quantity backs the add-on profit buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOnBasis {
    /// The full original position, independent of the sell instruction.
    #[default]
    Original,
    /// Only what is left after the recommended partial close.
    AfterSell,
}

/// One immutable calculation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingInput {
    pub side: Side,
    pub entry_price: Decimal,
    pub initial_stop: Decimal,
    pub total_shares: u64,
    pub current_price: Decimal,
    pub target_stop: Option<Decimal>,
    /// Money that must survive a pullback to the initial stop. Zero disables it.
    pub profit_goal: Decimal,
    pub add_on_stop: Option<Decimal>,
    /// 1 for plain shares, 1000 for instruments quoted per lot.
    pub unit_multiplier: Decimal,
    pub add_on_cap: AddOnCapPolicy,
    pub add_on_basis: AddOnBasis,
    /// Adverse move used for the crash scenario, as a fraction (0.20 = 20%).
    pub crash_shock: Decimal,
}

impl SizingInput {
    pub fn new(
        side: Side,
        entry_price: Decimal,
        initial_stop: Decimal,
        total_shares: u64,
        current_price: Decimal,
    ) -> Self {
        Self {
            side,
            entry_price,
            initial_stop,
            total_shares,
            current_price,
            target_stop: None,
            profit_goal: Decimal::ZERO,
            add_on_stop: None,
            unit_multiplier: Decimal::ONE,
            add_on_cap: AddOnCapPolicy::default(),
            add_on_basis: AddOnBasis::default(),
            crash_shock: dec!(0.20),
        }
    }

    pub fn with_profit_goal(mut self, goal: Decimal) -> Self {
        self.profit_goal = goal;
        self
    }

    pub fn with_target_stop(mut self, target: Decimal) -> Self {
        self.target_stop = Some(target);
        self
    }

    pub fn with_add_on_stop(mut self, stop: Decimal) -> Self {
        self.add_on_stop = Some(stop);
        self
    }

    pub fn with_unit_multiplier(mut self, multiplier: Decimal) -> Self {
        self.unit_multiplier = multiplier;
        self
    }

    pub fn with_add_on_cap(mut self, cap: AddOnCapPolicy) -> Self {
        self.add_on_cap = cap;
        self
    }

    pub fn with_add_on_basis(mut self, basis: AddOnBasis) -> Self {
        self.add_on_basis = basis;
        self
    }

    pub fn with_crash_shock(mut self, shock: Decimal) -> Self {
        self.crash_shock = shock;
        self
    }

    /// Rejects values no calculation can sensibly use. Degenerate prices
    /// (zero entry, stop equal to entry) are left to the engine.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.total_shares == 0 {
            return Err(InputError::NonPositive("total shares"));
        }
        if self.unit_multiplier <= Decimal::ZERO {
            return Err(InputError::NonPositive("unit multiplier"));
        }
        if self.profit_goal < Decimal::ZERO {
            return Err(InputError::Negative("profit goal"));
        }
        if self.crash_shock < Decimal::ZERO || self.crash_shock >= Decimal::ONE {
            return Err(InputError::OutOfRange {
                field: "crash shock",
                value: self.crash_shock,
                range: "[0, 1)",
            });
        }
        Ok(())
    }
}

/// Flat result of one calculation. Quantities are whole units, money is
/// already scaled by the unit multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingReport {
    pub one_r: Decimal,
    pub profit_per_unit: Decimal,

    pub sell_breakeven: u64,
    pub sell_for_goal: u64,
    pub sell: u64,
    pub remaining: u64,

    pub add_on: u64,
    pub theoretical_add_on: u64,
    pub add_on_cost: Decimal,
    /// Worst-case result if price falls back to the add-on stop.
    pub add_on_floor_result: Decimal,

    pub total_profit: Decimal,
    pub profit_pct: Decimal,
    pub profit_r: Decimal,

    pub locked_realized: Decimal,
    pub locked_potential: Decimal,
    pub locked_total: Decimal,

    pub no_sell_at_initial_stop: Decimal,
    pub no_sell_at_target_stop: Decimal,

    pub crash: CrashScenario,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SizingInput {
        SizingInput::new(Side::Long, dec!(100), dec!(90), 10, dec!(115))
    }

    #[test]
    fn sign_follows_side() {
        assert_eq!(Side::Long.sign(), Decimal::ONE);
        assert_eq!(Side::Short.sign(), Decimal::NEGATIVE_ONE);
        assert_eq!(Side::Long.flip(), Side::Short);
    }

    #[test]
    fn validate_accepts_defaults() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_shares() {
        let mut input = sample();
        input.total_shares = 0;
        assert!(matches!(
            input.validate(),
            Err(InputError::NonPositive("total shares"))
        ));
    }

    #[test]
    fn validate_rejects_bad_multiplier_goal_and_shock() {
        let input = sample().with_unit_multiplier(Decimal::ZERO);
        assert!(matches!(input.validate(), Err(InputError::NonPositive(_))));

        let input = sample().with_profit_goal(dec!(-1));
        assert!(matches!(input.validate(), Err(InputError::Negative(_))));

        let input = sample().with_crash_shock(Decimal::ONE);
        assert!(matches!(input.validate(), Err(InputError::OutOfRange { .. })));
    }

    #[test]
    fn policies_deserialize_from_snake_case() {
        let cap: AddOnCapPolicy = serde_json::from_str("\"double_original\"").unwrap();
        assert_eq!(cap, AddOnCapPolicy::DoubleOriginal);
        let basis: AddOnBasis = serde_json::from_str("\"after_sell\"").unwrap();
        assert_eq!(basis, AddOnBasis::AfterSell);
        let side: Side = serde_json::from_str("\"short\"").unwrap();
        assert_eq!(side, Side::Short);
    }
}
