// src/core/engine.rs
//! Position sizing engine.
//!
//! Every price difference is oriented by the trade side, so a short mirrors a
//! long exactly. Sell counts round up and add-on counts round down: the first
//! keeps the break-even guarantee, the second never risks the protected floor.
use crate::core::stress::CrashScenario;
use crate::types::{AddOnBasis, AddOnCapPolicy, SizingInput, SizingReport};
use crate::utils::precision::{ceil_units, floor_units, ratio_or_zero, units};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

#[derive(Debug, Default, Clone, PartialEq)]
struct AddOnSizing {
    add_on: u64,
    theoretical: u64,
    cost: Decimal,
    floor_result: Decimal,
}

/// Runs one calculation. Total: degenerate inputs degrade to zeros.
pub fn compute(input: &SizingInput) -> SizingReport {
    let sign = input.side.sign();
    let multiplier = input.unit_multiplier;
    let total = units(input.total_shares);

    let one_r = (input.entry_price - input.initial_stop).abs();
    let profit_per_unit = (input.current_price - input.entry_price) * sign;

    let (sell_breakeven, sell_for_goal) = sell_quantities(input, one_r, profit_per_unit);
    let sell = sell_breakeven.max(sell_for_goal).min(input.total_shares);
    let remaining = input.total_shares - sell;

    debug!(
        "Sizing {:?}: 1R={} profit/unit={} sell(be={}, goal={}) -> {} (remaining {})",
        input.side, one_r, profit_per_unit, sell_breakeven, sell_for_goal, sell, remaining
    );

    let add_on = size_add_on(input, profit_per_unit, sell, remaining);
    let held = held_units(input, remaining);

    let locked_realized = units(sell) * profit_per_unit * multiplier;
    let (locked_potential, no_sell_at_target_stop) = match input.target_stop {
        Some(target) => {
            let per_unit = (target - input.entry_price) * sign * multiplier;
            (units(remaining) * per_unit, total * per_unit)
        }
        None => (Decimal::ZERO, Decimal::ZERO),
    };

    let crash = CrashScenario::evaluate(
        input.side,
        input.current_price,
        input.crash_shock,
        multiplier,
        input.total_shares,
        remaining,
        held.saturating_add(add_on.add_on),
    );

    SizingReport {
        one_r,
        profit_per_unit,
        sell_breakeven,
        sell_for_goal,
        sell,
        remaining,
        add_on: add_on.add_on,
        theoretical_add_on: add_on.theoretical,
        add_on_cost: add_on.cost,
        add_on_floor_result: add_on.floor_result,
        total_profit: profit_per_unit * total * multiplier,
        profit_pct: ratio_or_zero(profit_per_unit, input.entry_price) * dec!(100),
        profit_r: ratio_or_zero(profit_per_unit, one_r),
        locked_realized,
        locked_potential,
        locked_total: locked_realized + locked_potential,
        no_sell_at_initial_stop: total * (input.initial_stop - input.entry_price) * sign * multiplier,
        no_sell_at_target_stop,
        crash,
    }
}

/// Units to close now so that a pullback to the initial stop still nets zero
/// (break-even) or the configured money goal.
fn sell_quantities(input: &SizingInput, one_r: Decimal, profit_per_unit: Decimal) -> (u64, u64) {
    if profit_per_unit <= Decimal::ZERO {
        return (0, 0);
    }

    let total = units(input.total_shares);
    let denominator = profit_per_unit + one_r;
    let breakeven = ceil_units(ratio_or_zero(total * one_r, denominator));

    let goal = input.profit_goal;
    let for_goal = if goal > Decimal::ZERO {
        let multiplier = input.unit_multiplier;
        ceil_units(ratio_or_zero(
            goal + total * one_r * multiplier,
            denominator * multiplier,
        ))
    } else {
        0
    };

    (breakeven, for_goal)
}

/// Units that back the add-on and stay held alongside it.
fn held_units(input: &SizingInput, remaining: u64) -> u64 {
    match input.add_on_basis {
        AddOnBasis::Original => input.total_shares,
        AddOnBasis::AfterSell => remaining,
    }
}

/// Pyramiding: unrealized profit down to the add-on stop pays for the risk of
/// the added units, keeping the floor (zero or the goal) intact.
fn size_add_on(
    input: &SizingInput,
    profit_per_unit: Decimal,
    sell: u64,
    remaining: u64,
) -> AddOnSizing {
    let Some(add_on_stop) = input.add_on_stop else {
        return AddOnSizing::default();
    };

    let sign = input.side.sign();
    let multiplier = input.unit_multiplier;
    let cushion_per_unit = (add_on_stop - input.entry_price) * sign;
    let risk_per_unit = (input.current_price - add_on_stop) * sign;

    if cushion_per_unit <= Decimal::ZERO || risk_per_unit <= Decimal::ZERO {
        debug!(
            "Add-on disabled: stop {} cushion={} risk={}",
            add_on_stop, cushion_per_unit, risk_per_unit
        );
        return AddOnSizing::default();
    }

    let base = held_units(input, remaining);
    let realized = match input.add_on_basis {
        AddOnBasis::Original => Decimal::ZERO,
        AddOnBasis::AfterSell => units(sell) * profit_per_unit * multiplier,
    };

    let held_at_stop = units(base) * cushion_per_unit * multiplier;
    let buffer = held_at_stop - input.profit_goal;
    if buffer <= Decimal::ZERO {
        debug!("Add-on disabled: no buffer above the profit goal ({})", buffer);
        return AddOnSizing::default();
    }

    let theoretical = floor_units(ratio_or_zero(buffer, risk_per_unit * multiplier));
    let cap = match input.add_on_cap {
        AddOnCapPolicy::Uncapped => u64::MAX,
        AddOnCapPolicy::MatchOriginal => input.total_shares,
        AddOnCapPolicy::DoubleOriginal => input.total_shares.saturating_mul(2).saturating_sub(base),
    };
    let add_on = theoretical.min(cap);

    debug!(
        "Add-on: buffer={} risk/unit={} theoretical={} cap={:?} -> {}",
        buffer, risk_per_unit, theoretical, input.add_on_cap, add_on
    );

    AddOnSizing {
        add_on,
        theoretical,
        cost: units(add_on) * input.current_price * multiplier,
        floor_result: held_at_stop - units(add_on) * risk_per_unit * multiplier + realized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn long_example() -> SizingInput {
        SizingInput::new(Side::Long, dec!(100), dec!(90), 10, dec!(115))
    }

    fn default_form() -> SizingInput {
        SizingInput::new(Side::Long, dec!(680), dec!(650), 350, dec!(1350))
    }

    #[test]
    fn breakeven_sell_for_simple_long() {
        let report = compute(&long_example());
        assert_eq!(report.one_r, dec!(10));
        assert_eq!(report.profit_per_unit, dec!(15));
        assert_eq!(report.sell_breakeven, 4);
        assert_eq!(report.sell, 4);
        assert_eq!(report.remaining, 6);

        // 6 units stopped at 90, 4 sold at 115.
        let at_stop = dec!(6) * (dec!(90) - dec!(100)) + dec!(4) * dec!(15);
        assert_eq!(at_stop, Decimal::ZERO);
    }

    #[test]
    fn overview_figures() {
        let report = compute(&long_example());
        assert_eq!(report.total_profit, dec!(150));
        assert_eq!(report.profit_pct, dec!(15));
        assert_eq!(report.profit_r, dec!(1.5));
        assert_eq!(report.no_sell_at_initial_stop, dec!(-100));
    }

    #[test]
    fn profit_goal_raises_the_sell() {
        let report = compute(&default_form().with_profit_goal(dec!(100000)));
        assert_eq!(report.sell_breakeven, 15);
        assert_eq!(report.sell_for_goal, 158);
        assert_eq!(report.sell, 158);
        assert_eq!(report.remaining, 192);
    }

    #[test]
    fn goal_larger_than_position_sells_everything() {
        let report = compute(&long_example().with_profit_goal(dec!(1000000)));
        assert_eq!(report.sell, 10);
        assert_eq!(report.remaining, 0);
    }

    #[test]
    fn short_mirrors_long() {
        let short = SizingInput::new(Side::Short, dec!(100), dec!(110), 10, dec!(85));
        let report = compute(&short);
        assert_eq!(report.one_r, dec!(10));
        assert_eq!(report.profit_per_unit, dec!(15));
        assert_eq!(report.sell, 4);
        assert_eq!(report.remaining, 6);
        assert_eq!(report.total_profit, dec!(150));
    }

    #[test]
    fn no_profit_means_no_instructions() {
        let losing = SizingInput::new(Side::Long, dec!(100), dec!(90), 10, dec!(95))
            .with_add_on_stop(dec!(105));
        let report = compute(&losing);
        assert_eq!(report.sell, 0);
        assert_eq!(report.add_on, 0);
        assert_eq!(report.remaining, 10);
        assert_eq!(report.total_profit, dec!(-50));
    }

    #[test]
    fn degenerate_prices_fall_back_to_zero() {
        let flat_stop = SizingInput::new(Side::Long, dec!(100), dec!(100), 10, dec!(120));
        let report = compute(&flat_stop);
        assert_eq!(report.profit_r, Decimal::ZERO);
        assert_eq!(report.sell_breakeven, 0);

        let zero_entry = SizingInput::new(Side::Long, Decimal::ZERO, dec!(-5), 10, dec!(3));
        assert_eq!(compute(&zero_entry).profit_pct, Decimal::ZERO);
    }

    #[test]
    fn add_on_protects_breakeven() {
        let report = compute(&default_form().with_add_on_stop(dec!(1000)));
        assert_eq!(report.theoretical_add_on, 320);
        assert_eq!(report.add_on, 320);
        assert_eq!(report.add_on_cost, dec!(432000));
        assert_eq!(report.add_on_floor_result, Decimal::ZERO);
    }

    #[test]
    fn add_on_respects_profit_goal() {
        let report = compute(
            &default_form()
                .with_profit_goal(dec!(100000))
                .with_add_on_stop(dec!(1000)),
        );
        assert_eq!(report.add_on, 34);
        assert_eq!(report.add_on_floor_result, dec!(100100));
    }

    #[test]
    fn add_on_disabled_when_stop_not_beyond_entry() {
        for stop in [dec!(680), dec!(600)] {
            let report = compute(&default_form().with_add_on_stop(stop));
            assert_eq!(report.add_on, 0);
            assert_eq!(report.theoretical_add_on, 0);
            assert_eq!(report.add_on_cost, Decimal::ZERO);
        }
    }

    #[test]
    fn add_on_disabled_when_stop_beyond_price() {
        let report = compute(&default_form().with_add_on_stop(dec!(1400)));
        assert_eq!(report.add_on, 0);
        let report = compute(&default_form().with_add_on_stop(dec!(1350)));
        assert_eq!(report.add_on, 0);
    }

    #[test]
    fn add_on_cap_policies() {
        let base = default_form().with_add_on_stop(dec!(1300));

        let uncapped = compute(&base.clone().with_add_on_cap(AddOnCapPolicy::Uncapped));
        assert_eq!(uncapped.theoretical_add_on, 4340);
        assert_eq!(uncapped.add_on, 4340);

        let one_to_one = compute(&base.clone());
        assert_eq!(one_to_one.add_on, 350);

        let doubled = compute(
            &base
                .with_add_on_cap(AddOnCapPolicy::DoubleOriginal)
                .with_add_on_basis(AddOnBasis::AfterSell),
        );
        assert_eq!(doubled.remaining, 335);
        assert_eq!(doubled.theoretical_add_on, 4154);
        assert_eq!(doubled.add_on, 365);
        // 335 * 620 - 365 * 50 + 15 * 670
        assert_eq!(doubled.add_on_floor_result, dec!(199500));
    }

    #[test]
    fn crash_after_add_on_counts_the_held_basis() {
        let base = default_form()
            .with_add_on_stop(dec!(1300))
            .with_add_on_cap(AddOnCapPolicy::DoubleOriginal);

        let after_sell = compute(&base.clone().with_add_on_basis(AddOnBasis::AfterSell));
        let per_unit = dec!(1350) - after_sell.crash.crash_price;
        assert_eq!(after_sell.remaining + after_sell.add_on, 700);
        assert_eq!(
            after_sell.crash.loss_after_add_on,
            per_unit * Decimal::from(after_sell.remaining + after_sell.add_on)
        );
        assert_eq!(after_sell.crash.loss_after_add_on, dec!(189000));

        let original = compute(&base);
        assert_eq!(original.add_on, 350);
        assert_eq!(original.crash.loss_after_add_on, dec!(189000));
    }

    #[test]
    fn locked_profit_breakdown() {
        let report = compute(&long_example().with_target_stop(dec!(105)));
        assert_eq!(report.locked_realized, dec!(60));
        assert_eq!(report.locked_potential, dec!(30));
        assert_eq!(report.locked_total, dec!(90));
        assert_eq!(report.no_sell_at_target_stop, dec!(50));
    }

    #[test]
    fn multiplier_scales_money_not_quantities() {
        let lots = compute(&long_example().with_unit_multiplier(dec!(1000)));
        assert_eq!(lots.sell, 4);
        assert_eq!(lots.total_profit, dec!(150000));
        assert_eq!(lots.no_sell_at_initial_stop, dec!(-100000));
        assert_eq!(lots.crash.loss_full, dec!(230000));
    }

    #[test]
    fn goal_is_money_under_multiplier() {
        // Locking 10,000 on lots of 1000: needs sell*15 - (10-sell)*10 >= 10 per-unit.
        let report = compute(
            &long_example()
                .with_unit_multiplier(dec!(1000))
                .with_profit_goal(dec!(10000)),
        );
        assert_eq!(report.sell_for_goal, 5);
        assert_eq!(report.sell, 5);
    }
}
