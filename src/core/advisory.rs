// src/core/advisory.rs
use crate::types::{SizingInput, SizingReport};
use rust_decimal::Decimal;
use std::fmt;

/// Hints for whoever displays a report. None of these stop a calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Advisory {
    NoProfit,
    StopOnWrongSide,
    AddOnStopNotProfitable,
    AddOnStopBeyondPrice,
    GoalUnreachable { goal: Decimal, best: Decimal },
    AddOnProtected { floor: Decimal, surplus: Decimal },
    /// Floor-rounded sizing keeps the add-on result at or above the floor, so
    /// this only fires if that sizing and the reported result ever disagree.
    AddOnShortfall { floor: Decimal, shortfall: Decimal },
}

impl Advisory {
    /// Warnings need attention; the rest are informational.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Advisory::AddOnProtected { .. })
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::NoProfit => write!(f, "Position is not in profit: nothing to sell or add"),
            Advisory::StopOnWrongSide => {
                write!(f, "Initial stop is on the profitable side of entry")
            }
            Advisory::AddOnStopNotProfitable => {
                write!(f, "Add-on stop must lie beyond entry on the profitable side")
            }
            Advisory::AddOnStopBeyondPrice => {
                write!(f, "Add-on stop is already past the current price")
            }
            Advisory::GoalUnreachable { goal, best } => write!(
                f,
                "Profit goal {} cannot be locked: selling everything realizes {}",
                goal.round_dp(0),
                best.round_dp(0)
            ),
            Advisory::AddOnProtected { floor, surplus } => write!(
                f,
                "If the add-on stop is hit the account still keeps {} plus {} extra",
                floor.round_dp(0),
                surplus.round_dp(0)
            ),
            Advisory::AddOnShortfall { floor, shortfall } => write!(
                f,
                "If the add-on stop is hit the account falls {} short of {}",
                shortfall.round_dp(0),
                floor.round_dp(0)
            ),
        }
    }
}

pub fn advise(input: &SizingInput, report: &SizingReport) -> Vec<Advisory> {
    let sign = input.side.sign();
    let mut advisories = Vec::new();

    if report.profit_per_unit <= Decimal::ZERO {
        advisories.push(Advisory::NoProfit);
    }
    if (input.initial_stop - input.entry_price) * sign > Decimal::ZERO {
        advisories.push(Advisory::StopOnWrongSide);
    }

    if input.profit_goal > Decimal::ZERO
        && report.profit_per_unit > Decimal::ZERO
        && report.remaining == 0
        && report.locked_realized < input.profit_goal
    {
        advisories.push(Advisory::GoalUnreachable {
            goal: input.profit_goal,
            best: report.locked_realized,
        });
    }

    if let Some(add_on_stop) = input.add_on_stop {
        if (add_on_stop - input.entry_price) * sign <= Decimal::ZERO {
            advisories.push(Advisory::AddOnStopNotProfitable);
        } else if (input.current_price - add_on_stop) * sign <= Decimal::ZERO {
            advisories.push(Advisory::AddOnStopBeyondPrice);
        } else if report.add_on > 0 {
            let floor = input.profit_goal;
            let surplus = report.add_on_floor_result - floor;
            if surplus >= Decimal::ZERO {
                advisories.push(Advisory::AddOnProtected { floor, surplus });
            } else {
                advisories.push(Advisory::AddOnShortfall {
                    floor,
                    shortfall: surplus.abs(),
                });
            }
        }
    }

    advisories
}
