// src/render.rs
use crate::core::advisory::Advisory;
use crate::types::{SizingInput, SizingReport};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write;

/// Whole currency with thousands separators: -12345.6 -> "-$12,346".
pub fn money(value: Decimal) -> String {
    let rounded = value.round_dp(0);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a SizingInput,
    report: &'a SizingReport,
    advisories: Vec<String>,
}

pub fn json(input: &SizingInput, report: &SizingReport, advisories: &[Advisory]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        input,
        report,
        advisories: advisories.iter().map(ToString::to_string).collect(),
    })
}

/// Plain-text report, one section per instruction.
pub fn text(input: &SizingInput, report: &SizingReport, advisories: &[Advisory]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_text(&mut out, input, report, advisories);
    out
}

fn write_text(
    out: &mut String,
    input: &SizingInput,
    report: &SizingReport,
    advisories: &[Advisory],
) -> std::fmt::Result {
    writeln!(out, "== Position overview ({:?}) ==", input.side)?;
    writeln!(out, "Open profit:     {}", money(report.total_profit))?;
    writeln!(out, "Profit %:        {:.2}%", report.profit_pct)?;
    writeln!(out, "1R distance:     {:.2}", report.one_r)?;
    writeln!(out, "R-multiple:      {:.2} R", report.profit_r)?;
    writeln!(out)?;

    writeln!(out, "== 1. Partial close ==")?;
    writeln!(out, "Sell now:        {} units", report.sell)?;
    writeln!(out, "Remaining:       {} units", report.remaining)?;
    if input.profit_goal > Decimal::ZERO {
        writeln!(
            out,
            "Purpose:         keep {} if price returns to the initial stop {}",
            money(input.profit_goal),
            input.initial_stop
        )?;
    } else {
        writeln!(
            out,
            "Purpose:         break even if price returns to the initial stop {}",
            input.initial_stop
        )?;
    }
    writeln!(out)?;

    writeln!(out, "== 2. Add-on ==")?;
    match input.add_on_stop {
        Some(stop) => {
            writeln!(out, "Add now:         {} units", report.add_on)?;
            writeln!(out, "Theoretical max: {} units", report.theoretical_add_on)?;
            writeln!(out, "Cap policy:      {:?}", input.add_on_cap)?;
            writeln!(out, "Capital needed:  {}", money(report.add_on_cost))?;
            writeln!(out, "Result at {}:  {}", stop, money(report.add_on_floor_result))?;
        }
        None => writeln!(out, "Add-on disabled")?,
    }
    writeln!(out)?;

    writeln!(out, "== Locked profit vs. holding everything ==")?;
    writeln!(out, "Realized by selling {}: {}", report.sell, money(report.locked_realized))?;
    if let Some(target) = input.target_stop {
        writeln!(
            out,
            "Remaining {} held to {}: {}",
            report.remaining,
            target,
            money(report.locked_potential)
        )?;
        writeln!(out, "Guaranteed total: {}", money(report.locked_total))?;
    }
    writeln!(
        out,
        "No sell, back to initial stop {}: {}",
        input.initial_stop,
        money(report.no_sell_at_initial_stop)
    )?;
    if let Some(target) = input.target_stop {
        writeln!(
            out,
            "No sell, back to trailing stop {}: {}",
            target,
            money(report.no_sell_at_target_stop)
        )?;
    }
    writeln!(out)?;

    let crash = &report.crash;
    writeln!(
        out,
        "== Crash scenario ({}% adverse, price {}) ==",
        (crash.shock * Decimal::ONE_HUNDRED).normalize(),
        crash.crash_price.normalize()
    )?;
    writeln!(out, "Full position:   {}", money(-crash.loss_full))?;
    writeln!(out, "After sell:      {}", money(-crash.loss_after_sell))?;
    writeln!(out, "After add-on:    {}", money(-crash.loss_after_add_on))?;

    if !advisories.is_empty() {
        writeln!(out)?;
        writeln!(out, "== Notes ==")?;
        for advisory in advisories {
            let tag = if advisory.is_warning() { "!" } else { "+" };
            writeln!(out, "[{}] {}", tag, advisory)?;
        }
    }

    Ok(())
}
