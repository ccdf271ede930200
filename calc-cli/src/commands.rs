//! Text rendering for each `calc` subcommand.
//!
//! Every function here returns what the binary prints, so the commands can be
//! tested without capturing stdout.

use anyhow::{Context, Result};
use calc_core::{
    NumberFormatter,
    calculations::{
        DiscountCalculator, DiscountInput, SplitBillCalculator, SplitBillInput, TipCalculator,
        TipInput,
    },
    engine::ERROR_TEXT,
    slider::Point,
};
use tracing::debug;

use crate::{keys::parse_key_sequence, state::AppState};

/// Feeds `sequence` to the session calculator and renders the display, with
/// the expression summary above it when there is one.
pub fn run_keys(
    state: &mut AppState,
    sequence: &str,
) -> Result<String> {
    let keys = parse_key_sequence(sequence)?;
    let recorded = state
        .press_keys(&keys)
        .context("failed to record calculation")?;
    debug!(keys = keys.len(), recorded, "applied key sequence");

    let calculator = state.calculator();
    let summary = calculator.expression_summary();
    if summary.is_empty() {
        Ok(calculator.display())
    } else {
        Ok(format!("{summary}\n{}", calculator.display()))
    }
}

/// Types `sequence` into a blank money-entry field and renders it as currency.
pub fn run_money_keys(
    state: &AppState,
    sequence: &str,
) -> Result<String> {
    let mut entry = state.money_entry();
    for key in parse_key_sequence(sequence)? {
        entry.press(key);
    }

    Ok(match entry.decimal_value() {
        Some(amount) => state.formatter().format_currency(amount),
        None => ERROR_TEXT.to_string(),
    })
}

pub fn tip(
    formatter: &NumberFormatter,
    input: &TipInput,
) -> Result<String> {
    let result = TipCalculator.calculate(input)?;

    Ok(render_rows(&[
        ("Tip", formatter.format_currency(result.tip)),
        ("Total", formatter.format_currency(result.total)),
    ]))
}

pub fn discount(
    formatter: &NumberFormatter,
    input: &DiscountInput,
) -> Result<String> {
    let result = DiscountCalculator.calculate(input)?;

    let mut rows = vec![
        ("You save", formatter.format_currency(result.savings)),
        ("Discounted", formatter.format_currency(result.discounted_price)),
    ];
    if input.sales_tax_percent.is_some() {
        rows.push(("Sales tax", formatter.format_currency(result.sales_tax)));
    }
    rows.push(("Final price", formatter.format_currency(result.final_price)));
    Ok(render_rows(&rows))
}

pub fn split(
    formatter: &NumberFormatter,
    input: &SplitBillInput,
) -> Result<String> {
    let result = SplitBillCalculator.calculate(input)?;

    let mut rows = Vec::new();
    if input.tip_percent.is_some() {
        rows.push(("Tip", formatter.format_currency(result.tip)));
        rows.push(("Grand total", formatter.format_currency(result.grand_total)));
    }
    rows.push(("Per person", formatter.format_currency(result.per_person)));

    let mut text = render_rows(&rows);
    // only worth listing when the cents do not divide evenly
    if result.shares.iter().any(|&share| share != result.per_person) {
        for (i, share) in result.shares.iter().enumerate() {
            text.push_str(&format!(
                "\n  person {:<3} {}",
                i + 1,
                formatter.format_currency(*share)
            ));
        }
    }
    Ok(text)
}

/// Drags the session slider through `points` and renders one line per point.
///
/// Points that commit a new value are marked with `*`, the spot where a GUI
/// would fire haptic feedback.
pub fn slider(
    state: &mut AppState,
    points: &[Point],
    arc_center: Point,
) -> String {
    let formatter = state.formatter().clone();
    let slider = state.slider_mut();
    let mut lines = Vec::with_capacity(points.len() + 1);

    slider.begin_drag();
    for point in points {
        let committed = slider.drag_to(*point, arc_center);
        lines.push(format!(
            "({}, {}) -> {:>6.1}° value {}{}",
            formatter.format(point.x),
            formatter.format(point.y),
            slider.angle().degrees(),
            formatter.format(slider.value()),
            if committed.is_some() { " *" } else { "" },
        ));
    }
    let value = slider.end_drag();

    lines.push(format!("final value {}", formatter.format(value)));
    lines.join("\n")
}

fn render_rows(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<width$}  {value}", format!("{label}:"), width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
