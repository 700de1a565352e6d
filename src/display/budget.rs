//! Budget display formatting

use super::report::{format_bar, format_percentage, separator};
use crate::config::Settings;
use crate::reports::BudgetProgressRow;

const BAR_WIDTH: usize = 20;

/// Budgets page: one line per row with a progress bar
///
/// Rows above the highlight threshold are marked with `!`; overspent rows
/// also get an `OVER` tag.
pub fn format_budget_progress(rows: &[BudgetProgressRow], settings: &Settings) -> String {
    if rows.is_empty() {
        return "No budgets.\n".to_string();
    }

    let symbol = &settings.currency_symbol;
    let mut output = String::new();
    output.push_str(&format!(
        "  {:<16} {:>12} {:>12} {:>12}  {:<20} {:>5}\n",
        "Category", "Budget", "Spent", "Remaining", "Progress", ""
    ));
    output.push_str(&separator(86));
    output.push('\n');

    for row in rows {
        let marker = if row.over_threshold { "!" } else { " " };
        let tag = if row.is_overspent() { " OVER" } else { "" };
        output.push_str(&format!(
            "{} {:<16} {:>12} {:>12} {:>12}  {} {:>5}{}\n",
            marker,
            row.category,
            row.budget.format_with_symbol(symbol),
            row.spent.format_with_symbol(symbol),
            row.remaining.format_with_symbol(symbol),
            format_bar(row.progress, 100.0, BAR_WIDTH),
            format_percentage(row.progress),
            tag
        ));
    }

    output
}

/// Dashboard chart: budget versus spent per category, in budget order
pub fn format_budget_chart(rows: &[BudgetProgressRow], settings: &Settings) -> String {
    let max = rows
        .iter()
        .map(|r| r.budget.max(r.spent).to_decimal())
        .fold(0.0_f64, f64::max);

    let mut output = String::new();
    for row in rows {
        output.push_str(&format!(
            "{:<16} budget {} {}\n{:<16} spent  {} {}\n",
            row.category,
            format_bar(row.budget.to_decimal(), max, BAR_WIDTH),
            row.budget.format_with_symbol(&settings.currency_symbol),
            "",
            format_bar(row.spent.to_decimal(), max, BAR_WIDTH),
            row.spent.format_with_symbol(&settings.currency_symbol),
        ));
    }
    output
}
