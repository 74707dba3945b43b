//! Pure rendering of an expense breakdown into display-ready lines.
//!
//! Both the upload result and the dashboard show a breakdown through this
//! module, so the `"{category}: {amount}"` shape and the total line stay
//! consistent between the two panels.

use crate::filters::format_usd;
use crate::models::ExpenseBreakdown;

/// One `category: amount` display row.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryLine {
    pub category: String,
    pub amount: String,
}

/// A fully formatted summary: one line per category plus a grand total.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub lines: Vec<SummaryLine>,
    pub total: String,
}

/// Render a breakdown for display. Returns `None` when there is nothing to
/// show, so callers can substitute their own placeholder.
pub fn render(breakdown: &ExpenseBreakdown) -> Option<Summary> {
    if breakdown.is_empty() {
        return None;
    }
    let lines = breakdown
        .entries()
        .map(|(category, amount)| SummaryLine {
            category: category.to_string(),
            amount: format_usd(amount),
        })
        .collect();
    Some(Summary {
        lines,
        total: format_usd(breakdown.total()),
    })
}
