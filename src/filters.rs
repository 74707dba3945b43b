//! Money formatting for expense displays.
//!
//! Amounts arrive from the classification backend as plain dollar values and
//! are shown as `$` followed by the value with exactly two decimal places.
//! No thousands separators; the backend reports per-category totals, not
//! ledger-scale figures.

/// Format a dollar amount for display, e.g. `42.5` becomes `"$42.50"`.
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}
