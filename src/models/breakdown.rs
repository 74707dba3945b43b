use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum BreakdownError {
    #[error("category name is empty")]
    EmptyCategory,
    #[error("amount for '{category}' is not a usable expense value: {amount}")]
    InvalidAmount { category: String, amount: f64 },
}

/// Per-category expense totals, as returned by the classification backend.
///
/// Categories are kept in a sorted map so that iteration order, and therefore
/// rendering order, is stable across requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseBreakdown(BTreeMap<String, f64>);

impl ExpenseBreakdown {
    /// Validates a raw category-to-amount mapping. Category names must be
    /// non-blank and amounts must be finite and non-negative.
    pub fn from_map(map: BTreeMap<String, f64>) -> Result<Self, BreakdownError> {
        for (category, amount) in &map {
            if category.trim().is_empty() {
                return Err(BreakdownError::EmptyCategory);
            }
            if !amount.is_finite() || *amount < 0.0 {
                return Err(BreakdownError::InvalidAmount {
                    category: category.clone(),
                    amount: *amount,
                });
            }
        }
        Ok(Self(map))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Entries in ascending category order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(category, amount)| (category.as_str(), *amount))
    }

    pub fn amount(&self, category: &str) -> Option<f64> {
        self.0.get(category).copied()
    }

    /// Sum of all category amounts. Zero for an empty breakdown.
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }
}
