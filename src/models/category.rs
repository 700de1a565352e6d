//! Category labels
//!
//! Categories are plain strings. These lists drive input hints and the budgets
//! a fresh session starts with; unknown labels are still accepted.

use super::budget::Budget;
use super::transaction::TransactionKind;

/// Categories offered for expenses
pub const SPENDING_CATEGORIES: &[&str] = &[
    "Groceries",
    "Rent",
    "Transport",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Education",
    "Shopping",
    "Other",
];

/// Categories offered for income
pub const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investment", "Gift", "Other"];

/// Categories that get a (zeroed) budget in a fresh session, in display order
pub const DEFAULT_BUDGET_CATEGORIES: &[&str] = &[
    "Groceries",
    "Transport",
    "Entertainment",
    "Utilities",
    "Rent",
    "Other",
];

/// Zeroed budgets for every default category
pub fn default_budgets() -> Vec<Budget> {
    DEFAULT_BUDGET_CATEGORIES
        .iter()
        .map(|category| Budget::empty(*category))
        .collect()
}

/// The category list offered for a transaction kind
pub fn known_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => SPENDING_CATEGORIES,
    }
}
