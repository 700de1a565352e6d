//! Budget model
//!
//! A per-category spending ceiling. The category string is the key: a session
//! holds at most one budget per category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// A spending ceiling for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// The category this budget caps
    pub category: String,

    /// Ceiling for the current period (never negative)
    pub amount: Money,
}

impl Budget {
    pub fn new(category: impl Into<String>, amount: Money) -> Self {
        Self {
            category: category.into(),
            amount,
        }
    }

    /// A zeroed budget for a category
    pub fn empty(category: impl Into<String>) -> Self {
        Self::new(category, Money::zero())
    }

    /// Validate the budget amount
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        validate_budget_amount(self.amount)
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.amount)
    }
}

/// Form-level check for a budget edit
pub fn validate_budget_amount(amount: Money) -> Result<(), BudgetValidationError> {
    if amount.is_negative() {
        return Err(BudgetValidationError::NegativeBudget(amount));
    }
    Ok(())
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BudgetValidationError {
    #[error("Budget amount cannot be negative (got {0})")]
    NegativeBudget(Money),
}
