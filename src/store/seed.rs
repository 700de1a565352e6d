//! Session seed data
//!
//! The state a session starts from and returns to on a full reset.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{
    default_budgets, default_quick_expenses, Bill, Budget, Money, QuickExpenseSetting, Transaction,
};

/// Initial contents of a [`FinanceStore`](super::FinanceStore)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default = "default_budgets")]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub bills: Vec<Bill>,
    #[serde(default = "default_quick_expenses")]
    pub quick_expenses: Vec<QuickExpenseSetting>,
}

impl Default for SeedData {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            budgets: default_budgets(),
            bills: Vec::new(),
            quick_expenses: default_quick_expenses(),
        }
    }
}

impl SeedData {
    /// Default seed with the given budgets instead of the zeroed defaults
    pub fn with_budgets(budgets: Vec<Budget>) -> Self {
        Self {
            budgets,
            ..Self::default()
        }
    }

    /// Check the invariants the aggregation code relies on
    ///
    /// Budget categories must be unique, budget amounts non-negative, and
    /// transaction, bill and quick expense amounts positive. The totals of
    /// each collection must stay within [`Money::MAX`].
    pub fn validate(&self) -> BudgetwiseResult<()> {
        let mut seen = HashSet::new();
        for budget in &self.budgets {
            if !seen.insert(budget.category.as_str()) {
                return Err(BudgetwiseError::Validation(format!(
                    "Duplicate budget category '{}'",
                    budget.category
                )));
            }
            budget.validate().map_err(|e| {
                BudgetwiseError::Validation(format!("Budget '{}': {}", budget.category, e))
            })?;
        }

        for txn in &self.transactions {
            if !txn.amount.is_positive() {
                return Err(BudgetwiseError::Validation(format!(
                    "Transaction {} has a non-positive amount",
                    txn.id
                )));
            }
        }

        for bill in &self.bills {
            if !bill.amount.is_positive() {
                return Err(BudgetwiseError::Validation(format!(
                    "Bill {} has a non-positive amount",
                    bill.id
                )));
            }
        }

        for quick in &self.quick_expenses {
            quick.validate().map_err(|e| {
                BudgetwiseError::Validation(format!("Quick expense '{}': {}", quick.name, e))
            })?;
        }

        check_total("budgets", self.budgets.iter().map(|b| b.amount))?;
        check_total("transactions", self.transactions.iter().map(|t| t.amount))?;
        check_total("bills", self.bills.iter().map(|b| b.amount))?;
        check_total("quick expenses", self.quick_expenses.iter().map(|q| q.amount))?;

        Ok(())
    }
}

fn check_total(section: &str, amounts: impl Iterator<Item = Money>) -> BudgetwiseResult<()> {
    Money::checked_total(amounts).map(|_| ()).ok_or_else(|| {
        BudgetwiseError::Validation(format!(
            "Total of {} exceeds {}",
            section,
            Money::MAX
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use chrono::Utc;

    #[test]
    fn test_default_seed_is_valid() {
        let seed = SeedData::default();
        assert!(seed.transactions.is_empty());
        assert_eq!(seed.budgets.len(), 6);
        assert_eq!(seed.quick_expenses.len(), 3);
        assert!(seed.validate().is_ok());
    }

    #[test]
    fn test_duplicate_budget_categories_rejected() {
        let seed = SeedData::with_budgets(vec![
            Budget::new("Groceries", Money::from_units(600)),
            Budget::new("Groceries", Money::from_units(100)),
        ]);
        let err = seed.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Duplicate budget category"));
    }

    #[test]
    fn test_amounts_that_would_overflow_totals_rejected() {
        let seed = SeedData::with_budgets(vec![
            Budget::new("Groceries", Money::MAX),
            Budget::new("Rent", Money::MAX),
        ]);
        let err = seed.validate().unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Total of budgets"));

        let mut seed = SeedData::default();
        let huge = Money::from_cents(i64::MAX / 2);
        for _ in 0..3 {
            seed.transactions.push(Transaction::from_input(NewTransaction::income(
                "Salary",
                huge,
                Utc::now(),
                "pay",
            )));
        }
        assert!(seed.validate().unwrap_err().to_string().contains("Total of transactions"));
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let seed: SeedData = serde_json::from_str("{}").unwrap();
        assert!(seed.transactions.is_empty());
        assert!(seed.bills.is_empty());
        assert_eq!(seed.budgets, default_budgets());
        assert_eq!(seed.quick_expenses.len(), 3);
    }
}
