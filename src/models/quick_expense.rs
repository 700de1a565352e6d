//! Quick expense templates
//!
//! A quick expense is a saved name/amount/category triple that records an
//! expense dated "now" with a single action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::QuickExpenseId;
use super::money::Money;
use super::transaction::NewTransaction;

/// Icon tag shown next to a quick expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuickExpenseIcon {
    #[default]
    Coffee,
    Utensils,
    Bus,
}

impl fmt::Display for QuickExpenseIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coffee => write!(f, "Coffee"),
            Self::Utensils => write!(f, "Utensils"),
            Self::Bus => write!(f, "Bus"),
        }
    }
}

impl FromStr for QuickExpenseIcon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "coffee" => Ok(Self::Coffee),
            "utensils" => Ok(Self::Utensils),
            "bus" => Ok(Self::Bus),
            other => Err(format!("unknown icon '{}': expected coffee, utensils or bus", other)),
        }
    }
}

/// A one-tap expense template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuickExpenseSetting {
    pub id: QuickExpenseId,
    pub name: String,
    pub amount: Money,
    pub category: String,
    #[serde(default)]
    pub icon: QuickExpenseIcon,
}

impl QuickExpenseSetting {
    pub fn new(
        name: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        icon: QuickExpenseIcon,
    ) -> Self {
        Self {
            id: QuickExpenseId::new(),
            name: name.into(),
            amount,
            category: category.into(),
            icon,
        }
    }

    /// The expense this template records when invoked at `now`
    pub fn to_transaction(&self, now: DateTime<Utc>) -> NewTransaction {
        NewTransaction::expense(self.category.clone(), self.amount, now, self.name.clone())
    }

    pub fn validate(&self) -> Result<(), QuickExpenseValidationError> {
        if self.name.trim().is_empty() {
            return Err(QuickExpenseValidationError::MissingName);
        }
        if !self.amount.is_positive() {
            return Err(QuickExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(QuickExpenseValidationError::MissingCategory);
        }
        Ok(())
    }
}

/// Validation errors for quick expense templates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuickExpenseValidationError {
    #[error("Name is required")]
    MissingName,
    #[error("Amount must be positive (got {0})")]
    NonPositiveAmount(Money),
    #[error("Category is required")]
    MissingCategory,
}

/// The templates a fresh session starts with
pub fn default_quick_expenses() -> Vec<QuickExpenseSetting> {
    vec![
        QuickExpenseSetting::new("Coffee", Money::from_units(150), "Groceries", QuickExpenseIcon::Coffee),
        QuickExpenseSetting::new("Lunch", Money::from_units(300), "Groceries", QuickExpenseIcon::Utensils),
        QuickExpenseSetting::new("Bus Fare", Money::from_units(50), "Transport", QuickExpenseIcon::Bus),
    ]
}
