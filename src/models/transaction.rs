//! Transaction model
//!
//! A single recorded income or expense event. Transactions are immutable once
//! recorded; the only way to remove one is a full session reset.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Income or expense
    pub kind: TransactionKind,

    /// Category label; matched against budget categories by exact string
    pub category: String,

    /// Always positive; the kind carries the direction
    pub amount: Money,

    /// When the transaction happened
    pub date: DateTime<Utc>,

    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Materialize a new transaction with a fresh id
    pub fn from_input(input: NewTransaction) -> Self {
        Self {
            id: TransactionId::new(),
            kind: input.kind,
            category: input.category,
            amount: input.amount,
            date: input.date,
            description: input.description,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Input for recording a transaction (everything except the id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub category: String,
    pub amount: Money,
    pub date: DateTime<Utc>,
    pub description: String,
}

impl NewTransaction {
    pub fn income(
        category: impl Into<String>,
        amount: Money,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: TransactionKind::Income,
            category: category.into(),
            amount,
            date,
            description: description.into(),
        }
    }

    pub fn expense(
        category: impl Into<String>,
        amount: Money,
        date: DateTime<Utc>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind: TransactionKind::Expense,
            category: category.into(),
            amount,
            date,
            description: description.into(),
        }
    }

    /// Form-level validation, applied before the input reaches the store
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::MissingDescription);
        }
        Ok(())
    }
}

/// Validation errors for transaction input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionValidationError {
    #[error("Amount must be positive (got {0})")]
    NonPositiveAmount(Money),
    #[error("Category is required")]
    MissingCategory,
    #[error("Description is required")]
    MissingDescription,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_date() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_from_input_assigns_fresh_ids() {
        let input = NewTransaction::expense("Groceries", Money::from_units(350), test_date(), "Market");
        let a = Transaction::from_input(input.clone());
        let b = Transaction::from_input(input);

        assert_ne!(a.id, b.id);
        assert!(a.is_expense());
        assert_eq!(a.amount, Money::from_units(350));
    }

    #[test]
    fn test_validation() {
        let valid = NewTransaction::income("Salary", Money::from_units(100), test_date(), "pay");
        assert!(valid.validate().is_ok());

        let mut zero = valid.clone();
        zero.amount = Money::zero();
        assert!(matches!(
            zero.validate(),
            Err(TransactionValidationError::NonPositiveAmount(_))
        ));

        let mut no_category = valid.clone();
        no_category.category = "  ".into();
        assert_eq!(
            no_category.validate(),
            Err(TransactionValidationError::MissingCategory)
        );

        let mut no_description = valid;
        no_description.description = String::new();
        assert_eq!(
            no_description.validate(),
            Err(TransactionValidationError::MissingDescription)
        );
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&TransactionKind::Income).unwrap();
        assert_eq!(json, "\"income\"");
    }

    #[test]
    fn test_display() {
        let txn = Transaction::from_input(NewTransaction::expense(
            "Rent",
            Money::from_units(1500),
            test_date(),
            "January rent",
        ));
        assert_eq!(txn.to_string(), "2025-01-15 expense Rent 1500.00");
    }
}
