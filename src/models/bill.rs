//! Bill reminder model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BillId;
use super::money::Money;

/// A scheduled payment obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub name: String,
    pub amount: Money,
    pub due_date: DateTime<Utc>,
    #[serde(default)]
    pub paid: bool,
}

impl Bill {
    /// Materialize a new, unpaid bill with a fresh id
    pub fn from_input(input: NewBill) -> Self {
        Self {
            id: BillId::new(),
            name: input.name,
            amount: input.amount,
            due_date: input.due_date,
            paid: false,
        }
    }

    /// Whether the bill is unpaid and its due date has passed
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.paid && self.due_date < now
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.paid { "paid" } else { "due" };
        write!(
            f,
            "{} {} {} ({})",
            self.name,
            self.amount,
            self.due_date.format("%Y-%m-%d"),
            status
        )
    }
}

/// Input for adding a bill reminder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBill {
    pub name: String,
    pub amount: Money,
    pub due_date: DateTime<Utc>,
}

impl NewBill {
    pub fn new(name: impl Into<String>, amount: Money, due_date: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            amount,
            due_date,
        }
    }

    pub fn validate(&self) -> Result<(), BillValidationError> {
        if self.name.trim().is_empty() {
            return Err(BillValidationError::MissingName);
        }
        if !self.amount.is_positive() {
            return Err(BillValidationError::NonPositiveAmount(self.amount));
        }
        Ok(())
    }
}

/// Validation errors for bill input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BillValidationError {
    #[error("Bill name is required")]
    MissingName,
    #[error("Amount must be positive (got {0})")]
    NonPositiveAmount(Money),
}
