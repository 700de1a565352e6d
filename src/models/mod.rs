//! Core data models for BudgetWise
//!
//! This module contains all the data structures that represent the personal
//! finance domain: transactions, budgets, bills and quick expense templates.

pub mod bill;
pub mod budget;
pub mod category;
pub mod ids;
pub mod money;
pub mod quick_expense;
pub mod transaction;

pub use bill::{Bill, BillValidationError, NewBill};
pub use budget::{validate_budget_amount, Budget, BudgetValidationError};
pub use category::{
    default_budgets, known_categories, DEFAULT_BUDGET_CATEGORIES, INCOME_CATEGORIES, SPENDING_CATEGORIES,
};
pub use ids::{BillId, QuickExpenseId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use quick_expense::{default_quick_expenses, QuickExpenseIcon, QuickExpenseSetting, QuickExpenseValidationError};
pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionValidationError};
