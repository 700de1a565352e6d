//! Reports module for BudgetWise
//!
//! Pure aggregation over session data: totals, budget progress, the budget
//! overview and the transaction and bill views.

pub mod budget;
pub mod totals;
pub mod views;

pub use budget::{
    budget_progress, budget_rows, spending_habits, spent_by_category, total_budgeted,
    BudgetOverview, BudgetProgressRow, HIGHLIGHT_THRESHOLD,
};
pub use totals::{balance, total_expenses, total_income, FinancialStats};
pub use views::{
    bill_schedule, filter_transactions, recent_transactions, sort_transactions, transaction_view,
    BillSchedule, SortDirection, SortKey, TransactionFilter, TransactionSort,
};
