//! BudgetWise - personal finance tracker
//!
//! Records income and expenses, compares spending against per-category
//! budgets, keeps bill reminders and one-tap quick expenses, exports a CSV
//! report, and asks an AI prompt service for budget suggestions and spending
//! summaries. All financial data lives in memory for one session.
//!
//! # Architecture
//!
//! - `models`: transactions, budgets, bills, quick expenses, money and ids
//! - `store`: the in-memory session store and its seed
//! - `reports`: pure aggregation (totals, budget progress, views)
//! - `ai`: prompt service contracts, HTTP client, reconciler and summarizer
//! - `notification`: user-visible toast queue
//! - `export`: CSV report and JSON/YAML session snapshots
//! - `display`, `cli`: terminal presentation
//! - `config`, `error`: settings, paths and the error type
//!
//! # Example
//!
//! ```rust
//! use budgetwise::models::{Money, NewTransaction};
//! use budgetwise::reports::balance;
//! use budgetwise::store::FinanceStore;
//!
//! let store = FinanceStore::new();
//! store
//!     .add_transaction(NewTransaction::income("Salary", Money::from_units(100), chrono::Utc::now(), "pay"))
//!     .unwrap();
//! assert_eq!(balance(&store.transactions().unwrap()), Money::from_units(100));
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod notification;
pub mod reports;
pub mod store;

pub use error::{BudgetwiseError, BudgetwiseResult};
