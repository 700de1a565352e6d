//! Display formatting for terminal output
//!
//! Tables and progress bars for the CLI. Amounts use the configured currency
//! symbol and dates the configured format.

pub mod bill;
pub mod budget;
pub mod report;
pub mod transaction;

pub use bill::{format_bill_schedule, format_quick_expenses};
pub use budget::{format_budget_chart, format_budget_progress};
pub use transaction::{format_transaction_details, format_transaction_row, format_transaction_table};
