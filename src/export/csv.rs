//! CSV report export
//!
//! One file with three sections separated by blank rows: income, expenses and
//! a budget summary.

use std::io::Write;

use chrono::NaiveDate;

use crate::config::settings::check_date_format;
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Budget, Transaction, TransactionKind};
use crate::reports::budget_rows;

/// Default file name for a report generated on `date`
pub fn report_filename(date: NaiveDate) -> String {
    format!("budgetwise_report_{}.csv", date.format("%Y-%m-%d"))
}

/// Write the full report
///
/// Transactions keep their recorded order; budgets keep budget order. Dates
/// are rendered with `date_format` (strftime), which is checked before
/// anything is written.
pub fn write_report_csv<W: Write>(
    transactions: &[Transaction],
    budgets: &[Budget],
    date_format: &str,
    writer: &mut W,
) -> BudgetwiseResult<()> {
    check_date_format(date_format).map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    write_transaction_section(writer, "Income Report", transactions, TransactionKind::Income, date_format)?;
    writeln!(writer).map_err(export_err)?;
    write_transaction_section(writer, "Expense Report", transactions, TransactionKind::Expense, date_format)?;
    writeln!(writer).map_err(export_err)?;

    writeln!(writer, "Budget Summary").map_err(export_err)?;
    writeln!(writer, "Category,Budget,Spent,Remaining").map_err(export_err)?;
    for row in budget_rows(budgets, transactions) {
        writeln!(
            writer,
            "{},{},{},{}",
            escape_csv(&row.category),
            row.budget,
            row.spent,
            row.remaining
        )
        .map_err(export_err)?;
    }

    Ok(())
}

fn write_transaction_section<W: Write>(
    writer: &mut W,
    title: &str,
    transactions: &[Transaction],
    kind: TransactionKind,
    date_format: &str,
) -> BudgetwiseResult<()> {
    writeln!(writer, "{}", title).map_err(export_err)?;
    writeln!(writer, "Date,Description,Category,Amount").map_err(export_err)?;

    for txn in transactions.iter().filter(|t| t.kind == kind) {
        let date = txn.date.format(date_format).to_string();
        writeln!(
            writer,
            "{},{},{},{}",
            escape_csv(&date),
            escape_csv(&txn.description),
            escape_csv(&txn.category),
            txn.amount
        )
        .map_err(export_err)?;
    }
    Ok(())
}

fn export_err(e: std::io::Error) -> BudgetwiseError {
    BudgetwiseError::Export(e.to_string())
}

/// Escape a string for CSV format
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
