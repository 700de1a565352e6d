//! Transaction display formatting

use super::report::{separator, truncate};
use crate::config::Settings;
use crate::models::{Transaction, TransactionKind};

/// Format a single transaction as a table row
pub fn format_transaction_row(txn: &Transaction, settings: &Settings) -> String {
    let sign = match txn.kind {
        TransactionKind::Income => "+",
        TransactionKind::Expense => "-",
    };

    format!(
        "{:<10} {:<8} {:<24} {:<14} {:>1}{:>13}",
        txn.date.format(&settings.date_format),
        txn.kind,
        truncate(&txn.description, 24),
        truncate(&txn.category, 14),
        sign,
        txn.amount.format_with_symbol(&settings.currency_symbol)
    )
}

/// Format a list of transactions as a table
pub fn format_transaction_table(transactions: &[Transaction], settings: &Settings) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10} {:<8} {:<24} {:<14} {:>14}\n",
        "Date", "Type", "Description", "Category", "Amount"
    ));
    output.push_str(&separator(74));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, settings));
        output.push('\n');
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, settings: &Settings) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date.format(&settings.date_format)));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(&settings.currency_symbol)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));
    if !txn.description.is_empty() {
        output.push_str(&format!("Description: {}\n", txn.description));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, NewTransaction};
    use chrono::{TimeZone, Utc};

    fn sample() -> Transaction {
        Transaction::from_input(NewTransaction::expense(
            "Groceries",
            Money::from_cents(5000),
            Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap(),
            "Test Store",
        ))
    }

    #[test]
    fn test_format_transaction_row() {
        let formatted = format_transaction_row(&sample(), &Settings::default());
        assert!(formatted.contains("2025-01-15"));
        assert!(formatted.contains("Test Store"));
        assert!(formatted.contains("₹50.00"));
        assert!(formatted.contains("expense"));
    }

    #[test]
    fn test_format_empty_table() {
        let formatted = format_transaction_table(&[], &Settings::default());
        assert!(formatted.contains("No transactions found"));
    }

    #[test]
    fn test_format_transaction_details() {
        let settings = Settings {
            currency_symbol: "$".to_string(),
            ..Settings::default()
        };
        let formatted = format_transaction_details(&sample(), &settings);
        assert!(formatted.contains("Category:    Groceries"));
        assert!(formatted.contains("Amount:      $50.00"));
    }
}
