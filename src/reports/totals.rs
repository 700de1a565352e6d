//! Income, expense and balance totals

use crate::models::{Money, Transaction, TransactionKind};

/// Sum of all income amounts
pub fn total_income(transactions: &[Transaction]) -> Money {
    sum_kind(transactions, TransactionKind::Income)
}

/// Sum of all expense amounts
pub fn total_expenses(transactions: &[Transaction]) -> Money {
    sum_kind(transactions, TransactionKind::Expense)
}

/// Income minus expenses
pub fn balance(transactions: &[Transaction]) -> Money {
    total_income(transactions) - total_expenses(transactions)
}

fn sum_kind(transactions: &[Transaction], kind: TransactionKind) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// The three dashboard figures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialStats {
    pub income: Money,
    pub expenses: Money,
    pub balance: Money,
}

impl FinancialStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let income = total_income(transactions);
        let expenses = total_expenses(transactions);
        Self {
            income,
            expenses,
            balance: income - expenses,
        }
    }

    /// Format the figures for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        format!(
            "{:<16} {:>14}\n{:<16} {:>14}\n{:<16} {:>14}\n",
            "Total Income",
            self.income.format_with_symbol(symbol),
            "Total Expenses",
            self.expenses.format_with_symbol(symbol),
            "Balance",
            self.balance.format_with_symbol(symbol),
        )
    }
}
