//! Filtered and sorted views over transactions and bills
//!
//! Views never reorder their input; every function returns a new `Vec`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::{Bill, Transaction, TransactionKind};

/// Which transactions to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => txn.kind == TransactionKind::Income,
            Self::Expense => txn.kind == TransactionKind::Expense,
        }
    }
}

impl FromStr for TransactionFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "income" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            other => Err(format!("Unknown filter '{}'", other)),
        }
    }
}

/// Column a transaction list is sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Description,
    Category,
    Amount,
    Kind,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "description" => Ok(Self::Description),
            "category" => Ok(Self::Category),
            "amount" => Ok(Self::Amount),
            "kind" | "type" => Ok(Self::Kind),
            other => Err(format!("Unknown sort key '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!("Unknown sort direction '{}'", other)),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
            Self::Descending => write!(f, "desc"),
        }
    }
}

/// A sort column plus direction; defaults to newest first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for TransactionSort {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Descending,
        }
    }
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Description => a.description.cmp(&b.description),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Kind => a.kind.cmp(&b.kind),
    }
}

/// Transactions matching `filter`, in input order
pub fn filter_transactions(transactions: &[Transaction], filter: TransactionFilter) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect()
}

/// Stable sort by one column
///
/// Equal keys keep their input order in both directions.
pub fn sort_transactions(
    transactions: &[Transaction],
    key: SortKey,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    match direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| compare(a, b, key)),
        SortDirection::Descending => sorted.sort_by(|a, b| compare(b, a, key)),
    }
    sorted
}

/// Filter, then sort
pub fn transaction_view(
    transactions: &[Transaction],
    filter: TransactionFilter,
    sort: TransactionSort,
) -> Vec<Transaction> {
    let filtered = filter_transactions(transactions, filter);
    sort_transactions(&filtered, sort.key, sort.direction)
}

/// The `limit` newest transactions
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut recent = sort_transactions(transactions, SortKey::Date, SortDirection::Descending);
    recent.truncate(limit);
    recent
}

/// Bills split by paid status, each list ordered by due date
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillSchedule {
    pub upcoming: Vec<Bill>,
    pub paid: Vec<Bill>,
}

pub fn bill_schedule(bills: &[Bill]) -> BillSchedule {
    let mut sorted = bills.to_vec();
    sorted.sort_by(|a, b| a.due_date.cmp(&b.due_date));

    let (paid, upcoming): (Vec<Bill>, Vec<Bill>) = sorted.into_iter().partition(|b| b.paid);
    BillSchedule { upcoming, paid }
}
