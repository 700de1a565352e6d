//! Budget vs. spending aggregation
//!
//! Per-category spend, progress percentages and the budget overview shown on
//! the budgets page and in the CSV report.

use std::collections::BTreeMap;

use crate::models::{Budget, Money, Transaction, TransactionKind};

/// Progress above this percentage is highlighted
pub const HIGHLIGHT_THRESHOLD: f64 = 90.0;

/// Sum of expense amounts whose category matches exactly
pub fn spent_by_category(transactions: &[Transaction], category: &str) -> Money {
    transactions
        .iter()
        .filter(|t| t.kind == TransactionKind::Expense && t.category == category)
        .map(|t| t.amount)
        .sum()
}

/// Percentage of the budget spent, capped at 100
///
/// A zero budget always reports 0.0.
pub fn budget_progress(budget: &Budget, transactions: &[Transaction]) -> f64 {
    progress(budget.amount, spent_by_category(transactions, &budget.category))
}

fn progress(amount: Money, spent: Money) -> f64 {
    if !amount.is_positive() {
        return 0.0;
    }
    let pct = spent.cents() as f64 * 100.0 / amount.cents() as f64;
    pct.min(100.0)
}

/// Spend for every budget category, zero spend included
pub fn spending_habits(budgets: &[Budget], transactions: &[Transaction]) -> BTreeMap<String, Money> {
    budgets
        .iter()
        .map(|b| (b.category.clone(), spent_by_category(transactions, &b.category)))
        .collect()
}

/// Sum of all budget amounts
pub fn total_budgeted(budgets: &[Budget]) -> Money {
    budgets.iter().map(|b| b.amount).sum()
}

/// A row of the budget overview
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgressRow {
    pub category: String,
    pub budget: Money,
    pub spent: Money,
    /// Budget minus spent; negative when overspent
    pub remaining: Money,
    /// Percentage spent, 0-100
    pub progress: f64,
    /// Progress is above [`HIGHLIGHT_THRESHOLD`]
    pub over_threshold: bool,
}

impl BudgetProgressRow {
    fn new(budget: &Budget, transactions: &[Transaction]) -> Self {
        let spent = spent_by_category(transactions, &budget.category);
        let progress = progress(budget.amount, spent);
        Self {
            category: budget.category.clone(),
            budget: budget.amount,
            spent,
            remaining: budget.amount - spent,
            progress,
            over_threshold: progress > HIGHLIGHT_THRESHOLD,
        }
    }

    pub fn is_overspent(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Rows in budget order, one per budget
///
/// Used for the dashboard chart and the CSV budget summary.
pub fn budget_rows(budgets: &[Budget], transactions: &[Transaction]) -> Vec<BudgetProgressRow> {
    budgets
        .iter()
        .map(|b| BudgetProgressRow::new(b, transactions))
        .collect()
}

/// Budget Overview Report
#[derive(Debug, Clone)]
pub struct BudgetOverview {
    /// Rows sorted by spent descending; ties keep budget order
    pub rows: Vec<BudgetProgressRow>,
    pub total_budgeted: Money,
    pub total_spent: Money,
}

impl BudgetOverview {
    pub fn generate(budgets: &[Budget], transactions: &[Transaction]) -> Self {
        let mut rows = budget_rows(budgets, transactions);
        // sort_by is stable
        rows.sort_by(|a, b| b.spent.cmp(&a.spent));

        let total_budgeted = rows.iter().map(|r| r.budget).sum();
        let total_spent = rows.iter().map(|r| r.spent).sum();

        Self {
            rows,
            total_budgeted,
            total_spent,
        }
    }

    /// Get count of categories above the highlight threshold
    pub fn highlighted_count(&self) -> usize {
        self.rows.iter().filter(|r| r.over_threshold).count()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str("Budget Overview\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12} {:>9}\n",
            "Category", "Budget", "Spent", "Remaining", "Progress"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            let marker = if row.over_threshold { " *" } else { "" };
            output.push_str(&format!(
                "{:<20} {:>12} {:>12} {:>12} {:>8.0}%{}\n",
                row.category,
                row.budget.format_with_symbol(symbol),
                row.spent.format_with_symbol(symbol),
                row.remaining.format_with_symbol(symbol),
                row.progress,
                marker
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>12} {:>12} {:>12}\n",
            "TOTAL",
            self.total_budgeted.format_with_symbol(symbol),
            self.total_spent.format_with_symbol(symbol),
            (self.total_budgeted - self.total_spent).format_with_symbol(symbol),
        ));

        if self.highlighted_count() > 0 {
            output.push_str("\n* = over 90% spent\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use chrono::{TimeZone, Utc};

    fn expense(category: &str, units: i64) -> Transaction {
        let date = Utc.with_ymd_and_hms(2025, 2, 10, 0, 0, 0).unwrap();
        Transaction::from_input(NewTransaction::expense(
            category,
            Money::from_units(units),
            date,
            "test",
        ))
    }

    fn income(category: &str, units: i64) -> Transaction {
        let date = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        Transaction::from_input(NewTransaction::income(
            category,
            Money::from_units(units),
            date,
            "test",
        ))
    }

    #[test]
    fn test_budget_progress_partial_and_capped() {
        let transactions = vec![expense("Groceries", 200), expense("Groceries", 150), expense("Rent", 1500)];
        let groceries = Budget::new("Groceries", Money::from_units(600));
        let rent = Budget::new("Rent", Money::from_units(1500));

        let pct = budget_progress(&groceries, &transactions);
        assert!((pct - 58.33).abs() < 0.01, "got {}", pct);
        assert_eq!(budget_progress(&rent, &transactions), 100.0);
    }

    #[test]
    fn test_progress_never_exceeds_100() {
        let transactions = vec![expense("Groceries", 900)];
        let budget = Budget::new("Groceries", Money::from_units(600));
        assert_eq!(budget_progress(&budget, &transactions), 100.0);
    }

    #[test]
    fn test_zero_budget_progress_is_zero() {
        let transactions = vec![expense("Other", 40)];
        let budget = Budget::empty("Other");
        assert_eq!(budget_progress(&budget, &transactions), 0.0);
    }

    #[test]
    fn test_spent_by_category_ignores_income_and_other_categories() {
        let transactions = vec![
            expense("Groceries", 20),
            income("Groceries", 500),
            expense("groceries", 7),
            expense("Rent", 100),
        ];
        assert_eq!(spent_by_category(&transactions, "Groceries"), Money::from_units(20));
        assert!(spent_by_category(&transactions, "Travel").is_zero());
    }

    #[test]
    fn test_spending_habits_covers_every_budget() {
        let budgets = vec![Budget::empty("Groceries"), Budget::empty("Transport")];
        let transactions = vec![expense("Groceries", 25), expense("Shopping", 80)];

        let habits = spending_habits(&budgets, &transactions);
        assert_eq!(habits.len(), 2);
        assert_eq!(habits["Groceries"], Money::from_units(25));
        assert_eq!(habits["Transport"], Money::zero());
        assert!(!habits.contains_key("Shopping"));
    }

    #[test]
    fn test_overview_sorted_by_spent_with_stable_ties() {
        let budgets = vec![
            Budget::new("Utilities", Money::from_units(100)),
            Budget::new("Groceries", Money::from_units(600)),
            Budget::new("Transport", Money::from_units(100)),
            Budget::new("Rent", Money::from_units(1500)),
        ];
        let transactions = vec![expense("Groceries", 300), expense("Rent", 1500)];

        let overview = BudgetOverview::generate(&budgets, &transactions);
        let order: Vec<_> = overview.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(order, vec!["Rent", "Groceries", "Utilities", "Transport"]);

        assert_eq!(overview.total_budgeted, Money::from_units(2300));
        assert_eq!(overview.total_spent, Money::from_units(1800));
        assert!(overview.rows[0].over_threshold);
        assert!(!overview.rows[1].over_threshold);
        assert_eq!(overview.highlighted_count(), 1);
    }

    #[test]
    fn test_rows_keep_budget_order_and_remaining() {
        let budgets = vec![
            Budget::new("Transport", Money::from_units(50)),
            Budget::new("Groceries", Money::from_units(100)),
        ];
        let transactions = vec![expense("Transport", 80)];

        let rows = budget_rows(&budgets, &transactions);
        assert_eq!(rows[0].category, "Transport");
        assert_eq!(rows[0].remaining, Money::from_units(-30));
        assert!(rows[0].is_overspent());
        assert_eq!(rows[1].remaining, Money::from_units(100));
    }

    #[test]
    fn test_aggregations_are_idempotent() {
        let budgets = vec![Budget::new("Groceries", Money::from_units(600))];
        let transactions = vec![expense("Groceries", 350)];

        let first = BudgetOverview::generate(&budgets, &transactions);
        let second = BudgetOverview::generate(&budgets, &transactions);
        assert_eq!(first.rows, second.rows);
        assert_eq!(spending_habits(&budgets, &transactions), spending_habits(&budgets, &transactions));
    }

    #[test]
    fn test_terminal_format() {
        let budgets = vec![Budget::new("Groceries", Money::from_units(100))];
        let transactions = vec![expense("Groceries", 95)];

        let output = BudgetOverview::generate(&budgets, &transactions).format_terminal("$");
        assert!(output.contains("Budget Overview"));
        assert!(output.contains("Groceries"));
        assert!(output.contains("$95.00"));
        assert!(output.contains("* = over 90% spent"));
    }
}
