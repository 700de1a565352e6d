//! In-memory session store
//!
//! `FinanceStore` owns every transaction, budget, bill and quick expense of a
//! session. Nothing is written to disk; dropping the store discards the data.
//!
//! Each collection sits behind its own `RwLock` so readers can snapshot while
//! an async provider call is outstanding. Locks are never held across an
//! `.await`. Operations trust their input: form validation happens before the
//! store is called, and lookups that miss are silent no-ops.

mod seed;

pub use seed::SeedData;

use std::collections::BTreeMap;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{
    Bill, BillId, Budget, Money, NewBill, NewTransaction, QuickExpenseId, QuickExpenseSetting,
    Transaction,
};
use crate::notification::{Notification, NotificationQueue};

/// What a suggestion merge did to each budget category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Budgets whose amount was replaced, in budget order
    pub applied: Vec<String>,
    /// Budgets with no suggestion, left unchanged
    pub retained: Vec<String>,
    /// Suggested categories with no matching budget
    pub ignored: Vec<String>,
}

/// Main session store that provides access to all collections
pub struct FinanceStore {
    seed: SeedData,
    transactions: RwLock<Vec<Transaction>>,
    budgets: RwLock<Vec<Budget>>,
    bills: RwLock<Vec<Bill>>,
    quick_expenses: RwLock<Vec<QuickExpenseSetting>>,
    notifications: Mutex<NotificationQueue>,
}

impl Default for FinanceStore {
    fn default() -> Self {
        Self::from_seed(SeedData::default())
    }
}

impl FinanceStore {
    /// Create a store seeded with the default budgets and quick expenses
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a validated seed
    pub fn with_seed(seed: SeedData) -> BudgetwiseResult<Self> {
        seed.validate()?;
        Ok(Self::from_seed(seed))
    }

    fn from_seed(seed: SeedData) -> Self {
        Self {
            transactions: RwLock::new(seed.transactions.clone()),
            budgets: RwLock::new(seed.budgets.clone()),
            bills: RwLock::new(seed.bills.clone()),
            quick_expenses: RwLock::new(seed.quick_expenses.clone()),
            notifications: Mutex::new(NotificationQueue::new()),
            seed,
        }
    }

    // ----- reads -----

    /// Snapshot of all transactions in insertion order
    pub fn transactions(&self) -> BudgetwiseResult<Vec<Transaction>> {
        Ok(read(&self.transactions)?.clone())
    }

    /// Snapshot of all budgets in their display order
    pub fn budgets(&self) -> BudgetwiseResult<Vec<Budget>> {
        Ok(read(&self.budgets)?.clone())
    }

    /// Snapshot of all bills in insertion order
    pub fn bills(&self) -> BudgetwiseResult<Vec<Bill>> {
        Ok(read(&self.bills)?.clone())
    }

    pub fn quick_expenses(&self) -> BudgetwiseResult<Vec<QuickExpenseSetting>> {
        Ok(read(&self.quick_expenses)?.clone())
    }

    /// Current state in seed form (used for snapshot export)
    pub fn to_seed(&self) -> BudgetwiseResult<SeedData> {
        Ok(SeedData {
            transactions: self.transactions()?,
            budgets: self.budgets()?,
            bills: self.bills()?,
            quick_expenses: self.quick_expenses()?,
        })
    }

    /// Find a bill by full or short id
    pub fn find_bill(&self, identifier: &str) -> BudgetwiseResult<Option<Bill>> {
        Ok(read(&self.bills)?
            .iter()
            .find(|b| b.id.matches(identifier))
            .cloned())
    }

    /// Find a quick expense by id or case-insensitive name
    pub fn find_quick_expense(
        &self,
        identifier: &str,
    ) -> BudgetwiseResult<Option<QuickExpenseSetting>> {
        let quick_expenses = read(&self.quick_expenses)?;
        let found = quick_expenses
            .iter()
            .find(|q| q.id.matches(identifier))
            .or_else(|| {
                quick_expenses
                    .iter()
                    .find(|q| q.name.eq_ignore_ascii_case(identifier.trim()))
            })
            .cloned();
        Ok(found)
    }

    // ----- mutations -----

    /// Record a transaction under a fresh id
    pub fn add_transaction(&self, input: NewTransaction) -> BudgetwiseResult<Transaction> {
        let txn = Transaction::from_input(input);
        write(&self.transactions)?.push(txn.clone());
        debug!(id = %txn.id, kind = %txn.kind, category = %txn.category, amount = %txn.amount, "transaction added");
        Ok(txn)
    }

    /// Replace the amount of the budget for `category`
    ///
    /// Returns `false` (and changes nothing) when no budget has that category.
    pub fn update_budget(&self, category: &str, amount: Money) -> BudgetwiseResult<bool> {
        let mut budgets = write(&self.budgets)?;
        match budgets.iter_mut().find(|b| b.category == category) {
            Some(budget) => {
                debug!(category, from = %budget.amount, to = %amount, "budget updated");
                budget.amount = amount;
                Ok(true)
            }
            None => {
                debug!(category, "budget update ignored: unknown category");
                Ok(false)
            }
        }
    }

    /// Add an unpaid bill under a fresh id
    pub fn add_bill(&self, input: NewBill) -> BudgetwiseResult<Bill> {
        let bill = Bill::from_input(input);
        write(&self.bills)?.push(bill.clone());
        debug!(id = %bill.id, name = %bill.name, "bill added");
        Ok(bill)
    }

    /// Set the paid flag of a bill; returns `false` when the id is unknown
    pub fn set_bill_paid(&self, id: BillId, paid: bool) -> BudgetwiseResult<bool> {
        let mut bills = write(&self.bills)?;
        match bills.iter_mut().find(|b| b.id == id) {
            Some(bill) => {
                bill.paid = paid;
                debug!(id = %id, paid, "bill status changed");
                Ok(true)
            }
            None => {
                debug!(id = %id, "bill status change ignored: unknown id");
                Ok(false)
            }
        }
    }

    /// Zero every budget; transactions and bills are untouched
    pub fn reset_budgets(&self) -> BudgetwiseResult<()> {
        for budget in write(&self.budgets)?.iter_mut() {
            budget.amount = Money::zero();
        }
        debug!("budgets reset to zero");
        Ok(())
    }

    /// Restore every collection to the seed this store was created with
    pub fn reset_all(&self) -> BudgetwiseResult<()> {
        *write(&self.transactions)? = self.seed.transactions.clone();
        *write(&self.budgets)? = self.seed.budgets.clone();
        *write(&self.bills)? = self.seed.bills.clone();
        *write(&self.quick_expenses)? = self.seed.quick_expenses.clone();
        debug!("session reset to seed");
        Ok(())
    }

    /// Replace the quick expense templates
    pub fn set_quick_expenses(&self, quick_expenses: Vec<QuickExpenseSetting>) -> BudgetwiseResult<()> {
        debug!(count = quick_expenses.len(), "quick expenses replaced");
        *write(&self.quick_expenses)? = quick_expenses;
        Ok(())
    }

    /// Record the expense a quick expense template describes, dated now
    ///
    /// Returns `None` when the id is unknown.
    pub fn log_quick_expense(&self, id: QuickExpenseId) -> BudgetwiseResult<Option<Transaction>> {
        let template = read(&self.quick_expenses)?
            .iter()
            .find(|q| q.id == id)
            .cloned();

        match template {
            Some(template) => {
                let txn = self.add_transaction(template.to_transaction(Utc::now()))?;
                Ok(Some(txn))
            }
            None => {
                debug!(id = %id, "quick expense ignored: unknown id");
                Ok(None)
            }
        }
    }

    /// Merge suggested amounts into the existing budgets in one step
    ///
    /// Budget-driven: every budget whose category is a key in `suggestions`
    /// takes the suggested amount (zero included), every other budget keeps
    /// its amount, and suggested categories without a budget are ignored.
    pub fn apply_budget_suggestions(
        &self,
        suggestions: &BTreeMap<String, Money>,
    ) -> BudgetwiseResult<MergeReport> {
        let mut budgets = write(&self.budgets)?;
        let mut report = MergeReport::default();

        for budget in budgets.iter_mut() {
            match suggestions.get(&budget.category) {
                Some(amount) => {
                    budget.amount = *amount;
                    report.applied.push(budget.category.clone());
                }
                None => report.retained.push(budget.category.clone()),
            }
        }

        report.ignored = suggestions
            .keys()
            .filter(|category| !budgets.iter().any(|b| &b.category == *category))
            .cloned()
            .collect();

        debug!(
            applied = report.applied.len(),
            retained = report.retained.len(),
            ignored = report.ignored.len(),
            "budget suggestions merged"
        );
        Ok(report)
    }

    // ----- notifications -----

    /// Queue a user-visible notification
    pub fn notify(&self, notification: Notification) -> BudgetwiseResult<()> {
        self.notifications
            .lock()
            .map_err(|e| BudgetwiseError::Storage(format!("Failed to acquire lock: {}", e)))?
            .push(notification);
        Ok(())
    }

    /// Take all pending notifications, oldest first
    pub fn drain_notifications(&self) -> BudgetwiseResult<Vec<Notification>> {
        Ok(self
            .notifications
            .lock()
            .map_err(|e| BudgetwiseError::Storage(format!("Failed to acquire lock: {}", e)))?
            .drain())
    }
}

fn read<T>(lock: &RwLock<T>) -> BudgetwiseResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|e| BudgetwiseError::Storage(format!("Failed to acquire read lock: {}", e)))
}

fn write<T>(lock: &RwLock<T>) -> BudgetwiseResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|e| BudgetwiseError::Storage(format!("Failed to acquire write lock: {}", e)))
}
