//! JSON session snapshots
//!
//! A snapshot holds everything a session knows. Importing one yields the seed
//! for a fresh session.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Bill, Budget, QuickExpenseSetting, Transaction};
use crate::store::{FinanceStore, SeedData};

/// Current snapshot schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full session export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub bills: Vec<Bill>,
    pub quick_expenses: Vec<QuickExpenseSetting>,

    /// Export metadata
    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub budget_count: usize,
    pub bill_count: usize,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl SessionExport {
    /// Snapshot the current contents of a store
    pub fn from_store(store: &FinanceStore) -> BudgetwiseResult<Self> {
        Ok(Self::from_seed(store.to_seed()?))
    }

    pub fn from_seed(seed: SeedData) -> Self {
        let earliest_transaction = seed
            .transactions
            .iter()
            .map(|t| t.date)
            .min()
            .map(|d| d.format("%Y-%m-%d").to_string());

        let latest_transaction = seed
            .transactions
            .iter()
            .map(|t| t.date)
            .max()
            .map(|d| d.format("%Y-%m-%d").to_string());

        let metadata = ExportMetadata {
            transaction_count: seed.transactions.len(),
            budget_count: seed.budgets.len(),
            bill_count: seed.bills.len(),
            earliest_transaction,
            latest_transaction,
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions: seed.transactions,
            budgets: seed.budgets,
            bills: seed.bills,
            quick_expenses: seed.quick_expenses,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        self.to_seed().validate().map_err(|e| match e {
            BudgetwiseError::Validation(msg) => msg,
            other => other.to_string(),
        })
    }

    pub fn to_seed(&self) -> SeedData {
        SeedData {
            transactions: self.transactions.clone(),
            budgets: self.budgets.clone(),
            bills: self.bills.clone(),
            quick_expenses: self.quick_expenses.clone(),
        }
    }

    pub fn into_seed(self) -> SeedData {
        SeedData {
            transactions: self.transactions,
            budgets: self.budgets,
            bills: self.bills,
            quick_expenses: self.quick_expenses,
        }
    }
}

/// Export the session to JSON
pub fn export_session_json<W: Write>(
    store: &FinanceStore,
    writer: &mut W,
    pretty: bool,
) -> BudgetwiseResult<()> {
    let export = SessionExport::from_store(store)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BudgetwiseError::Export(e.to_string()))?;

    Ok(())
}

/// Parse and validate a JSON snapshot
pub fn import_from_json(json_str: &str) -> BudgetwiseResult<SessionExport> {
    let export: SessionExport =
        serde_json::from_str(json_str).map_err(|e| BudgetwiseError::Import(e.to_string()))?;

    export.validate().map_err(BudgetwiseError::Import)?;

    Ok(export)
}
