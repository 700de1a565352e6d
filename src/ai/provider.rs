//! Contracts for the hosted AI prompt service
//!
//! Request and response types are serialized camelCase, the shape the prompt
//! service expects. Amounts travel as plain JSON numbers.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BudgetwiseResult;

/// Input for a budget suggestion round-trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSuggestionRequest {
    pub income: f64,
    /// Ceiling the suggestions should stay below
    pub total_budget: f64,
    /// Spend per budget category, every budget category present
    pub spending_habits: BTreeMap<String, f64>,
}

/// Suggested amount per category, as returned by the provider
///
/// Values are unchecked; the reconciler rejects negative or non-finite ones.
pub type BudgetSuggestions = BTreeMap<String, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseLine {
    pub category: String,
    pub amount: f64,
    /// ISO-8601 date
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub category: String,
    pub amount: f64,
}

/// Input for a spending summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummaryRequest {
    pub income: f64,
    pub expenses: Vec<ExpenseLine>,
    pub budgets: Vec<BudgetLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingSummary {
    /// Two or three sentences of analysis
    pub summary: String,
    #[serde(default)]
    pub visualization_data: String,
}

/// Produces per-category budget suggestions
#[async_trait]
pub trait BudgetAdvisor: Send + Sync {
    async fn suggest_budgets(
        &self,
        request: &BudgetSuggestionRequest,
    ) -> BudgetwiseResult<BudgetSuggestions>;
}

/// Produces a short natural-language spending summary
#[async_trait]
pub trait SpendingAnalyst: Send + Sync {
    async fn summarize_spending(
        &self,
        request: &SpendingSummaryRequest,
    ) -> BudgetwiseResult<SpendingSummary>;
}
