//! AI spending summary

use std::sync::Arc;

use tracing::{info, warn};

use super::provider::{BudgetLine, ExpenseLine, SpendingAnalyst, SpendingSummaryRequest};
use crate::error::BudgetwiseResult;
use crate::models::{Budget, Transaction};
use crate::notification::Notification;
use crate::reports::total_income;
use crate::store::FinanceStore;

/// Shown in place of the summary when the analyst fails
pub const SUMMARY_FALLBACK: &str = "Could not load AI-powered summary.";

pub struct SpendingSummarizer {
    analyst: Arc<dyn SpendingAnalyst>,
}

impl SpendingSummarizer {
    pub fn new(analyst: Arc<dyn SpendingAnalyst>) -> Self {
        Self { analyst }
    }

    pub fn build_request(budgets: &[Budget], transactions: &[Transaction]) -> SpendingSummaryRequest {
        SpendingSummaryRequest {
            income: total_income(transactions).to_decimal(),
            expenses: transactions
                .iter()
                .filter(|t| t.is_expense())
                .map(|t| ExpenseLine {
                    category: t.category.clone(),
                    amount: t.amount.to_decimal(),
                    date: t.date.to_rfc3339(),
                })
                .collect(),
            budgets: budgets
                .iter()
                .map(|b| BudgetLine {
                    category: b.category.clone(),
                    amount: b.amount.to_decimal(),
                })
                .collect(),
        }
    }

    /// Ask the analyst for a summary of the store's current data
    pub async fn summarize(&self, store: &FinanceStore) -> BudgetwiseResult<String> {
        let request = Self::build_request(&store.budgets()?, &store.transactions()?);
        info!(expenses = request.expenses.len(), "requesting spending summary");
        let summary = self.analyst.summarize_spending(&request).await?;
        Ok(summary.summary)
    }

    /// Like [`summarize`](Self::summarize), but never fails
    ///
    /// Any error yields [`SUMMARY_FALLBACK`] and queues an error notification.
    pub async fn summarize_or_fallback(&self, store: &FinanceStore) -> String {
        match self.summarize(store).await {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "spending summary failed");
                if let Err(notify_err) = store.notify(Notification::error(SUMMARY_FALLBACK)) {
                    warn!(error = %notify_err, "could not queue notification");
                }
                SUMMARY_FALLBACK.to_string()
            }
        }
    }
}
