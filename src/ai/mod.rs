//! AI prompt service integration
//!
//! The provider contracts, their HTTP implementation, and the two flows
//! built on them: budget suggestion reconciliation and spending summaries.

pub mod http;
pub mod prompt;
pub mod provider;
pub mod reconciler;
pub mod summary;

pub use http::PromptServiceClient;
pub use provider::{
    BudgetAdvisor, BudgetLine, BudgetSuggestionRequest, BudgetSuggestions, ExpenseLine,
    SpendingAnalyst, SpendingSummary, SpendingSummaryRequest,
};
pub use reconciler::{BudgetReconciler, ReconcileOutcome};
pub use summary::{SpendingSummarizer, SUMMARY_FALLBACK};
