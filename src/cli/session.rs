//! A running CLI session
//!
//! Bundles the in-memory store with settings and the AI flows. One-shot
//! commands build a session, run, and drop it; `shell` keeps one alive.

use std::sync::Arc;

use crate::ai::{BudgetAdvisor, BudgetReconciler, PromptServiceClient, SpendingAnalyst, SpendingSummarizer};
use crate::config::{BudgetwisePaths, Settings};
use crate::error::BudgetwiseResult;
use crate::notification::Notification;
use crate::store::{FinanceStore, SeedData};

pub struct Session {
    pub store: FinanceStore,
    pub settings: Settings,
    pub paths: BudgetwisePaths,
    pub reconciler: BudgetReconciler,
    pub summarizer: SpendingSummarizer,
    /// Whether the AI providers can be reached with credentials
    pub ai_available: bool,
}

impl Session {
    /// Start a session talking to the configured prompt service
    pub fn new(paths: BudgetwisePaths, settings: Settings, seed: SeedData) -> BudgetwiseResult<Self> {
        let client = Arc::new(PromptServiceClient::new(&settings.ai)?);
        let ai_available = client.has_api_key();
        let mut session = Self::with_providers(paths, settings, seed, client.clone(), client)?;
        session.ai_available = ai_available;
        Ok(session)
    }

    pub fn with_providers(
        paths: BudgetwisePaths,
        settings: Settings,
        seed: SeedData,
        advisor: Arc<dyn BudgetAdvisor>,
        analyst: Arc<dyn SpendingAnalyst>,
    ) -> BudgetwiseResult<Self> {
        let store = FinanceStore::with_seed(seed)?;
        let reconciler = BudgetReconciler::new(advisor).with_fallback_ratio(settings.ai.fallback_ratio);
        let summarizer = SpendingSummarizer::new(analyst);

        Ok(Self {
            store,
            settings,
            paths,
            reconciler,
            summarizer,
            ai_available: true,
        })
    }

    /// Take pending notifications for display
    pub fn take_notifications(&self) -> BudgetwiseResult<Vec<Notification>> {
        self.store.drain_notifications()
    }

    /// Print and clear pending notifications
    pub fn print_notifications(&self) -> BudgetwiseResult<()> {
        for notification in self.take_notifications()? {
            println!("{}", notification);
        }
        Ok(())
    }
}
