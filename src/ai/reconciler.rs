//! Budget suggestion reconciler
//!
//! One round-trip: build a request from the store, ask the advisor, check the
//! answer, then merge it into the budgets in a single step. Either every
//! suggested amount lands or none does.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::provider::{BudgetAdvisor, BudgetSuggestionRequest, BudgetSuggestions};
use crate::error::{BudgetwiseError, BudgetwiseResult};
use crate::models::{Budget, Money, Transaction};
use crate::notification::Notification;
use crate::reports::{spending_habits, total_budgeted, total_income};
use crate::store::{FinanceStore, MergeReport};

pub const SUCCESS_TITLE: &str = "AI Budget Suggestions Applied";
pub const SUCCESS_MESSAGE: &str = "Your budgets have been updated with AI-powered suggestions.";
pub const FAILURE_TITLE: &str = "Error";
pub const FAILURE_MESSAGE: &str =
    "Could not generate AI budget suggestions. Please try again later.";

/// Share of income used as the ceiling when no budget is set
pub const DEFAULT_FALLBACK_RATIO: f64 = 0.8;

/// Result of a successful reconciliation
pub type ReconcileOutcome = MergeReport;

/// Clears the in-flight flag when dropped
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct BudgetReconciler {
    advisor: Arc<dyn BudgetAdvisor>,
    in_flight: AtomicBool,
    fallback_ratio: f64,
}

impl BudgetReconciler {
    pub fn new(advisor: Arc<dyn BudgetAdvisor>) -> Self {
        Self {
            advisor,
            in_flight: AtomicBool::new(false),
            fallback_ratio: DEFAULT_FALLBACK_RATIO,
        }
    }

    pub fn with_fallback_ratio(mut self, ratio: f64) -> Self {
        self.fallback_ratio = ratio;
        self
    }

    /// Whether a reconciliation is currently awaiting the advisor
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Build the advisor request from the current session data
    ///
    /// When every budget is zero the ceiling falls back to a share of income.
    pub fn build_request(
        &self,
        budgets: &[Budget],
        transactions: &[Transaction],
    ) -> BudgetSuggestionRequest {
        let income = total_income(transactions);
        let budgeted = total_budgeted(budgets);
        let total_budget = if budgeted.is_zero() {
            income.scale(self.fallback_ratio)
        } else {
            budgeted
        };

        BudgetSuggestionRequest {
            income: income.to_decimal(),
            total_budget: total_budget.to_decimal(),
            spending_habits: spending_habits(budgets, transactions)
                .into_iter()
                .map(|(category, spent)| (category, spent.to_decimal()))
                .collect(),
        }
    }

    /// Ask for suggestions and merge them into the store's budgets
    ///
    /// Rejected with [`BudgetwiseError::Busy`] while another call is
    /// outstanding. On any advisor or validation failure the budgets are left
    /// untouched, an error notification is queued and the error returned.
    pub async fn reconcile(&self, store: &FinanceStore) -> BudgetwiseResult<ReconcileOutcome> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("budget suggestion request rejected: one is already in flight");
            return Err(BudgetwiseError::Busy);
        }
        let _guard = InFlightGuard(&self.in_flight);

        let budgets = store.budgets()?;
        let request = self.build_request(&budgets, &store.transactions()?);
        info!(
            income = request.income,
            total_budget = request.total_budget,
            categories = request.spending_habits.len(),
            "requesting budget suggestions"
        );

        let result = match self.advisor.suggest_budgets(&request).await {
            Ok(suggestions) => validate_suggestions(&suggestions, &budgets),
            Err(e) => Err(e),
        };

        let suggestions = match result {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!(error = %e, "budget suggestions failed; budgets unchanged");
                store.notify(Notification::error(FAILURE_MESSAGE).with_title(FAILURE_TITLE))?;
                return Err(e);
            }
        };

        let report = store.apply_budget_suggestions(&suggestions)?;
        for category in &report.ignored {
            warn!(category = %category, "ignoring suggestion for unknown category");
        }
        info!(
            applied = report.applied.len(),
            retained = report.retained.len(),
            "budget suggestions applied"
        );
        store.notify(Notification::success(SUCCESS_MESSAGE).with_title(SUCCESS_TITLE))?;

        Ok(report)
    }
}

/// Convert provider numbers to money, rejecting the whole answer on any bad value
///
/// Besides per-value checks, the budgets as they would stand after the merge
/// must total no more than [`Money::MAX`].
fn validate_suggestions(
    suggestions: &BudgetSuggestions,
    budgets: &[Budget],
) -> BudgetwiseResult<BTreeMap<String, Money>> {
    let converted: BTreeMap<String, Money> = suggestions
        .iter()
        .map(|(category, value)| {
            if !value.is_finite() || *value < 0.0 {
                return Err(BudgetwiseError::MalformedResponse(format!(
                    "Suggestion for '{}' is not a non-negative amount: {}",
                    category, value
                )));
            }
            let amount = Money::from_decimal(*value).ok_or_else(|| {
                BudgetwiseError::MalformedResponse(format!(
                    "Suggestion for '{}' is out of range: {}",
                    category, value
                ))
            })?;
            Ok((category.clone(), amount))
        })
        .collect::<BudgetwiseResult<_>>()?;

    let suggested = Money::checked_total(converted.values().copied());
    let retained = Money::checked_total(
        budgets
            .iter()
            .filter(|b| !converted.contains_key(&b.category))
            .map(|b| b.amount),
    );
    let merged = suggested
        .zip(retained)
        .and_then(|(s, r)| Money::checked_total([s, r]));
    if merged.is_none() {
        return Err(BudgetwiseError::MalformedResponse(format!(
            "Suggested budgets total more than {}",
            Money::MAX
        )));
    }

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::notification::NotificationType;
    use crate::reports::BudgetOverview;
    use crate::store::SeedData;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Returns a canned answer and records every request
    struct StubAdvisor {
        answer: BudgetwiseResult<BudgetSuggestions>,
        delay: Option<Duration>,
        requests: Mutex<Vec<BudgetSuggestionRequest>>,
    }

    impl StubAdvisor {
        fn answering(pairs: &[(&str, f64)]) -> Self {
            Self {
                answer: Ok(pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()),
                delay: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                answer: Err(BudgetwiseError::Provider("connection refused".into())),
                delay: None,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn slow(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }
    }

    #[async_trait]
    impl BudgetAdvisor for StubAdvisor {
        async fn suggest_budgets(
            &self,
            request: &BudgetSuggestionRequest,
        ) -> BudgetwiseResult<BudgetSuggestions> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            match &self.answer {
                Ok(suggestions) => Ok(suggestions.clone()),
                Err(e) => Err(BudgetwiseError::Provider(e.to_string())),
            }
        }
    }

    fn date() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 2, 0, 0, 0).unwrap()
    }

    fn store(budgets: &[(&str, i64)]) -> FinanceStore {
        let budgets = budgets
            .iter()
            .map(|(category, units)| Budget::new(*category, Money::from_units(*units)))
            .collect();
        FinanceStore::with_seed(SeedData::with_budgets(budgets)).unwrap()
    }

    fn amounts(store: &FinanceStore) -> Vec<(String, Money)> {
        store
            .budgets()
            .unwrap()
            .into_iter()
            .map(|b| (b.category, b.amount))
            .collect()
    }

    #[test]
    fn test_request_uses_income_fallback_when_budgets_are_zero() {
        let store = store(&[("Groceries", 0), ("Transport", 0)]);
        store
            .add_transaction(NewTransaction::income("Salary", Money::from_units(5000), date(), "pay"))
            .unwrap();
        store
            .add_transaction(NewTransaction::expense("Groceries", Money::from_units(350), date(), "food"))
            .unwrap();

        let reconciler = BudgetReconciler::new(Arc::new(StubAdvisor::answering(&[])));
        let request = reconciler.build_request(&store.budgets().unwrap(), &store.transactions().unwrap());

        assert_eq!(request.income, 5000.0);
        assert_eq!(request.total_budget, 4000.0);
        assert_eq!(request.spending_habits.len(), 2);
        assert_eq!(request.spending_habits["Groceries"], 350.0);
        assert_eq!(request.spending_habits["Transport"], 0.0);
    }

    #[test]
    fn test_request_uses_budget_sum_when_set() {
        let store = store(&[("Groceries", 600), ("Rent", 1500)]);
        let reconciler = BudgetReconciler::new(Arc::new(StubAdvisor::answering(&[])))
            .with_fallback_ratio(0.5);
        let request = reconciler.build_request(&store.budgets().unwrap(), &[]);
        assert_eq!(request.total_budget, 2100.0);
        assert_eq!(request.income, 0.0);
    }

    #[tokio::test]
    async fn test_reconcile_merges_and_notifies() {
        let store = store(&[("Groceries", 600), ("Rent", 1500), ("Other", 100)]);
        let advisor = Arc::new(StubAdvisor::answering(&[
            ("Groceries", 550.0),
            ("Other", 0.0),
            ("Travel", 300.0),
        ]));
        let reconciler = BudgetReconciler::new(advisor.clone());

        let outcome = reconciler.reconcile(&store).await.unwrap();

        assert_eq!(outcome.applied, vec!["Groceries".to_string(), "Other".to_string()]);
        assert_eq!(outcome.retained, vec!["Rent".to_string()]);
        assert_eq!(outcome.ignored, vec!["Travel".to_string()]);
        assert_eq!(
            amounts(&store),
            vec![
                ("Groceries".to_string(), Money::from_units(550)),
                ("Rent".to_string(), Money::from_units(1500)),
                ("Other".to_string(), Money::zero()),
            ]
        );

        let notifications = store.drain_notifications().unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].notification_type, NotificationType::Success);
        assert_eq!(notifications[0].title, SUCCESS_TITLE);
        assert_eq!(advisor.requests.lock().unwrap().len(), 1);
        assert!(!reconciler.is_busy());
    }

    #[tokio::test]
    async fn test_provider_failure_leaves_budgets_unchanged() {
        let store = store(&[("Groceries", 600), ("Rent", 1500)]);
        let before = amounts(&store);
        let reconciler = BudgetReconciler::new(Arc::new(StubAdvisor::failing()));

        let err = reconciler.reconcile(&store).await.unwrap_err();
        assert!(err.is_provider_failure());
        assert_eq!(amounts(&store), before);

        let notifications = store.drain_notifications().unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0].is_error());
        assert_eq!(notifications[0].message, FAILURE_MESSAGE);
        assert!(!reconciler.is_busy());
    }

    #[tokio::test]
    async fn test_negative_suggestion_rejects_whole_answer() {
        let store = store(&[("Groceries", 600), ("Rent", 1500)]);
        let before = amounts(&store);
        let reconciler = BudgetReconciler::new(Arc::new(StubAdvisor::answering(&[
            ("Groceries", 500.0),
            ("Rent", -10.0),
        ])));

        let err = reconciler.reconcile(&store).await.unwrap_err();
        assert!(matches!(err, BudgetwiseError::MalformedResponse(_)));
        assert_eq!(amounts(&store), before);
        assert!(store.drain_notifications().unwrap()[0].is_error());
    }

    #[tokio::test]
    async fn test_second_call_while_in_flight_is_busy() {
        let store = store(&[("Groceries", 600)]);
        let reconciler = BudgetReconciler::new(Arc::new(
            StubAdvisor::answering(&[("Groceries", 450.0)]).slow(Duration::from_millis(100)),
        ));

        let (first, second) = tokio::join!(reconciler.reconcile(&store), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            reconciler.reconcile(&store).await
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(BudgetwiseError::Busy)));
        assert_eq!(store.budgets().unwrap()[0].amount, Money::from_units(450));
        assert!(!reconciler.is_busy());
    }

    #[tokio::test]
    async fn test_flag_cleared_after_failure_allows_retry() {
        let store = store(&[("Groceries", 600)]);
        let failing = BudgetReconciler::new(Arc::new(StubAdvisor::failing()));
        assert!(failing.reconcile(&store).await.is_err());
        assert!(!failing.is_busy());
        assert!(matches!(
            failing.reconcile(&store).await,
            Err(BudgetwiseError::Provider(_))
        ));
    }

    #[test]
    fn test_validate_suggestions() {
        let mut ok = BudgetSuggestions::new();
        ok.insert("Rent".to_string(), 1234.567);
        let converted = validate_suggestions(&ok, &[]).unwrap();
        assert_eq!(converted["Rent"], Money::from_cents(123457));

        let mut bad = BudgetSuggestions::new();
        bad.insert("Rent".to_string(), f64::NAN);
        assert!(validate_suggestions(&bad, &[]).is_err());
    }

    #[test]
    fn test_validate_suggestions_bounds_merged_total() {
        let retained = [Budget::new("Rent", Money::MAX)];
        let mut suggestions = BudgetSuggestions::new();
        suggestions.insert("Groceries".to_string(), 1.0);
        let err = validate_suggestions(&suggestions, &retained).unwrap_err();
        assert!(matches!(err, BudgetwiseError::MalformedResponse(_)));

        // Replacing the large budget keeps the total in range
        suggestions.insert("Rent".to_string(), 10.0);
        assert!(validate_suggestions(&suggestions, &retained).is_ok());
    }

    #[tokio::test]
    async fn test_oversized_suggestions_rejected_and_aggregation_still_works() {
        let store = store(&[("Groceries", 600), ("Rent", 1500)]);
        let before = amounts(&store);
        let reconciler = BudgetReconciler::new(Arc::new(StubAdvisor::answering(&[
            ("Groceries", 5e13),
            ("Rent", 5e13),
        ])));

        let err = reconciler.reconcile(&store).await.unwrap_err();
        assert!(matches!(err, BudgetwiseError::MalformedResponse(_)));
        assert_eq!(amounts(&store), before);
        assert!(store.drain_notifications().unwrap()[0].is_error());

        let overview = BudgetOverview::generate(&store.budgets().unwrap(), &store.transactions().unwrap());
        assert_eq!(overview.total_budgeted, Money::from_units(2100));

        let per_value = BudgetReconciler::new(Arc::new(StubAdvisor::answering(&[("Groceries", 5e16)])));
        assert!(matches!(
            per_value.reconcile(&store).await,
            Err(BudgetwiseError::MalformedResponse(_))
        ));
    }
}
