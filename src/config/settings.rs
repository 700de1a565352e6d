//! User settings for BudgetWise
//!
//! Display preferences and the AI prompt service connection. Settings never
//! hold financial data.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::BudgetwisePaths;
use crate::error::BudgetwiseError;

/// Connection and tuning settings for the AI prompt service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Share of income used as the total budget ceiling when all budgets are zero
    #[serde(default = "default_fallback_ratio")]
    pub fallback_ratio: f64,

    /// Optional request timeout; no timeout when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            fallback_ratio: default_fallback_ratio(),
            timeout_secs: None,
        }
    }
}

/// User settings for BudgetWise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many transactions the dashboard lists as recent
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    /// AI prompt service settings
    #[serde(default)]
    pub ai: AiSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_recent_limit() -> usize {
    5
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "BUDGETWISE_AI_API_KEY".to_string()
}

fn default_fallback_ratio() -> f64 {
    0.8
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            recent_limit: default_recent_limit(),
            ai: AiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetwisePaths) -> Result<Self, BudgetwiseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                BudgetwiseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                BudgetwiseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetwisePaths) -> Result<(), BudgetwiseError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            BudgetwiseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            BudgetwiseError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Reject settings that would make the reconciler misbehave
    pub fn validate(&self) -> Result<(), BudgetwiseError> {
        let ratio = self.ai.fallback_ratio;
        if !ratio.is_finite() || ratio < 0.0 {
            return Err(BudgetwiseError::Config(format!(
                "ai.fallback_ratio must be a non-negative number, got {}",
                ratio
            )));
        }
        if self.ai.endpoint.trim().is_empty() {
            return Err(BudgetwiseError::Config("ai.endpoint must not be empty".into()));
        }
        check_date_format(&self.date_format)
    }
}

/// Reject strftime patterns chrono cannot render
pub fn check_date_format(format: &str) -> Result<(), BudgetwiseError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(BudgetwiseError::Config(format!(
            "date_format '{}' is not a valid strftime pattern",
            format
        )));
    }
    Ok(())
}
