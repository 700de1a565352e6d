//! Custom error types for BudgetWise
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for BudgetWise operations
#[derive(Error, Debug)]
pub enum BudgetwiseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// A budget suggestion request is already in flight
    #[error("Budget suggestions are already being generated")]
    Busy,

    /// The AI provider call failed
    #[error("AI provider error: {0}")]
    Provider(String),

    /// The AI provider answered with data that does not fit the contract
    #[error("Malformed AI response: {0}")]
    MalformedResponse(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// In-memory store errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BudgetwiseError {
    /// Create a "not found" error for bills
    pub fn bill_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Bill",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budget categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for quick expenses
    pub fn quick_expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Quick expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the AI provider boundary
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Provider(_) | Self::MalformedResponse(_))
    }
}

impl From<std::io::Error> for BudgetwiseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetwiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for BudgetwiseError {
    fn from(err: reqwest::Error) -> Self {
        Self::Provider(err.to_string())
    }
}

/// Result type alias for BudgetWise operations
pub type BudgetwiseResult<T> = Result<T, BudgetwiseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BudgetwiseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = BudgetwiseError::bill_not_found("bill-1234abcd");
        assert_eq!(err.to_string(), "Bill not found: bill-1234abcd");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_provider_failure_classification() {
        assert!(BudgetwiseError::Provider("timeout".into()).is_provider_failure());
        assert!(BudgetwiseError::MalformedResponse("not a map".into()).is_provider_failure());
        assert!(!BudgetwiseError::Busy.is_provider_failure());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BudgetwiseError = io_err.into();
        assert!(matches!(err, BudgetwiseError::Io(_)));
    }
}
