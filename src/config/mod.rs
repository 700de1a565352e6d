//! Configuration module for BudgetWise
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - AI prompt service settings

pub mod paths;
pub mod settings;

pub use paths::BudgetwisePaths;
pub use settings::{AiSettings, Settings};
