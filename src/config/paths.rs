//! Path management for BudgetWise
//!
//! Only configuration lives on disk; financial data is session-only.
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETWISE_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/budgetwise` or `~/.config/budgetwise`
//! 3. Windows: `%APPDATA%\budgetwise`

use std::path::PathBuf;

use crate::error::BudgetwiseError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "BUDGETWISE_CONFIG_DIR";

/// Manages all paths used by BudgetWise
#[derive(Debug, Clone)]
pub struct BudgetwisePaths {
    base_dir: PathBuf,
}

impl BudgetwisePaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BudgetwiseError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create BudgetwisePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the configuration directory exists
    pub fn ensure_directories(&self) -> Result<(), BudgetwiseError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            BudgetwiseError::Io(format!("Failed to create config directory: {}", e))
        })?;
        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, BudgetwiseError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => PathBuf::from(xdg),
        Err(_) => {
            let home = std::env::var("HOME").map_err(|_| {
                BudgetwiseError::Config("HOME environment variable not set".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("budgetwise"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, BudgetwiseError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| BudgetwiseError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("budgetwise"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetwisePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(CONFIG_DIR_ENV, custom_path);
        let paths = BudgetwisePaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());
        env::remove_var(CONFIG_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("nested").join("budgetwise");
        let paths = BudgetwisePaths::with_base_dir(nested.clone());

        paths.ensure_directories().unwrap();
        assert!(nested.exists());
    }
}
