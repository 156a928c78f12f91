//! # thesis-config
//!
//! Layered configuration loading for the thesis workflow engine using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`THESIS_*` prefix, `__` as separator)
//! 2. Project-level `.thesis/config.toml`
//! 3. User-level `~/.config/thesis/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `THESIS_DATABASE__PATH` -> `database.path`,
//! `THESIS_WORKFLOW__EVALUATION_WINDOW_DAYS` -> `workflow.evaluation_window_days`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use thesis_config::ThesisConfig;
//!
//! let config = ThesisConfig::load_with_dotenv().expect("config");
//! println!("database at {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod workflow;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use workflow::WorkflowConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thesis_core::calendar::MAX_WINDOW_DAYS;
use thesis_core::schedule::MAX_DEFENSE_DURATION_MINUTES;

/// Env var prefix for every setting.
pub const ENV_PREFIX: &str = "THESIS_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ThesisConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl ThesisConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if [`Self::validate`] rejects the result.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".thesis/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject settings no workflow can run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("workflow.evaluation_window_days", self.workflow.evaluation_window_days),
            ("workflow.correction_window_days", self.workflow.correction_window_days),
            ("workflow.defense_duration_minutes", self.workflow.defense_duration_minutes),
            ("general.default_limit", self.general.default_limit),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(ConfigError::InvalidValue {
                field: (*field).to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        let bounded = [
            ("workflow.evaluation_window_days", self.workflow.evaluation_window_days, MAX_WINDOW_DAYS),
            ("workflow.correction_window_days", self.workflow.correction_window_days, MAX_WINDOW_DAYS),
            (
                "workflow.defense_duration_minutes",
                self.workflow.defense_duration_minutes,
                MAX_DEFENSE_DURATION_MINUTES,
            ),
        ];
        if let Some((field, _, max)) = bounded.iter().find(|(_, v, max)| v > max) {
            return Err(ConfigError::InvalidValue {
                field: (*field).to_string(),
                reason: format!("must be at most {max}"),
            });
        }
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.workflow.reviewer_role.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "workflow.reviewer_role".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("thesis").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ThesisConfig::default();
        config.validate().unwrap();
        assert_eq!(config.general.default_limit, 20);
        assert_eq!(config.workflow.evaluation_window_days, 15);
    }

    #[test]
    fn zero_window_is_rejected() {
        let mut config = ThesisConfig::default();
        config.workflow.evaluation_window_days = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "workflow.evaluation_window_days"
        ));
    }

    #[test]
    fn oversized_windows_are_rejected() {
        let mut config = ThesisConfig::default();
        config.workflow.evaluation_window_days = 100_000_000;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "workflow.evaluation_window_days"
        ));

        let mut config = ThesisConfig::default();
        config.workflow.correction_window_days = MAX_WINDOW_DAYS;
        config.validate().unwrap();
        config.workflow.defense_duration_minutes = MAX_DEFENSE_DURATION_MINUTES + 1;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "workflow.defense_duration_minutes"
        ));
    }

    #[test]
    fn blank_reviewer_role_is_rejected() {
        let mut config = ThesisConfig::default();
        config.workflow.reviewer_role = "  ".into();
        assert!(config.validate().is_err());
    }
}
