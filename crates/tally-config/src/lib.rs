//! # tally-config
//!
//! Layered configuration loading for tally using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TALLY_*` prefix, `__` as separator)
//! 2. Project-level `.tally/config.toml`
//! 3. User-level `~/.config/tally/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TALLY_TOGGL__API_TOKEN` -> `toggl.api_token`,
//! `TALLY_REPORT__OWNER` -> `report.owner`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use tally_config::TallyConfig;
//!
//! let config = TallyConfig::load().expect("config");
//! config.validate().expect("required settings present");
//!
//! if config.pivotal.is_configured() {
//!     println!("Pivotal project: {}", config.pivotal.project_id);
//! }
//! ```

mod error;
mod pivotal;
mod report;
mod toggl;

pub use error::ConfigError;
pub use pivotal::PivotalConfig;
pub use report::ReportConfig;
pub use toggl::TogglConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TallyConfig {
    #[serde(default)]
    pub toggl: TogglConfig,
    #[serde(default)]
    pub pivotal: PivotalConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl TallyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// `.env` files are not read here; the binary loads them first.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".tally/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("TALLY_").split("__"))
    }

    /// Check that every setting a report run needs is present.
    ///
    /// The Pivotal section is optional; without it enrichment is disabled.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] naming the first missing required
    /// key, or [`ConfigError::InvalidValue`] for a bad field list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.toggl.validate()?;
        self.report.validate()?;
        if self.pivotal.is_partially_configured() {
            self.pivotal.validate()?;
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tally").join("config.toml"))
    }
}

/// Accept ids written either as strings or bare integers.
///
/// Figment parses `TALLY_TOGGL__WORKSPACE_ID=777` as a number, and TOML users
/// write `workspace_id = 777` just as often as the quoted form.
pub(crate) fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(value) => value,
        Raw::Int(value) => value.to_string(),
    })
}

/// Fail with [`ConfigError::NotConfigured`] when `value` is empty.
pub(crate) fn require(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::NotConfigured {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_not_runnable() {
        let config = TallyConfig::default();
        assert!(!config.pivotal.is_configured());
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::NotConfigured { ref field } if field == "toggl.api_token")
        );
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = TallyConfig::figment();
        let config: TallyConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.report.sheet_name, "Toggl Export");
        assert_eq!(config.report.output_path, "toggl-export.xlsx");
    }

    #[test]
    fn validate_accepts_minimal_config() {
        let config = TallyConfig {
            toggl: TogglConfig {
                api_token: "tok".into(),
                workspace_id: "777".into(),
                ..Default::default()
            },
            report: ReportConfig {
                owner: "Ada".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_half_configured_pivotal() {
        let config = TallyConfig {
            toggl: TogglConfig {
                api_token: "tok".into(),
                workspace_id: "777".into(),
                ..Default::default()
            },
            pivotal: PivotalConfig {
                api_token: "pt".into(),
                ..Default::default()
            },
            report: ReportConfig {
                owner: "Ada".into(),
                ..Default::default()
            },
        };
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConfigError::NotConfigured { ref field } if field == "pivotal.project_id")
        );
    }

    #[test]
    fn require_rejects_blank_values() {
        assert!(require("report.owner", "  ").is_err());
        assert!(require("report.owner", "Ada").is_ok());
    }
}
