//! # Application Configuration
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --db ./ayn.db                                                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     AYN_DB_PATH, AYN_PASSPHRASE, AYN_OPERATOR_NAME, AYN_OPERATOR_ROLE   │
//! │     AYN_AI_MODEL, API_KEY / GEMINI_API_KEY                             │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <path>, or ayn.toml in the platform config directory      │
//! │     ~/.config/ayn/ayn.toml (Linux)                                     │
//! │     ~/Library/Application Support/com.ayn.ayn/ayn.toml (macOS)         │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     passphrase "1234", operator "Admin Ayn" / "Gerente"                │
//! │     database in the platform data directory                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [database]
//! path = "/srv/kitchen/ayn.db"
//!
//! [operator]
//! passphrase = "4321"
//! name = "Chef Ana"
//! role = "Jefa de cocina"
//!
//! [ai]
//! model = "gemini-3-flash-preview"
//! ```
//!
//! Configuration is read once per invocation and never written back.

use ayn_assist::AssistConfig;
use ayn_core::session::PassphraseGate;
use ayn_core::{Session, DEFAULT_OPERATOR_NAME, DEFAULT_OPERATOR_ROLE, DEFAULT_PASSPHRASE};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};

const CONFIG_FILE_NAME: &str = "ayn.toml";
const DATABASE_FILE_NAME: &str = "ayn.db";

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database file. Default: `ayn.db` in the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// The single operator the passphrase unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorSettings {
    #[serde(default = "default_passphrase")]
    pub passphrase: String,

    #[serde(default = "default_operator_name")]
    pub name: String,

    #[serde(default = "default_operator_role")]
    pub role: String,
}

fn default_passphrase() -> String {
    DEFAULT_PASSPHRASE.to_string()
}

fn default_operator_name() -> String {
    DEFAULT_OPERATOR_NAME.to_string()
}

fn default_operator_role() -> String {
    DEFAULT_OPERATOR_ROLE.to_string()
}

impl Default for OperatorSettings {
    fn default() -> Self {
        OperatorSettings {
            passphrase: default_passphrase(),
            name: default_operator_name(),
            role: default_operator_role(),
        }
    }
}

// =============================================================================
// AppConfig
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub operator: OperatorSettings,

    #[serde(default)]
    pub ai: AssistConfig,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (an explicit `config_path` must exist)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(AppError::config(format!("Config file not found: {}", path.display())));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Applies process environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable lookup. Blank values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_blank("AYN_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = Some(PathBuf::from(path));
        }

        if let Some(passphrase) = non_blank("AYN_PASSPHRASE") {
            debug!("Passphrase taken from environment");
            self.operator.passphrase = passphrase;
        }

        if let Some(name) = non_blank("AYN_OPERATOR_NAME") {
            self.operator.name = name;
        }

        if let Some(role) = non_blank("AYN_OPERATOR_ROLE") {
            self.operator.role = role;
        }

        self.ai.apply_overrides_from(&lookup);
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.operator.passphrase.is_empty() {
            return Err(AppError::config("operator.passphrase must not be empty"));
        }
        if self.operator.name.trim().is_empty() {
            return Err(AppError::config("operator.name must not be empty"));
        }
        self.ai.validate()?;
        Ok(())
    }

    /// The login gate built from the operator section.
    pub fn gate(&self) -> PassphraseGate {
        PassphraseGate::new(
            self.operator.passphrase.clone(),
            Session {
                name: self.operator.name.clone(),
                role: self.operator.role.clone(),
            },
        )
    }

    /// Configured database path, or `ayn.db` in the platform data
    /// directory (created if missing).
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database.path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or_else(|| AppError::config("Could not determine app data directory"))?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "ayn", "ayn")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.operator.passphrase, "1234");
        assert_eq!(config.gate(), PassphraseGate::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_then_env() {
        let mut config: AppConfig = toml::from_str(
            r#"
            [database]
            path = "/tmp/kitchen.db"

            [operator]
            passphrase = "4321"

            [ai]
            model = "gemini-pro"
            "#,
        )
        .unwrap();

        assert_eq!(config.operator.name, "Admin Ayn");
        assert_eq!(config.ai.model, "gemini-pro");

        config.apply_overrides_from(lookup(&[
            ("AYN_PASSPHRASE", "0000"),
            ("AYN_OPERATOR_NAME", "Chef Ana"),
            ("AYN_DB_PATH", " "),
            ("GEMINI_API_KEY", "secret"),
        ]));

        assert_eq!(config.operator.passphrase, "0000");
        assert_eq!(config.operator.name, "Chef Ana");
        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/kitchen.db")));
        assert_eq!(config.ai.api_key.as_deref(), Some("secret"));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/kitchen.db"));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(dir.path().join("nope.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ayn.toml");
        std::fs::write(&path, "[operator]\nname = \"Chef Ana\"\nrole = \"Cocina\"\n").unwrap();

        let config = AppConfig::load(Some(path)).unwrap();
        assert_eq!(config.gate().operator().role, "Cocina");
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.operator.passphrase = String::new();
        assert!(config.validate().is_err());
    }
}
