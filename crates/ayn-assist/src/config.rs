//! # Assist Configuration
//!
//! Which model to ask, where, and with what key.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     API_KEY or GEMINI_API_KEY                                          │
//! │     AYN_AI_MODEL=gemini-3-flash-preview                                │
//! │                                                                         │
//! │  2. `[ai]` table of ayn.toml (read by the CLI)                         │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     no key, gemini-3-flash-preview, public endpoint                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [ai]
//! api_key = "..."
//! model = "gemini-3-flash-preview"
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AssistError, AssistResult};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Settings for the Gemini client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistConfig {
    /// Without a key every call takes the fallback path immediately.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Overridable for proxies and tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for AssistConfig {
    fn default() -> Self {
        AssistConfig {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
        }
    }
}

impl AssistConfig {
    /// Applies process environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Applies overrides from any variable lookup.
    ///
    /// `API_KEY` wins over `GEMINI_API_KEY` when both are set. Blank values
    /// are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank("API_KEY").or_else(|| non_blank("GEMINI_API_KEY")) {
            debug!("AI API key taken from environment");
            self.api_key = Some(key);
        }

        if let Some(model) = non_blank("AYN_AI_MODEL") {
            debug!(model = %model, "Overriding AI model from environment");
            self.model = model;
        }
    }

    /// The key, or `MissingApiKey` when none is usable.
    pub fn require_api_key(&self) -> AssistResult<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(AssistError::MissingApiKey)
    }

    pub fn validate(&self) -> AssistResult<()> {
        if self.model.trim().is_empty() {
            return Err(AssistError::InvalidConfig("model must not be empty".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(AssistError::InvalidConfig(format!(
                "base_url must start with http:// or https://, got: {}",
                self.base_url
            )));
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.require_api_key().is_ok()
    }
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
        let config = AssistConfig::default();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert!(!config.has_api_key());
        assert!(matches!(config.require_api_key(), Err(AssistError::MissingApiKey)));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_precedence() {
        let mut config = AssistConfig::default();
        config.apply_overrides_from(lookup(&[("GEMINI_API_KEY", "g"), ("API_KEY", "a")]));
        assert_eq!(config.api_key.as_deref(), Some("a"));

        let mut config = AssistConfig::default();
        config.apply_overrides_from(lookup(&[("GEMINI_API_KEY", "g"), ("API_KEY", "  ")]));
        assert_eq!(config.api_key.as_deref(), Some("g"));

        config.apply_overrides_from(lookup(&[("AYN_AI_MODEL", "gemini-pro")]));
        assert_eq!(config.model, "gemini-pro");
    }

    #[test]
    fn test_partial_section_uses_defaults() {
        let config: AssistConfig = serde_json::from_str(r#"{"api_key": "k"}"#).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_validation() {
        let mut config = AssistConfig::default();
        config.base_url = "ftp://nope".to_string();
        assert!(config.validate().is_err());

        config.base_url = DEFAULT_BASE_URL.to_string();
        config.model = " ".to_string();
        assert!(config.validate().is_err());
    }
}
