//! Configuration management for the DIME planner Lambda.

use std::env;

/// Model used when `GEMINI_MODEL` is unset or empty.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Gemini REST endpoint used when `GEMINI_API_BASE` is unset.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Shared secret expected in `x-api-key`; `None` disables the check
    pub api_key: Option<String>,
    /// Gemini credential
    pub gemini_api_key: Option<String>,
    /// Secrets Manager ARN holding the Gemini credential
    pub gemini_api_key_secret_arn: Option<String>,
    /// Gemini model identifier
    pub gemini_model: String,
    /// Gemini API base URL
    pub gemini_api_base: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            api_key: non_empty("PC_API_KEY"),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            gemini_api_key_secret_arn: non_empty("GEMINI_API_KEY_SECRET_ARN"),
            gemini_model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: non_empty("GEMINI_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        }
    }

    /// Whether the Gemini credential still has to come from Secrets Manager.
    pub fn needs_secret_lookup(&self) -> bool {
        self.gemini_api_key.is_none() && self.gemini_api_key_secret_arn.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert!(config.api_key.is_none());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
        assert_eq!(config.gemini_api_base, DEFAULT_API_BASE);
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let config = config_from(&[("PC_API_KEY", ""), ("GEMINI_MODEL", ""), ("GEMINI_API_KEY", "")]);
        assert!(config.api_key.is_none());
        assert!(config.gemini_api_key.is_none());
        assert_eq!(config.gemini_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("PC_API_KEY", "s3cret"),
            ("GEMINI_API_KEY", "gk"),
            ("GEMINI_MODEL", "gemini-2.5-pro"),
            ("GEMINI_API_BASE", "http://localhost:9000/"),
        ]);
        assert_eq!(config.api_key.as_deref(), Some("s3cret"));
        assert_eq!(config.gemini_api_key.as_deref(), Some("gk"));
        assert_eq!(config.gemini_model, "gemini-2.5-pro");
        assert_eq!(config.gemini_api_base, "http://localhost:9000");
    }

    #[test]
    fn test_secret_lookup_only_without_direct_key() {
        let config = config_from(&[("GEMINI_API_KEY_SECRET_ARN", "arn:aws:secretsmanager:x")]);
        assert!(config.needs_secret_lookup());

        let config = config_from(&[
            ("GEMINI_API_KEY", "gk"),
            ("GEMINI_API_KEY_SECRET_ARN", "arn:aws:secretsmanager:x"),
        ]);
        assert!(!config.needs_secret_lookup());
    }
}
