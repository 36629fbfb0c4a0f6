//! Query configuration.
//!
//! Settings can be read from the `[query]` table of a `yocoma.toml` document
//! and overridden through environment variables:
//!
//! | Variable                   | Setting             |
//! |----------------------------|---------------------|
//! | `YOCOMA_TEXT_MATCH`        | `text_match`        |
//! | `YOCOMA_DEFAULT_PAGE_SIZE` | `default_page_size` |
//! | `YOCOMA_MAX_PAGE_SIZE`     | `max_page_size`     |
//!
//! ```rust
//! use yocoma_query::config::{QueryConfig, TextMatch};
//!
//! let config = QueryConfig::from_toml_str(r#"
//!     [query]
//!     text_match = "ignore_case"
//!     default_page_size = 50
//! "#).unwrap();
//!
//! assert_eq!(config.text_match, TextMatch::IgnoreCase);
//! assert_eq!(config.default_page_size, 50);
//! assert_eq!(config.max_page_size, 2000);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{QueryError, QueryResult};

/// How `contains` and `doesNotContain` compare text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextMatch {
    /// Byte-exact substring match.
    #[default]
    CaseSensitive,
    /// Substring match after Unicode lowercasing both sides.
    IgnoreCase,
}

impl TextMatch {
    /// Whether `haystack` contains `needle` under this policy.
    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::CaseSensitive => haystack.contains(needle),
            Self::IgnoreCase => haystack.to_lowercase().contains(&needle.to_lowercase()),
        }
    }

    /// Name used in configuration and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CaseSensitive => "case_sensitive",
            Self::IgnoreCase => "ignore_case",
        }
    }
}

impl fmt::Display for TextMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextMatch {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "case_sensitive" | "sensitive" => Ok(Self::CaseSensitive),
            "ignore_case" | "insensitive" => Ok(Self::IgnoreCase),
            other => Err(QueryError::invalid_configuration(format!(
                "Unknown text match policy '{}', expected case_sensitive or ignore_case",
                other
            ))),
        }
    }
}

/// Settings shared by the predicate builder and the parameter parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryConfig {
    /// Case policy for text containment.
    #[serde(default)]
    pub text_match: TextMatch,
    /// Page size used when a request names none.
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    /// Largest page size a request may ask for.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    2000
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            text_match: TextMatch::default(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    query: Option<QueryConfig>,
}

impl QueryConfig {
    /// Parse the `[query]` table of a TOML document. A missing table yields defaults.
    pub fn from_toml_str(content: &str) -> QueryResult<Self> {
        let file: ConfigFile = toml::from_str(content)?;
        let config = file.query.unwrap_or_default();
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> QueryResult<Self> {
        Self::default().with_env(&StdEnvSource)
    }

    /// Apply overrides from an environment source.
    pub fn with_env(mut self, env: &impl EnvSource) -> QueryResult<Self> {
        if let Some(value) = env.get("YOCOMA_TEXT_MATCH") {
            self.text_match = value.parse()?;
        }
        if let Some(value) = env.get("YOCOMA_DEFAULT_PAGE_SIZE") {
            self.default_page_size = parse_size("YOCOMA_DEFAULT_PAGE_SIZE", &value)?;
        }
        if let Some(value) = env.get("YOCOMA_MAX_PAGE_SIZE") {
            self.max_page_size = parse_size("YOCOMA_MAX_PAGE_SIZE", &value)?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that page sizes are usable.
    pub fn validate(&self) -> QueryResult<()> {
        if self.default_page_size == 0 || self.max_page_size == 0 {
            return Err(QueryError::invalid_configuration("Page sizes must be positive"));
        }
        if self.default_page_size > self.max_page_size {
            return Err(QueryError::invalid_configuration(format!(
                "default_page_size ({}) exceeds max_page_size ({})",
                self.default_page_size, self.max_page_size
            )));
        }
        Ok(())
    }
}

fn parse_size(name: &str, value: &str) -> QueryResult<u64> {
    value.trim().parse().map_err(|_| {
        QueryError::invalid_configuration(format!("{} must be a positive integer, got '{}'", name, value))
    })
}

/// Source for environment variables.
pub trait EnvSource: Send + Sync {
    /// Get an environment variable value.
    fn get(&self, name: &str) -> Option<String>;
}

/// Environment source backed by `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdEnvSource;

impl EnvSource for StdEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Environment source backed by a map, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MapEnvSource {
    vars: HashMap<String, String>,
}

impl MapEnvSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl EnvSource for MapEnvSource {
    fn get(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_defaults() {
        let config = QueryConfig::default();
        assert_eq!(config.text_match, TextMatch::CaseSensitive);
        assert_eq!(config.default_page_size, 20);
        assert_eq!(config.max_page_size, 2000);
    }

    #[test]
    fn test_missing_table_uses_defaults() {
        let config = QueryConfig::from_toml_str("[other]\nkey = 1\n").unwrap();
        assert_eq!(config, QueryConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = QueryConfig::from_toml_str("[query]\npage = 3\n").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfiguration);
    }

    #[test]
    fn test_env_overrides() {
        let env = MapEnvSource::new()
            .set("YOCOMA_TEXT_MATCH", "ignore_case")
            .set("YOCOMA_DEFAULT_PAGE_SIZE", "5")
            .set("YOCOMA_MAX_PAGE_SIZE", "10");
        let config = QueryConfig::default().with_env(&env).unwrap();
        assert_eq!(config.text_match, TextMatch::IgnoreCase);
        assert_eq!(config.default_page_size, 5);
        assert_eq!(config.max_page_size, 10);
    }

    #[test]
    fn test_env_invalid_size() {
        let env = MapEnvSource::new().set("YOCOMA_MAX_PAGE_SIZE", "lots");
        let err = QueryConfig::default().with_env(&env).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidConfiguration);
    }

    #[test]
    fn test_default_exceeding_max_rejected() {
        let env = MapEnvSource::new().set("YOCOMA_DEFAULT_PAGE_SIZE", "5000");
        assert!(QueryConfig::default().with_env(&env).is_err());
    }

    #[test]
    fn test_text_match_policies() {
        assert!(TextMatch::CaseSensitive.contains("Annabel", "nab"));
        assert!(!TextMatch::CaseSensitive.contains("Annabel", "ANN"));
        assert!(TextMatch::IgnoreCase.contains("Annabel", "ANN"));
        assert!(TextMatch::CaseSensitive.contains("anything", ""));
    }
}
