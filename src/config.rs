//! Runtime configuration.
//!
//! Settings come from built-in defaults, optionally replaced by a JSON file,
//! and finally by command line flags and environment variables.
//!
//! # Examples
//!
//! ```
//! use pulse::config::PulseConfig;
//!
//! let config = PulseConfig::default();
//! assert_eq!(config.top_k, 5);
//! assert_eq!(config.window_days, 30);
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{PulseError, Result};
use crate::news::article::SORT_BY_RELEVANCY;
use crate::news::client::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use crate::news::window::{DEFAULT_FLOOR_YEAR, DEFAULT_WINDOW_DAYS, SearchWindow};
use crate::ranking::DEFAULT_TOP_K;

/// Default description length, in grapheme clusters.
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 200;

/// Settings for a Pulse run.
///
/// Missing fields in a config file take their default values.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    /// Article search endpoint.
    pub endpoint: String,

    /// News API key. Never serialized.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Two-letter language filter.
    pub language: String,

    /// Upstream sort order.
    pub sort_by: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Number of ranked articles shown.
    pub top_k: usize,

    /// Look-back window in days.
    pub window_days: u32,

    /// Window starts before this year are clamped to January 1.
    pub floor_year: i32,

    /// Maximum description length in the human output.
    pub description_limit: usize,
}

impl Default for PulseConfig {
    fn default() -> Self {
        PulseConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            language: "en".to_string(),
            sort_by: SORT_BY_RELEVANCY.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            top_k: DEFAULT_TOP_K,
            window_days: DEFAULT_WINDOW_DAYS,
            floor_year: DEFAULT_FLOOR_YEAR,
            description_limit: DEFAULT_DESCRIPTION_LIMIT,
        }
    }
}

impl PulseConfig {
    /// Load a configuration file in JSON format.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            PulseError::config(format!("Cannot read config file {}: {e}", path.display()))
        })?;
        let config: PulseConfig = serde_json::from_str(&content).map_err(|e| {
            PulseError::config(format!("Invalid config file {}: {e}", path.display()))
        })?;

        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(PulseError::config("endpoint must not be empty"));
        }
        if self.top_k == 0 {
            return Err(PulseError::config("top_k must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(PulseError::config("timeout_secs must be at least 1"));
        }
        Ok(())
    }

    /// The API key, or a configuration error naming where to set it.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                PulseError::config(
                    "News API key is missing; set NEWS_API_KEY, pass --api-key or add api_key to the config file",
                )
            })
    }

    /// The per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The search window ending today.
    pub fn window(&self) -> SearchWindow {
        SearchWindow::current(self.window_days, self.floor_year)
    }
}

impl fmt::Debug for PulseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PulseConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("language", &self.language)
            .field("sort_by", &self.sort_by)
            .field("timeout_secs", &self.timeout_secs)
            .field("top_k", &self.top_k)
            .field("window_days", &self.window_days)
            .field("floor_year", &self.floor_year)
            .field("description_limit", &self.description_limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = PulseConfig::default();
        assert_eq!(config.endpoint, "https://newsapi.org/v2/everything");
        assert_eq!(config.language, "en");
        assert_eq!(config.sort_by, "relevancy");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.floor_year, 2026);
        assert_eq!(config.description_limit, 200);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"top_k": 3, "language": "de", "api_key": "abc"}}"#).unwrap();

        let config = PulseConfig::load(file.path()).unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.language, "de");
        assert_eq!(config.window_days, 30);
        assert_eq!(config.require_api_key().unwrap(), "abc");
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "top_k = 3").unwrap();

        let result = PulseConfig::load(file.path());
        assert!(matches!(result, Err(PulseError::Config(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PulseConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(PulseError::Config(_))));
    }

    #[test]
    fn test_validate() {
        let mut config = PulseConfig::default();
        config.top_k = 0;
        assert!(config.validate().is_err());

        let mut config = PulseConfig::default();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = PulseConfig::default();
        config.endpoint = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_key() {
        let mut config = PulseConfig::default();
        assert!(matches!(config.require_api_key(), Err(PulseError::Config(_))));

        config.api_key = Some("   ".to_string());
        assert!(config.require_api_key().is_err());
    }

    #[test]
    fn test_key_hidden() {
        let mut config = PulseConfig::default();
        config.api_key = Some("top-secret".to_string());

        assert!(!format!("{config:?}").contains("top-secret"));
        assert!(!serde_json::to_string(&config).unwrap().contains("top-secret"));
    }
}
