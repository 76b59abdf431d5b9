//! Settings structures for vidsearch configuration

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure, loaded from settings.yml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub search: SearchSettings,
    pub outgoing: OutgoingSettings,
    pub engines: EnginesSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Check values that would otherwise fail at request time
    pub fn validate(&self) -> Result<()> {
        self.outgoing.validate()
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("SERP_API_KEY") {
            if !val.trim().is_empty() {
                self.engines.serp.api_key = Some(val);
            }
        }
        if let Ok(val) = std::env::var("VIDSEARCH_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("VIDSEARCH_REQUEST_TIMEOUT") {
            if let Ok(timeout) = val.parse() {
                self.outgoing.request_timeout = timeout;
            }
        }
        if let Ok(val) = std::env::var("VIDSEARCH_SERP_BASE_URL") {
            self.engines.serp.base_url = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug logging
    pub debug: bool,
}

/// Request bounds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Number of results when the request does not say
    pub default_count: u32,
    /// Largest accepted result count
    pub max_count: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_count: 5,
            max_count: 50,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Per-attempt request timeout in seconds
    pub request_timeout: f64,
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Exponential backoff factor in seconds
    pub backoff_factor: f64,
    /// Upper bound for a single backoff sleep in seconds
    pub backoff_max: f64,
    /// HTTP statuses that are retried
    pub retry_on_status: Vec<u16>,
    /// Honour Retry-After on 429 and 503
    pub respect_retry_after: bool,
    /// Pool max size
    pub pool_maxsize: usize,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            max_retries: 3,
            backoff_factor: 1.0,
            backoff_max: 120.0,
            retry_on_status: vec![429, 500, 502, 503, 504],
            respect_retry_after: true,
            pool_maxsize: 20,
        }
    }
}

impl OutgoingSettings {
    /// Reject values the HTTP client cannot turn into durations
    pub fn validate(&self) -> Result<()> {
        if !self.request_timeout.is_finite() || self.request_timeout <= 0.0 {
            bail!(
                "outgoing.request_timeout must be a positive number of seconds, got {}",
                self.request_timeout
            );
        }
        if !self.backoff_factor.is_finite() || self.backoff_factor < 0.0 {
            bail!(
                "outgoing.backoff_factor must be a non-negative number, got {}",
                self.backoff_factor
            );
        }
        if !self.backoff_max.is_finite() || self.backoff_max < 0.0 {
            bail!(
                "outgoing.backoff_max must be a non-negative number of seconds, got {}",
                self.backoff_max
            );
        }
        Ok(())
    }
}

/// Per-engine settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginesSettings {
    pub serp: SerpSettings,
}

/// SerpAPI settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SerpSettings {
    /// Access key; required to build the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Search endpoint
    pub base_url: String,
    /// Interface language
    pub hl: String,
    /// Country
    pub gl: String,
}

impl Default for SerpSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://serpapi.com/search.json".to_string(),
            hl: "en".to_string(),
            gl: "us".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.search.default_count, 5);
        assert_eq!(settings.search.max_count, 50);
        assert_eq!(settings.outgoing.request_timeout, 10.0);
        assert_eq!(settings.outgoing.max_retries, 3);
        assert_eq!(settings.outgoing.retry_on_status, vec![429, 500, 502, 503, 504]);
        assert!(settings.engines.serp.api_key.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
outgoing:
  request_timeout: 2.5
engines:
  serp:
    api_key: secret
    gl: gb
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.outgoing.request_timeout, 2.5);
        assert_eq!(settings.outgoing.max_retries, 3);
        assert_eq!(settings.engines.serp.api_key.as_deref(), Some("secret"));
        assert_eq!(settings.engines.serp.gl, "gb");
        assert_eq!(settings.engines.serp.hl, "en");
        assert_eq!(settings.engines.serp.base_url, "https://serpapi.com/search.json");
    }

    #[test]
    fn test_outgoing_validation() {
        assert!(Settings::default().validate().is_ok());

        let yaml = "outgoing:\n  request_timeout: .inf\n";
        let settings = Settings::from_yaml(yaml).unwrap();
        assert!(settings.validate().is_err());

        for timeout in [0.0, -2.0, f64::NAN] {
            let mut settings = Settings::default();
            settings.outgoing.request_timeout = timeout;
            assert!(settings.validate().is_err());
        }

        let mut settings = Settings::default();
        settings.outgoing.backoff_max = f64::INFINITY;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.outgoing.backoff_factor = -1.0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_api_key_not_serialized_when_absent() {
        let yaml = serde_yaml::to_string(&Settings::default()).unwrap();
        assert!(!yaml.contains("api_key"));
    }
}
