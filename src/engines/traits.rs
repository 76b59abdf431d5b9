//! Engine traits and types

use crate::config::Settings;
use crate::error::SearchError;
use crate::results::RawVideoResult;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use super::serp::SerpApi;

/// HTTP request to be made by an engine
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters
    pub params: HashMap<String, String>,
}

impl EngineRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            params: HashMap::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// HTTP response from an engine request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers, lowercase names
    pub headers: HashMap<String, String>,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.text)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Server-requested wait before the next attempt
    pub fn retry_after(&self) -> Option<Duration> {
        self.headers
            .get("retry-after")
            .and_then(|v| crate::network::parse_retry_after(v))
    }
}

/// Capability shared by every engine that can look up videos
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Engine name
    fn name(&self) -> &str;

    /// Search for up to `count` videos, optionally filtered by duration
    /// (`short`, `medium` or `long`).
    ///
    /// Only results that plausibly point at a single playable video are
    /// returned.
    async fn search_videos(
        &self,
        query: &str,
        count: u32,
        duration: Option<&str>,
    ) -> Result<Vec<RawVideoResult>, SearchError>;
}

/// Supported search backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EngineKind {
    Serp,
}

impl EngineKind {
    pub const ALL: [EngineKind; 1] = [EngineKind::Serp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Serp => "serp",
        }
    }

    /// Build a fresh provider for one run
    pub fn build(&self, settings: &Settings) -> Result<Box<dyn VideoSearchProvider>, SearchError> {
        match self {
            Self::Serp => Ok(Box::new(SerpApi::with_settings(
                &settings.engines.serp,
                &settings.outgoing,
            )?)),
        }
    }
}

impl FromStr for EngineKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SearchError::UnsupportedEngine(s.to_string()))
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
