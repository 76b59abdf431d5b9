//! Search request and related data models

use crate::error::SearchError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of results
pub const DEFAULT_COUNT: u32 = 5;

/// Kinds of job the orchestrator can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    SearchVideos,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SearchVideos => "search_videos",
        }
    }
}

impl FromStr for JobType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search_videos" => Ok(Self::SearchVideos),
            other => Err(SearchError::UnsupportedJobType(other.to_string())),
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Video length filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoDuration {
    Short,
    Medium,
    Long,
}

impl VideoDuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }

    /// Google `tbs` filter code
    pub fn filter_code(&self) -> &'static str {
        match self {
            Self::Short => "dur:s",
            Self::Medium => "dur:m",
            Self::Long => "dur:l",
        }
    }
}

impl FromStr for VideoDuration {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(SearchError::InvalidArgument(format!(
                "Invalid duration value: {}",
                other
            ))),
        }
    }
}

/// One video search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Search query, must not be blank
    pub query: String,
    /// Number of results; `None` defers to the configured default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// `short`, `medium` or `long`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    /// Opaque tag attached to every result
    #[serde(default, alias = "collectionId", skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            count: None,
            duration: None,
            collection_id: None,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Fill in the count when the request left it out
    pub fn or_default_count(mut self, default_count: u32) -> Self {
        self.count.get_or_insert(default_count);
        self
    }

    /// Number of results to search for
    pub fn result_count(&self) -> u32 {
        self.count.unwrap_or(DEFAULT_COUNT)
    }

    pub fn with_duration(mut self, duration: impl Into<String>) -> Self {
        self.duration = Some(duration.into());
        self
    }

    pub fn with_collection_id(mut self, collection_id: impl Into<String>) -> Self {
        self.collection_id = Some(collection_id.into());
        self
    }

    /// Check the request against the accepted bounds
    pub fn validate(&self, max_count: u32) -> Result<(), SearchError> {
        if self.query.trim().is_empty() {
            return Err(SearchError::InvalidArgument(
                "query cannot be empty".to_string(),
            ));
        }
        let count = self.result_count();
        if count < 1 || count > max_count {
            return Err(SearchError::InvalidArgument(format!(
                "count must be between 1 and {}, got {}",
                max_count, count
            )));
        }
        if let Some(duration) = self.duration.as_deref() {
            duration.parse::<VideoDuration>()?;
        }
        Ok(())
    }
}

fn default_engine() -> String {
    "serp".to_string()
}

fn default_job_type() -> String {
    JobType::SearchVideos.as_str().to_string()
}

/// Inbound job: engine and job type plus the request fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchJob {
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default = "default_job_type", alias = "jobType")]
    pub job_type: String,
    #[serde(flatten)]
    pub request: SearchRequest,
}

impl SearchJob {
    pub fn new(request: SearchRequest) -> Self {
        Self {
            engine: default_engine(),
            job_type: default_job_type(),
            request,
        }
    }

    /// Parse a job from the structured arguments a caller sends
    pub fn from_value(value: serde_json::Value) -> Result<Self, SearchError> {
        serde_json::from_value(value).map_err(|e| SearchError::InvalidArgument(e.to_string()))
    }
}
