//! Error types shared by the provider and the orchestrator

use thiserror::Error;

/// Failures of a video search run
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Engine '{0}' is not supported.")]
    UnsupportedEngine(String),

    #[error("Unsupported job type: {0}.")]
    UnsupportedJobType(String),

    #[error("SerpAPI access key is not configured.")]
    MissingCredentials,

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Error during video search: {0}")]
    Transport(#[from] TransportError),

    #[error("No valid videos were found for upload.")]
    NoResults,
}

impl SearchError {
    /// True for errors raised before any status snapshot could be emitted
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedEngine(_)
                | Self::UnsupportedJobType(_)
                | Self::MissingCredentials
                | Self::InvalidArgument(_)
        )
    }
}

/// Failures of the HTTP layer, after retries have been applied
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {attempts} attempt(s)")]
    Timeout {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} after {attempts} attempt(s)")]
    Status { status: u16, attempts: u32 },

    #[error("network error after {attempts} attempt(s): {source}")]
    Network {
        attempts: u32,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request timeout must be a positive number of seconds, got {0}")]
    InvalidTimeout(f64),
}

impl TransportError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// HTTP status of the last attempt, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Number of attempts made before giving up
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Timeout { attempts, .. }
            | Self::Status { attempts, .. }
            | Self::Network { attempts, .. } => *attempts,
            Self::Decode(_) | Self::Client(_) => 1,
            Self::InvalidTimeout(_) => 0,
        }
    }
}
