//! vidsearch: video search over SerpAPI
//!
//! A request is validated, sent to the search engine with retries, the
//! results are filtered down to single playable videos, and progress is
//! reported to the caller as a stream of status snapshots.

pub mod config;
pub mod engines;
pub mod error;
pub mod network;
pub mod results;
pub mod search;

pub use config::Settings;
pub use engines::{EngineKind, SerpApi, VideoSearchProvider};
pub use error::{SearchError, TransportError};
pub use results::{RawVideoResult, VideoResult};
pub use search::{SearchJob, SearchOrchestrator, SearchRequest, SearchStatus, StatusSink, StatusSnapshot};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
