//! HTTP networking module
//!
//! Provides the retrying HTTP client used by search engines.

mod client;
mod retry;

pub use client::HttpClient;
pub use retry::{parse_retry_after, RetryPolicy};
