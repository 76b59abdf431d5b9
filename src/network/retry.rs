//! Retry policy for outgoing requests
//!
//! Exponential backoff: the n-th retry sleeps `factor * 2^(n-1)` seconds,
//! capped at `backoff_max`. With factor 1 that is 1s, 2s, 4s.

use crate::config::OutgoingSettings;
use std::time::Duration;

/// Statuses for which a `Retry-After` header is honoured
const RETRY_AFTER_STATUSES: [u16; 2] = [429, 503];

/// When and how long to wait before retrying a request
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Backoff factor in seconds
    pub backoff_factor: f64,
    /// Cap for a single sleep in seconds
    pub backoff_max: f64,
    /// Statuses that are retried
    pub retry_on_status: Vec<u16>,
    /// Whether `Retry-After` replaces the computed delay
    pub respect_retry_after: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_settings(&OutgoingSettings::default())
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &OutgoingSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            backoff_factor: settings.backoff_factor,
            backoff_max: settings.backoff_max,
            retry_on_status: settings.retry_on_status.clone(),
            respect_retry_after: settings.respect_retry_after,
        }
    }

    /// Policy that never sleeps between attempts
    pub fn without_backoff(mut self) -> Self {
        self.backoff_factor = 0.0;
        self
    }

    /// Total attempts including the first one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Whether another attempt is allowed after `attempt` (1-indexed) failed
    pub fn can_retry(&self, attempt: u32) -> bool {
        attempt <= self.max_retries
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    /// Delay before the retry that follows failed attempt `attempt`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31) as i32;
        let secs = self.backoff_factor * 2f64.powi(exponent);
        self.clamp(secs)
    }

    /// Delay for a retried response, preferring the server's `Retry-After`
    pub fn delay_for_status(&self, status: u16, attempt: u32, retry_after: Option<Duration>) -> Duration {
        if self.respect_retry_after && RETRY_AFTER_STATUSES.contains(&status) {
            if let Some(wait) = retry_after {
                return self.clamp(wait.as_secs_f64());
            }
        }
        self.backoff(attempt)
    }

    fn clamp(&self, secs: f64) -> Duration {
        if !secs.is_finite() || secs <= 0.0 {
            return Duration::ZERO;
        }
        let capped = if self.backoff_max.is_nan() {
            secs
        } else {
            secs.min(self.backoff_max.max(0.0))
        };
        Duration::try_from_secs_f64(capped).unwrap_or(Duration::MAX)
    }
}

/// Parse a `Retry-After` value: delta-seconds or an HTTP-date
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let value = value.trim();
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let date = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    let wait = date.with_timezone(&chrono::Utc) - chrono::Utc::now();
    Some(wait.to_std().unwrap_or(Duration::ZERO))
}
