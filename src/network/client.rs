//! HTTP client for making requests to search engines

use super::retry::RetryPolicy;
use crate::config::OutgoingSettings;
use crate::engines::{EngineRequest, EngineResponse};
use crate::error::TransportError;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("vidsearch/", env!("CARGO_PKG_VERSION"));

/// HTTP client wrapper with per-attempt timeout and retries.
///
/// Each provider owns one client; nothing is shared across runs.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    timeout: Duration,
    retry: RetryPolicy,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, TransportError> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self, TransportError> {
        let timeout = request_timeout(settings.request_timeout)?;
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(settings.pool_maxsize)
            .user_agent(USER_AGENT)
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(TransportError::Client)?;

        Ok(Self {
            client,
            timeout,
            retry: RetryPolicy::from_settings(settings),
        })
    }

    /// Replace the retry policy
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Execute a request, retrying transport failures and retryable statuses.
    ///
    /// Returns the first 2xx response. A non-retryable status, or a
    /// failure on the last allowed attempt, is returned as an error.
    pub async fn execute(&self, request: &EngineRequest) -> Result<EngineResponse, TransportError> {
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            debug!(url = %request.url, attempt, "sending request");

            match self.send_once(request).await {
                Ok(response) if response.is_success() => {
                    debug!(status = response.status, attempt, "request succeeded");
                    return Ok(response);
                }
                Ok(response) => {
                    let status = response.status;
                    if !self.retry.is_retryable_status(status) || !self.retry.can_retry(attempt) {
                        warn!(status, attempt, "request failed");
                        return Err(TransportError::Status {
                            status,
                            attempts: attempt,
                        });
                    }

                    let delay = self
                        .retry
                        .delay_for_status(status, attempt, response.retry_after());
                    warn!(
                        status,
                        attempt,
                        rate_limited = response.is_rate_limited(),
                        delay_ms = delay.as_millis() as u64,
                        "retryable status, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    // The request URL carries the API key in its query string.
                    let err = err.without_url();
                    if !self.retry.can_retry(attempt) {
                        warn!(error = %err, attempt, "request failed");
                        return Err(if err.is_timeout() {
                            TransportError::Timeout {
                                attempts: attempt,
                                source: err,
                            }
                        } else {
                            TransportError::Network {
                                attempts: attempt,
                                source: err,
                            }
                        });
                    }

                    let delay = self.retry.backoff(attempt);
                    warn!(
                        error = %err,
                        attempt,
                        timeout = err.is_timeout(),
                        delay_ms = delay.as_millis() as u64,
                        "transport error, backing off"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    async fn send_once(&self, request: &EngineRequest) -> Result<EngineResponse, reqwest::Error> {
        let mut req_builder = self.client.get(&request.url).timeout(self.timeout);

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.params.is_empty() {
            req_builder = req_builder.query(&request.params);
        }

        let response = req_builder.send().await?;
        Self::parse_response(response).await
    }

    /// Parse response into EngineResponse
    async fn parse_response(response: Response) -> Result<EngineResponse, reqwest::Error> {
        let status = response.status().as_u16();
        let url = response.url().to_string();

        let mut headers = HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.to_string(), v.to_string());
            }
        }

        let text = response.text().await?;

        Ok(EngineResponse {
            status,
            headers,
            text,
            url,
        })
    }
}

/// Per-attempt timeout; must be finite and positive
fn request_timeout(secs: f64) -> Result<Duration, TransportError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(TransportError::InvalidTimeout(secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| TransportError::InvalidTimeout(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
    }

    #[test]
    fn test_policy_follows_settings() {
        let settings = OutgoingSettings {
            max_retries: 1,
            ..OutgoingSettings::default()
        };
        let client = HttpClient::with_settings(&settings).unwrap();
        assert_eq!(client.retry_policy().max_attempts(), 2);

        let client = client.with_retry(RetryPolicy::default().without_backoff());
        assert_eq!(client.retry_policy().max_attempts(), 4);
        assert_eq!(client.retry_policy().backoff(1), Duration::ZERO);
    }

    #[test]
    fn test_unusable_timeouts_are_rejected() {
        for timeout in [f64::INFINITY, f64::NAN, 0.0, -1.0, 1e300] {
            let settings = OutgoingSettings {
                request_timeout: timeout,
                ..OutgoingSettings::default()
            };
            assert!(matches!(
                HttpClient::with_settings(&settings),
                Err(TransportError::InvalidTimeout(_))
            ));
        }
    }
}
