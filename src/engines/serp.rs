//! SerpAPI video search engine (API key required)

use super::traits::*;
use crate::config::{OutgoingSettings, SerpSettings};
use crate::error::{SearchError, TransportError};
use crate::network::HttpClient;
use crate::results::{retain_playable, RawVideoResult};
use crate::search::VideoDuration;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Google video search through SerpAPI
pub struct SerpApi {
    api_key: String,
    base_url: String,
    hl: String,
    gl: String,
    client: HttpClient,
}

impl SerpApi {
    /// Create an engine with default settings and the given key
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        let settings = SerpSettings {
            api_key: Some(api_key.into()),
            ..SerpSettings::default()
        };
        Self::with_settings(&settings, &OutgoingSettings::default())
    }

    pub fn with_settings(
        settings: &SerpSettings,
        outgoing: &OutgoingSettings,
    ) -> Result<Self, SearchError> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(SearchError::MissingCredentials)?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: settings.base_url.clone(),
            hl: settings.hl.clone(),
            gl: settings.gl.clone(),
            client: HttpClient::with_settings(outgoing)?,
        })
    }

    /// Build the search request
    pub fn request(&self, query: &str, count: u32, duration: Option<VideoDuration>) -> EngineRequest {
        let mut request = EngineRequest::get(&self.base_url)
            .header("Accept", "application/json")
            .param("q", query)
            .param("tbm", "vid")
            .param("num", count.to_string())
            .param("hl", &self.hl)
            .param("gl", &self.gl)
            .param("api_key", &self.api_key);

        if let Some(duration) = duration {
            request = request.param("tbs", duration.filter_code());
        }

        request
    }

    /// Parse the response body into filtered results
    pub fn response(&self, response: &EngineResponse) -> Result<Vec<RawVideoResult>, TransportError> {
        let body: SerpResponse = response.json()?;

        if let Some(error) = body.error {
            warn!(error = %error, "serpapi reported an error");
        }

        let records = body.video_results.unwrap_or_default();
        let total = records.len();
        let parsed = records
            .iter()
            .enumerate()
            .filter_map(|(position, record)| match SerpVideoResult::from_record(record) {
                Some(result) => Some(result.into_raw()),
                None => {
                    warn!(position, "skipping serpapi video result that is not an object");
                    None
                }
            })
            .collect();
        let results = retain_playable(parsed);

        debug!(
            received = total,
            kept = results.len(),
            "filtered serpapi video results"
        );

        Ok(results)
    }
}

#[async_trait]
impl VideoSearchProvider for SerpApi {
    fn name(&self) -> &str {
        "serp"
    }

    async fn search_videos(
        &self,
        query: &str,
        count: u32,
        duration: Option<&str>,
    ) -> Result<Vec<RawVideoResult>, SearchError> {
        let duration = duration.map(str::parse::<VideoDuration>).transpose()?;

        debug!(query = %query, count, duration = ?duration, "performing serpapi video search");

        let request = self.request(query, count, duration);
        let response = self.client.execute(&request).await?;
        Ok(self.response(&response)?)
    }
}

/// Records are kept as raw JSON so one malformed entry cannot fail the page
#[derive(Debug, Deserialize)]
struct SerpResponse {
    #[serde(default)]
    video_results: Option<Vec<Value>>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug)]
struct SerpVideoResult {
    link: Option<String>,
    video_link: Option<String>,
    title: Option<String>,
    thumbnail: Option<String>,
    duration: Option<String>,
}

impl SerpVideoResult {
    /// Read one record field by field. A field of the wrong type counts as absent.
    fn from_record(record: &Value) -> Option<Self> {
        let record = record.as_object()?;
        let text = |key: &str| record.get(key).and_then(Value::as_str).map(str::to_string);

        Some(Self {
            link: text("link"),
            video_link: text("video_link"),
            title: text("title"),
            thumbnail: record.get("thumbnail").and_then(thumbnail_url),
            duration: text("duration"),
        })
    }

    fn into_raw(self) -> RawVideoResult {
        RawVideoResult {
            link: self.link.unwrap_or_default(),
            video_link: self.video_link,
            title: self.title,
            thumbnail: self.thumbnail,
            duration: self.duration,
        }
    }
}

/// Thumbnails come either as a URL or as a set of renditions
fn thumbnail_url(value: &Value) -> Option<String> {
    match value {
        Value::String(url) => Some(url.clone()),
        Value::Object(renditions) => ["static", "rich"]
            .iter()
            .find_map(|key| renditions.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}
