//! Shared fixtures for tests that talk to a mock SerpAPI server

#![allow(dead_code)]

use serde_json::{json, Value};
use vidsearch::config::Settings;
use wiremock::MockServer;

pub const SEARCH_PATH: &str = "/search.json";

/// Settings pointing at the mock server, with no backoff sleeps
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.engines.serp.api_key = Some("test-key".to_string());
    settings.engines.serp.base_url = format!("{}{}", server.uri(), SEARCH_PATH);
    settings.outgoing.backoff_factor = 0.0;
    settings.outgoing.request_timeout = 2.0;
    settings
}

pub fn video(id: &str, title: &str) -> Value {
    json!({
        "link": format!("https://www.youtube.com/watch?v={}", id),
        "title": title,
        "thumbnail": format!("https://i.ytimg.com/vi/{}/hqdefault.jpg", id),
        "duration": "2:10",
    })
}

pub fn body(results: Vec<Value>) -> Value {
    json!({
        "search_metadata": { "status": "Success" },
        "video_results": results,
    })
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
