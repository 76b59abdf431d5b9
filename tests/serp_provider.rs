//! SerpAPI engine against a mock server: request shape, retries, filtering

mod common;

use common::{body, request_count, settings_for, video, SEARCH_PATH};
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use vidsearch::engines::{SerpApi, VideoSearchProvider};
use vidsearch::{SearchError, TransportError};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn engine(server: &MockServer) -> SerpApi {
    let settings = settings_for(server);
    SerpApi::with_settings(&settings.engines.serp, &settings.outgoing).unwrap()
}

#[tokio::test]
async fn test_request_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .and(query_param("q", "cats"))
        .and(query_param("tbm", "vid"))
        .and(query_param("num", "3"))
        .and(query_param("hl", "en"))
        .and(query_param("gl", "us"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("tbs", "dur:l"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![video("a", "A")])))
        .expect(1)
        .mount(&server)
        .await;

    let results = assert_ok!(engine(&server).search_videos("cats", 3, Some("long")).await);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].link, "https://www.youtube.com/watch?v=a");
}

#[tokio::test]
async fn test_retries_then_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![video("a", "A")])))
        .mount(&server)
        .await;

    let results = assert_ok!(engine(&server).search_videos("cats", 5, None).await);
    assert_eq!(results.len(), 1);
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_gives_up_after_four_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = assert_err!(engine(&server).search_videos("cats", 5, None).await);
    match err {
        SearchError::Transport(TransportError::Status { status, attempts }) => {
            assert_eq!(status, 503);
            assert_eq!(attempts, 4);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn test_client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = assert_err!(engine(&server).search_videos("cats", 5, None).await);
    assert!(matches!(
        err,
        SearchError::Transport(TransportError::Status { status: 404, attempts: 1 })
    ));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_rate_limit_honours_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![video("a", "A")])))
        .mount(&server)
        .await;

    // Default factor would sleep 1s; Retry-After: 0 replaces it.
    let mut settings = settings_for(&server);
    settings.outgoing.backoff_factor = 1.0;
    let engine = SerpApi::with_settings(&settings.engines.serp, &settings.outgoing).unwrap();

    let started = std::time::Instant::now();
    assert_ok!(engine.search_videos("cats", 5, None).await);
    assert!(started.elapsed() < Duration::from_millis(900));
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_timeouts_are_retried_then_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(body(vec![]))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.outgoing.request_timeout = 0.1;
    let engine = SerpApi::with_settings(&settings.engines.serp, &settings.outgoing).unwrap();

    let err = assert_err!(engine.search_videos("cats", 5, None).await);
    match err {
        SearchError::Transport(transport) => {
            assert!(transport.is_timeout());
            assert_eq!(transport.attempts(), 4);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_invalid_duration_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![])))
        .expect(0)
        .mount(&server)
        .await;

    let err = assert_err!(engine(&server).search_videos("cats", 5, Some("tiny")).await);
    assert!(matches!(err, SearchError::InvalidArgument(_)));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_channel_links_never_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![
            json!({ "link": "https://www.youtube.com/channel/UC123", "title": "Channel" }),
            json!({ "link": "https://www.youtube.com/user/catlover", "title": "User" }),
            video("a", "A"),
            json!({ "link": "https://example.com/about", "title": "Not a video" }),
        ])))
        .mount(&server)
        .await;

    let results = assert_ok!(engine(&server).search_videos("cats", 5, None).await);
    assert_eq!(results.len(), 1);
    assert!(results
        .iter()
        .all(|r| r.link != "https://www.youtube.com/channel/UC123"));
}

#[tokio::test]
async fn test_missing_video_results_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "search_metadata": {} })))
        .mount(&server)
        .await;

    let results = assert_ok!(engine(&server).search_videos("cats", 5, None).await);
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_api_key_absent_from_transport_errors() {
    let mut settings = vidsearch::config::Settings::default();
    settings.engines.serp.api_key = Some("SECRET-KEY-123".to_string());
    settings.engines.serp.base_url = "http://127.0.0.1:9/search.json".to_string();
    settings.outgoing.max_retries = 0;
    settings.outgoing.request_timeout = 2.0;
    let engine = SerpApi::with_settings(&settings.engines.serp, &settings.outgoing).unwrap();

    let err = assert_err!(engine.search_videos("cats", 5, None).await);
    assert!(matches!(err, SearchError::Transport(_)));
    assert!(!err.to_string().contains("SECRET-KEY-123"));
    assert!(!format!("{err:?}").contains("SECRET-KEY-123"));
}

#[tokio::test]
async fn test_mistyped_field_keeps_the_rest_of_the_page() {
    let server = MockServer::start().await;
    let mut odd = video("a", "A");
    odd["duration"] = json!(95);
    Mock::given(method("GET"))
        .and(path(SEARCH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body(vec![odd, video("b", "B")])))
        .mount(&server)
        .await;

    let results = assert_ok!(engine(&server).search_videos("cats", 5, None).await);
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].duration, None);
    assert_eq!(results[1].duration.as_deref(), Some("2:10"));
}
