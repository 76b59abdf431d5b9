//! Search orchestration: validation, status reporting and reconciliation

use super::models::{JobType, SearchJob, SearchRequest};
use super::status::{SearchStatus, StatusSink, StatusTracker};
use crate::config::Settings;
use crate::engines::{EngineKind, VideoSearchProvider};
use crate::error::{SearchError, TransportError};
use crate::results::{is_youtube_listing_page, VideoResult};
use tracing::{error, info, warn};

const PENDING_MESSAGE: &str = "Searching for videos...";
const TIMEOUT_MESSAGE: &str = "The search is taking longer than expected. Please try again.";
const RATE_LIMIT_MESSAGE: &str = "Rate limit exceeded. Please try again in a few minutes.";
const GENERIC_MESSAGE: &str = "An error occurred during the video search.";

/// Turns search requests into a stream of status snapshots.
///
/// Holds only settings; every run builds its own provider, so one
/// orchestrator can serve concurrent runs.
pub struct SearchOrchestrator {
    settings: Settings,
}

impl SearchOrchestrator {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Run a job received as one structured object
    pub async fn run_job(
        &self,
        job: SearchJob,
        sink: &dyn StatusSink,
    ) -> Result<Vec<VideoResult>, SearchError> {
        self.run(&job.engine, &job.job_type, job.request, sink).await
    }

    /// Run one search.
    ///
    /// A request without a count uses `search.default_count`. Engine, job
    /// type, request bounds and credentials are checked before
    /// anything is reported. After that the sink always receives a pending
    /// snapshot and exactly one terminal snapshot. On success the filled
    /// results are returned in slot order.
    pub async fn run(
        &self,
        engine: &str,
        job_type: &str,
        request: SearchRequest,
        sink: &dyn StatusSink,
    ) -> Result<Vec<VideoResult>, SearchError> {
        let engine: EngineKind = engine.parse().map_err(|e| {
            error!("Unsupported engine: {}", engine);
            e
        })?;
        let job_type: JobType = job_type.parse().map_err(|e| {
            error!("Unsupported job type: {}", job_type);
            e
        })?;
        let request = request.or_default_count(self.settings.search.default_count);
        request.validate(self.settings.search.max_count)?;
        let provider = engine.build(&self.settings)?;

        info!(
            engine = %engine,
            job_type = %job_type,
            query = %request.query,
            count = request.result_count(),
            duration = ?request.duration,
            "video search started"
        );

        match job_type {
            JobType::SearchVideos => self.search_videos(provider.as_ref(), &request, sink).await,
        }
    }

    async fn search_videos(
        &self,
        provider: &dyn VideoSearchProvider,
        request: &SearchRequest,
        sink: &dyn StatusSink,
    ) -> Result<Vec<VideoResult>, SearchError> {
        let mut tracker = StatusTracker::start(request.result_count() as usize, PENDING_MESSAGE, sink);
        let job_id = tracker.job_id();

        let raw_results = match provider
            .search_videos(&request.query, request.result_count(), request.duration.as_deref())
            .await
        {
            Ok(results) => results,
            Err(err) => {
                error!(job_id = %job_id, error = %err, "video search failed");
                tracker.finish(SearchStatus::Error, &user_message(&err));
                return Err(err);
            }
        };

        // Slots are filled in order from accepted results only, so a skipped
        // result never leaves a hole ahead of a filled slot.
        let mut uploaded = Vec::new();
        for raw in raw_results {
            if uploaded.len() == tracker.slot_count() {
                break;
            }

            let external_url = raw.external_url();
            if is_youtube_listing_page(external_url) {
                warn!(job_id = %job_id, url = %external_url, "Skipping non-video YouTube link");
                continue;
            }

            let video = VideoResult::from_raw(&raw, request.collection_id.as_deref());
            tracker.fill(uploaded.len(), video.clone());
            uploaded.push(video);
        }

        if uploaded.is_empty() {
            let err = SearchError::NoResults;
            error!(job_id = %job_id, "No valid videos found for upload.");
            tracker.finish(SearchStatus::Error, &user_message(&err));
            return Err(err);
        }

        tracker.finish(
            SearchStatus::Success,
            &format!("Uploaded {} videos successfully.", uploaded.len()),
        );
        info!(job_id = %job_id, "Successfully uploaded {} videos.", uploaded.len());

        Ok(uploaded)
    }
}

/// Render an error as the text shown to the caller
pub fn user_message(err: &SearchError) -> String {
    match err {
        SearchError::Transport(transport) => transport_message(transport).to_string(),
        other => other.to_string(),
    }
}

fn transport_message(err: &TransportError) -> &'static str {
    if err.is_timeout() {
        TIMEOUT_MESSAGE
    } else if err.status() == Some(429) {
        RATE_LIMIT_MESSAGE
    } else {
        GENERIC_MESSAGE
    }
}
