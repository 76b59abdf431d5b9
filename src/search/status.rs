//! Status snapshots reported while a search runs
//!
//! A run emits a `pending` snapshot followed by exactly one terminal
//! snapshot (`success` or `error`). Snapshots are immutable and carry
//! their own copy of the result slots at emission time.

use crate::results::VideoResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;
use uuid::Uuid;

/// Name under which snapshots are reported
pub const AGENT_NAME: &str = "web_search";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStatus {
    Pending,
    Success,
    Error,
}

impl SearchStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// One point-in-time report of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub job_id: Uuid,
    pub agent_name: String,
    /// Position in the run's snapshot stream, starting at 0
    pub sequence: u32,
    pub status: SearchStatus,
    pub message: String,
    pub results: Vec<VideoResult>,
    pub emitted_at: DateTime<Utc>,
}

/// Receiver side of the status stream
pub trait StatusSink: Send + Sync {
    fn publish(&self, snapshot: StatusSnapshot);
}

impl StatusSink for UnboundedSender<StatusSnapshot> {
    fn publish(&self, snapshot: StatusSnapshot) {
        if self.send(snapshot).is_err() {
            debug!("status receiver dropped, snapshot discarded");
        }
    }
}

/// Records every snapshot in memory
#[derive(Debug, Clone, Default)]
pub struct SnapshotLog {
    snapshots: Arc<Mutex<Vec<StatusSnapshot>>>,
}

impl SnapshotLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything published so far
    pub fn snapshots(&self) -> Vec<StatusSnapshot> {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<StatusSnapshot> {
        self.snapshots().pop()
    }
}

impl StatusSink for SnapshotLog {
    fn publish(&self, snapshot: StatusSnapshot) {
        self.snapshots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(snapshot);
    }
}

/// Owns the result slots of one run and emits its snapshots.
///
/// `finish` consumes the tracker, so a run cannot report twice.
pub(crate) struct StatusTracker<'a> {
    job_id: Uuid,
    sequence: u32,
    slots: Vec<VideoResult>,
    sink: &'a dyn StatusSink,
}

impl<'a> StatusTracker<'a> {
    /// Reserve `count` placeholder slots and report them as pending
    pub(crate) fn start(count: usize, message: &str, sink: &'a dyn StatusSink) -> Self {
        let mut tracker = Self {
            job_id: Uuid::new_v4(),
            sequence: 0,
            slots: vec![VideoResult::placeholder(); count],
            sink,
        };
        tracker.emit(SearchStatus::Pending, message);
        tracker
    }

    pub(crate) fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Overwrite a placeholder with a real result
    pub(crate) fn fill(&mut self, index: usize, video: VideoResult) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = video;
        }
    }

    /// Emit the terminal snapshot
    pub(crate) fn finish(mut self, status: SearchStatus, message: &str) {
        debug_assert!(status.is_terminal());
        self.emit(status, message);
    }

    fn emit(&mut self, status: SearchStatus, message: &str) {
        let snapshot = StatusSnapshot {
            job_id: self.job_id,
            agent_name: AGENT_NAME.to_string(),
            sequence: self.sequence,
            status,
            message: message.to_string(),
            results: self.slots.clone(),
            emitted_at: Utc::now(),
        };
        self.sequence += 1;
        self.sink.publish(snapshot);
    }
}
