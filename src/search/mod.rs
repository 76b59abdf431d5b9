//! Search orchestration module
//!
//! Validates requests, drives the status protocol, calls the engine and
//! reconciles its results with the reserved slots.

mod models;
mod orchestrator;
mod schema;
mod status;

pub use models::*;
pub use orchestrator::{user_message, SearchOrchestrator};
pub use schema::{parameters_schema, DESCRIPTION};
pub use status::{SearchStatus, SnapshotLog, StatusSink, StatusSnapshot, AGENT_NAME};
