//! JSON Schema of the arguments accepted by a search job

use super::models::{JobType, DEFAULT_COUNT};
use crate::engines::EngineKind;
use serde_json::{json, Value};

/// Short description for callers that dispatch jobs by name
pub const DESCRIPTION: &str =
    "Performs web searches to find and retrieve relevant videos using various engines.";

/// Schema of a [`SearchJob`](super::SearchJob)
pub fn parameters_schema(max_count: u32) -> Value {
    let engines: Vec<&str> = EngineKind::ALL.iter().map(EngineKind::as_str).collect();

    json!({
        "type": "object",
        "properties": {
            "engine": {
                "type": "string",
                "description": "Engine to use for the search. Currently supports 'serp'.",
                "enum": engines,
                "default": EngineKind::Serp.as_str(),
            },
            "job_type": {
                "type": "string",
                "description": "Type of search to perform.",
                "enum": [JobType::SearchVideos.as_str()],
                "default": JobType::SearchVideos.as_str(),
            },
            "query": {
                "type": "string",
                "description": "Search query for the output.",
                "minLength": 1,
            },
            "count": {
                "type": "integer",
                "description": "Number of results to retrieve.",
                "default": DEFAULT_COUNT,
                "minimum": 1,
                "maximum": max_count,
            },
            "duration": {
                "type": "string",
                "description": "Filter videos by duration (short, medium, long).",
                "enum": ["short", "medium", "long"],
            },
            "collection_id": {
                "type": "string",
                "description": "Collection ID attached to every result.",
            },
        },
        "required": ["query"],
    })
}
