//! Result types and link filtering
//!
//! This module defines the raw provider records, the normalized video
//! results reported to callers, and the heuristics that tell a single
//! video apart from a channel or profile page.

pub mod filter;
mod types;

pub use filter::{is_playable, is_youtube_listing_page, retain_playable};
pub use types::*;
