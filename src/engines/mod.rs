//! Search engine module
//!
//! Defines the video search capability and the closed set of engines
//! that provide it.

mod serp;
mod traits;

pub use serp::SerpApi;
pub use traits::*;
