//! Link heuristics that separate single videos from channel and profile pages

use super::types::RawVideoResult;
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

/// Links that point at exactly one video
static SINGLE_VIDEO_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(youtube\.com/(watch|shorts/|embed/)|youtu\.be/[\w-]+|vimeo\.com/\d+)",
    )
    .unwrap()
});

/// YouTube paths that list many videos rather than show one
const YOUTUBE_LISTING_PREFIXES: [&str; 3] = ["/channel/", "/user/", "/c/"];

/// Channel or profile pages, matched loosely on the whole link
pub fn is_profile_link(link: &str) -> bool {
    link.contains("channel") || link.contains("user")
}

pub fn is_single_video_link(link: &str) -> bool {
    SINGLE_VIDEO_URL.is_match(link)
}

/// Whether a provider result plausibly points at a playable video
pub fn is_playable(result: &RawVideoResult) -> bool {
    if is_profile_link(&result.link) {
        return false;
    }
    let has_video_link = result
        .video_link
        .as_deref()
        .is_some_and(|v| !v.is_empty());
    is_single_video_link(&result.link) || has_video_link
}

/// Keep only playable results, preserving order
pub fn retain_playable(results: Vec<RawVideoResult>) -> Vec<RawVideoResult> {
    results.into_iter().filter(is_playable).collect()
}

/// A YouTube channel, user or custom-name page
pub fn is_youtube_listing_page(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };
    let is_youtube = parsed
        .host_str()
        .is_some_and(|host| host == "youtube.com" || host.ends_with(".youtube.com"));
    is_youtube
        && YOUTUBE_LISTING_PREFIXES
            .iter()
            .any(|prefix| parsed.path().starts_with(prefix))
}
