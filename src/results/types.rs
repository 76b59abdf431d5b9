//! Result type definitions

use serde::{Deserialize, Serialize};

/// Name shown on a slot that is still waiting for data
pub const PLACEHOLDER_NAME: &str = "Loading...";

/// Name used when the provider returns no title
pub const UNTITLED_VIDEO: &str = "Untitled Video";

/// A video result as returned by a provider, after link filtering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawVideoResult {
    /// Primary link (watch page or landing page)
    pub link: String,
    /// Direct video link, when the provider has one
    pub video_link: Option<String>,
    pub title: Option<String>,
    pub thumbnail: Option<String>,
    /// Duration as displayed by the provider, e.g. "3:41"
    pub duration: Option<String>,
}

impl RawVideoResult {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            video_link: None,
            title: None,
            thumbnail: None,
            duration: None,
        }
    }

    pub fn with_video_link(mut self, video_link: impl Into<String>) -> Self {
        self.video_link = Some(video_link.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// The direct video link if present, otherwise the primary link
    pub fn external_url(&self) -> &str {
        match self.video_link.as_deref() {
            Some(video_link) if !video_link.is_empty() => video_link,
            _ => &self.link,
        }
    }
}

/// A normalized video result as reported to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoResult {
    /// Absolute URL of the video; empty while pending
    pub external_url: String,
    /// Display title
    pub name: String,
    pub thumbnail_url: Option<String>,
    /// Opaque tag copied from the request
    pub collection_id: Option<String>,
}

impl VideoResult {
    /// A slot reserved for a result that has not arrived yet
    pub fn placeholder() -> Self {
        Self {
            external_url: String::new(),
            name: PLACEHOLDER_NAME.to_string(),
            thumbnail_url: None,
            collection_id: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.external_url.is_empty() && self.name == PLACEHOLDER_NAME
    }

    /// Normalize a raw provider result
    pub fn from_raw(raw: &RawVideoResult, collection_id: Option<&str>) -> Self {
        Self {
            external_url: raw.external_url().to_string(),
            name: raw
                .title
                .clone()
                .unwrap_or_else(|| UNTITLED_VIDEO.to_string()),
            thumbnail_url: raw.thumbnail.clone(),
            collection_id: collection_id.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_url_prefers_video_link() {
        let raw = RawVideoResult::new("https://example.com/page")
            .with_video_link("https://cdn.example.com/clip.mp4");
        assert_eq!(raw.external_url(), "https://cdn.example.com/clip.mp4");

        let raw = RawVideoResult::new("https://www.youtube.com/watch?v=abc").with_video_link("");
        assert_eq!(raw.external_url(), "https://www.youtube.com/watch?v=abc");
    }

    #[test]
    fn test_from_raw_defaults_title() {
        let raw = RawVideoResult::new("https://www.youtube.com/watch?v=abc")
            .with_thumbnail("https://i.ytimg.com/vi/abc/default.jpg");
        let video = VideoResult::from_raw(&raw, Some("col-1"));

        assert_eq!(video.name, UNTITLED_VIDEO);
        assert_eq!(video.external_url, "https://www.youtube.com/watch?v=abc");
        assert_eq!(
            video.thumbnail_url.as_deref(),
            Some("https://i.ytimg.com/vi/abc/default.jpg")
        );
        assert_eq!(video.collection_id.as_deref(), Some("col-1"));
        assert!(!video.is_placeholder());
    }

    #[test]
    fn test_placeholder() {
        let slot = VideoResult::placeholder();
        assert!(slot.is_placeholder());
        assert_eq!(slot.name, "Loading...");
        assert!(slot.external_url.is_empty());
    }
}
