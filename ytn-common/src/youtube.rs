//! YouTube link validation and video id extraction

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com|youtu\.be)/[\w\-]+").expect("valid regex")
});

/// Video id patterns, tried in order
static VIDEO_ID_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"youtube\.com/watch\?v=([^&]+)",
        r"youtube\.com/embed/([^?]+)",
        r"youtu\.be/([^?]+)",
        r"youtube\.com/v/([^?]+)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// Check whether `url` looks like a YouTube link
///
/// Accepts an optional `http://`/`https://` scheme and optional `www.`,
/// followed by `youtube.com` or `youtu.be` and a non-empty path segment.
pub fn is_valid_youtube_url(url: &str) -> bool {
    LINK_RE.is_match(url)
}

/// Extract the video id from a YouTube link
///
/// Supports `watch?v=`, `embed/`, `youtu.be/` and `v/` forms. Returns
/// `None` when no pattern matches.
///
/// # Examples
///
/// ```
/// use ytn_common::youtube::extract_video_id;
///
/// let id = extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=1");
/// assert_eq!(id, Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ"), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("https://vimeo.com/123"), None);
/// ```
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RES.iter().find_map(|re| {
        re.captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|id| !id.is_empty())
    })
}

/// Validate a user-supplied link before any network call
///
/// Returns the trimmed link on success.
pub fn validate_youtube_url(url: &str) -> Result<&str> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput("YouTube URL is required".to_string()));
    }
    if !is_valid_youtube_url(trimmed) {
        return Err(Error::InvalidInput(format!(
            "'{trimmed}' is not a valid YouTube link"
        )));
    }
    Ok(trimmed)
}
