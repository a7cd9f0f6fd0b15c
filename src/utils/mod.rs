use anyhow::Result;
use url::Url;

use crate::ScribeError;

/// Video identifiers are always 11 URL-safe base64 characters
const VIDEO_ID_LEN: usize = 11;

/// Check whether a string is a bare video identifier
pub fn is_video_id(input: &str) -> bool {
    input.len() == VIDEO_ID_LEN
        && input
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Extract the video identifier from a watch URL or pass a bare identifier through
///
/// Supported URL shapes: `watch?v=`, `youtu.be/`, `/shorts/`, `/embed/`, `/v/`.
pub fn extract_video_id(input: &str) -> Result<String> {
    if is_video_id(input) {
        return Ok(input.to_string());
    }

    let parsed = Url::parse(input)
        .map_err(|_| ScribeError::InvalidVideoId(input.to_string()))?;

    let host = parsed.host_str().unwrap_or_default();
    let host = host.strip_prefix("www.").unwrap_or(host);
    let host = host.strip_prefix("m.").unwrap_or(host);

    let query_id = || {
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
    };

    let candidate = match host {
        "youtu.be" => parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(|s| s.to_string()),
        "youtube.com" | "youtube-nocookie.com" => {
            let mut segments = parsed.path_segments().into_iter().flatten();
            match segments.next() {
                Some("watch") => query_id(),
                Some("shorts") | Some("embed") | Some("v") => {
                    segments.next().map(|s| s.to_string())
                }
                _ => None,
            }
        }
        _ => None,
    };

    let candidate = candidate.filter(|id| is_video_id(id));

    candidate.ok_or_else(|| ScribeError::InvalidVideoId(input.to_string()).into())
}

/// Truncate a body for debug logging, keeping output to a single line
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(max_chars)
        .collect();

    if text.chars().count() > max_chars {
        format!("{}...", flat)
    } else {
        flat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_video_id() {
        assert!(is_video_id("dQw4w9WgXcQ"));
        assert!(is_video_id("abc_DEF-123"));
        assert!(!is_video_id("short"));
        assert!(!is_video_id("has spaces!!"));
        assert!(!is_video_id("waytoolongtobeanid"));
    }

    #[test]
    fn test_extract_video_id_from_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?v=dQw4w9WgXcQ&t=42").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_extract_video_id_from_short_urls() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
    }

    #[test]
    fn test_extract_video_id_passthrough() {
        assert_eq!(extract_video_id("dQw4w9WgXcQ").unwrap(), "dQw4w9WgXcQ");
    }

    #[test]
    fn test_extract_video_id_rejects_garbage() {
        assert!(extract_video_id("not a url").is_err());
        assert!(extract_video_id("https://example.com/watch?v=dQw4w9WgXcQ").is_err());
        assert!(extract_video_id("https://www.youtube.com/watch").is_err());
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 100), "short");
        assert_eq!(preview("line\nbreak", 100), "line break");
        assert_eq!(preview("abcdefgh", 4), "abcd...");
    }
}
