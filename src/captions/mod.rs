use serde::{Deserialize, Serialize};

pub mod candidates;
pub mod json3;
pub mod vtt;

/// One piece of cue text within a caption event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
}

/// One timed caption cue, reduced to its text segments in source order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptionEvent {
    pub segments: Vec<CaptionSegment>,
}

impl CaptionEvent {
    /// An event is usable only if at least one segment carries non-empty text
    pub fn has_text(&self) -> bool {
        self.segments.iter().any(|seg| !seg.text.trim().is_empty())
    }
}

/// Check whether a body looks like a JSON document before attempting a decode
pub fn looks_like_json(body: &str) -> bool {
    matches!(body.trim_start().as_bytes().first(), Some(b'{') | Some(b'['))
}

/// Check whether a body looks like cue-track text (WebVTT header or cue arrow)
pub fn looks_like_cue_track(body: &str) -> bool {
    body.contains("WEBVTT") || body.contains("-->")
}

/// Parse a caption response body into events, trying json3 first, then cue-track
///
/// Returns `None` when the body matches neither recognized format; the fetch
/// cascade treats that as a signal to try the next URL candidate.
pub fn parse_caption_body(body: &str) -> Option<Vec<CaptionEvent>> {
    if looks_like_json(body) {
        if let Some(events) = json3::parse(body) {
            tracing::debug!("parsed caption body as json3 ({} events)", events.len());
            return Some(events);
        }
    }

    if looks_like_cue_track(body) {
        let events = vtt::parse(body);
        tracing::debug!("parsed caption body as cue track ({} events)", events.len());
        return Some(events);
    }

    tracing::debug!("caption body matched no recognized format");
    None
}
