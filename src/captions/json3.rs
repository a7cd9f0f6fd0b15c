use serde::Deserialize;

use super::{CaptionEvent, CaptionSegment};

/// Caption payload in the json3 timedtext format
#[derive(Debug, Deserialize)]
struct CaptionPayload {
    events: Option<Vec<RawEvent>>,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    segs: Option<Vec<RawSegment>>,
}

#[derive(Debug, Deserialize)]
struct RawSegment {
    utf8: Option<String>,
}

/// Decode a json3 caption payload into events
///
/// Returns `None` when the body is not valid JSON or lacks the `events`
/// sequence; both mean "not this format", not an error. Events without any
/// non-empty segment text are dropped.
pub fn parse(body: &str) -> Option<Vec<CaptionEvent>> {
    let payload: CaptionPayload = serde_json::from_str(body).ok()?;
    let raw_events = payload.events?;

    let events: Vec<CaptionEvent> = raw_events
        .into_iter()
        .filter_map(|event| {
            let segments: Vec<CaptionSegment> = event
                .segs?
                .into_iter()
                .filter_map(|seg| seg.utf8)
                .map(|text| CaptionSegment { text })
                .collect();

            let event = CaptionEvent { segments };
            event.has_text().then_some(event)
        })
        .collect();

    Some(events)
}
