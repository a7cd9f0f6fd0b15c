use regex::Regex;
use std::sync::OnceLock;

use super::{CaptionEvent, CaptionSegment};

fn markup_tag_regex() -> &'static Regex {
    static MARKUP_TAG_REGEX: OnceLock<Regex> = OnceLock::new();
    MARKUP_TAG_REGEX
        .get_or_init(|| Regex::new(r"<[^>]*>").expect("Failed to compile markup tag regex"))
}

/// Parse cue-track (WebVTT-style) text into caption events
///
/// A line containing the `-->` cue arrow opens a new event; following
/// non-blank lines are cue text with markup tags stripped; a blank line or
/// end of input commits the event if any segment carries text. Header and
/// NOTE lines are skipped. Cue identifiers before arrow lines are treated as
/// text of the previous block and filtered out by the blank-line structure of
/// well-formed input.
pub fn parse(body: &str) -> Vec<CaptionEvent> {
    fn commit(event: Option<CaptionEvent>, events: &mut Vec<CaptionEvent>) {
        if let Some(event) = event {
            if event.has_text() {
                events.push(event);
            }
        }
    }

    let mut events = Vec::new();
    let mut current: Option<CaptionEvent> = None;

    for line in body.lines() {
        let line = line.trim();

        if line.is_empty() {
            commit(current.take(), &mut events);
            continue;
        }

        if line.starts_with("WEBVTT") || line.starts_with("NOTE") {
            continue;
        }

        if line.contains("-->") {
            // A new cue arrow also ends any block left open by missing blank lines
            commit(current.take(), &mut events);
            current = Some(CaptionEvent { segments: Vec::new() });
            continue;
        }

        if let Some(event) = current.as_mut() {
            let text = markup_tag_regex().replace_all(line, "").trim().to_string();
            if !text.is_empty() {
                event.segments.push(CaptionSegment { text });
            }
        }
    }

    commit(current.take(), &mut events);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::assemble;

    #[test]
    fn test_parse_basic_cues() {
        let body = "WEBVTT\n\n00:00:01.000 --> 00:00:05.000\nHello, world!\n\n00:00:06.000 --> 00:00:10.000\nSecond cue\n";
        let events = parse(body);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].segments[0].text, "Hello, world!");
        assert_eq!(events[1].segments[0].text, "Second cue");
    }

    #[test]
    fn test_parse_strips_markup_tags() {
        let body = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\n<b>Bold</b> and <i>italic</i>\n";
        let events = parse(body);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].segments[0].text, "Bold and italic");
    }

    #[test]
    fn test_parse_skips_notes_and_empty_cues() {
        let body = "WEBVTT\n\nNOTE internal comment\n\n00:00:01.000 --> 00:00:02.000\n\n00:00:03.000 --> 00:00:04.000\nonly real cue\n";
        let events = parse(body);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].segments[0].text, "only real cue");
    }

    #[test]
    fn test_parse_commits_cue_without_trailing_blank() {
        let body = "00:00:01.000 --> 00:00:02.000\nfirst\n00:00:03.000 --> 00:00:04.000\nsecond";
        let events = parse(body);
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn test_assembled_output_never_contains_arrow() {
        let body = "WEBVTT\n\n00:00:01.000 --> 00:00:05.000\nline one\nline two\n\n00:00:06.000 --> 00:00:10.000\nline three\n";
        let events = parse(body);
        let assembled = assemble(&events);
        assert!(!assembled.contains("-->"));
        assert_eq!(assembled, "line oneline two line three");
    }
}
