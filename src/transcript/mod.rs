use crate::captions::CaptionEvent;

pub mod cleanup;

/// Join caption events into a single transcript string
///
/// Segment whitespace runs are collapsed to single spaces, segments of an
/// event are concatenated with no separator, the per-event string is trimmed
/// and dropped when empty, and the surviving event strings are joined with
/// one space. The result carries no leading/trailing whitespace and no run
/// of consecutive whitespace.
pub fn assemble(events: &[CaptionEvent]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for event in events {
        let mut line = String::new();
        for segment in &event.segments {
            line.push_str(&collapse_whitespace(&segment.text));
        }
        let line = line.trim();
        if !line.is_empty() {
            parts.push(line.to_string());
        }
    }

    let joined = parts.join(" ");
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collapse runs of whitespace to single spaces without trimming the ends
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_whitespace() {
            if !out.ends_with(' ') {
                out.push(' ');
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::CaptionSegment;

    fn event(segments: &[&str]) -> CaptionEvent {
        CaptionEvent {
            segments: segments
                .iter()
                .map(|text| CaptionSegment { text: text.to_string() })
                .collect(),
        }
    }

    #[test]
    fn test_assemble_keeps_segment_boundaries() {
        // trailing segment whitespace collapses to the single space between words
        let events = vec![event(&["Hello ", "world"]), event(&["  "])];
        assert_eq!(assemble(&events), "Hello world");
    }

    #[test]
    fn test_assemble_joins_events_with_single_space() {
        let events = vec![event(&["first"]), event(&["second"]), event(&["third"])];
        assert_eq!(assemble(&events), "first second third");
    }

    #[test]
    fn test_assemble_discards_empty_events() {
        let events = vec![event(&[]), event(&["", "  \n "]), event(&["kept"])];
        assert_eq!(assemble(&events), "kept");
    }

    #[test]
    fn test_assemble_output_has_no_whitespace_runs() {
        let events = vec![
            event(&["a \n\t b ", "  c"]),
            event(&["   "]),
            event(&[" d\n"]),
        ];
        let assembled = assemble(&events);
        assert!(!assembled.contains("  "));
        assert!(!assembled.contains('\n'));
        assert_eq!(assembled, assembled.trim());
        assert_eq!(assembled, "a b c d");
    }

    #[test]
    fn test_assemble_empty_input() {
        assert_eq!(assemble(&[]), "");
    }
}
