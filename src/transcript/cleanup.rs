use regex::Regex;
use std::sync::OnceLock;

use crate::config::CleanupConfig;

fn bracketed_timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[\d{1,2}:\d{2}(:\d{2})?\]").expect("Failed to compile bracketed timestamp regex")
    })
}

fn bare_timestamp_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b\d{1,2}:\d{2}(:\d{2})?\b").expect("Failed to compile timestamp regex")
    })
}

fn speaker_label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Z][a-z]+\s*:\s*").expect("Failed to compile speaker label regex")
    })
}

fn dot_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{2,}").expect("Failed to compile dot run regex"))
}

fn comma_run_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r",{2,}").expect("Failed to compile comma run regex"))
}

fn space_before_punct_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+([,.!?;:])").expect("Failed to compile punctuation regex"))
}

fn space_after_punct_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([,.!?;:])\s+").expect("Failed to compile punctuation regex"))
}

/// Post-processor that turns an assembled caption transcript into clean prose
///
/// The individual passes run in fixed order; the constants steering the
/// phrase dedup come from [`CleanupConfig`] and default to the empirically
/// tuned values rather than anything re-derived.
pub struct TranscriptCleaner {
    filler: Option<Regex>,
    dedup_window: usize,
    min_phrase_chars: usize,
}

impl TranscriptCleaner {
    pub fn new(config: &CleanupConfig) -> Self {
        let filler = if config.filler_words.is_empty() {
            None
        } else {
            let alternatives: Vec<String> = config
                .filler_words
                .iter()
                .map(|word| regex::escape(word))
                .collect();
            let pattern = format!(r"(?i)\b({})\b", alternatives.join("|"));
            Some(Regex::new(&pattern).expect("Failed to compile filler word regex"))
        };

        Self {
            filler,
            dedup_window: config.dedup_window,
            min_phrase_chars: config.min_phrase_chars,
        }
    }

    /// Run every cleanup pass over an assembled transcript
    pub fn clean(&self, transcript: &str) -> String {
        let text = strip_timestamps(transcript);
        let text = strip_speaker_labels(&text);
        let text = self.strip_filler(&text);
        let text = normalize_punctuation(&text);
        let text = collapse_whitespace(&text);
        dedupe_repeated_phrases(&text, self.dedup_window, self.min_phrase_chars)
    }

    fn strip_filler(&self, text: &str) -> String {
        match &self.filler {
            Some(re) => re.replace_all(text, "").into_owned(),
            None => text.to_string(),
        }
    }
}

/// Remove clock-style timestamps, bracketed ones first so no `[]` survives
pub fn strip_timestamps(text: &str) -> String {
    let text = bracketed_timestamp_regex().replace_all(text, "");
    bare_timestamp_regex().replace_all(&text, "").into_owned()
}

/// Remove capitalized `Name:` speaker-label prefixes
pub fn strip_speaker_labels(text: &str) -> String {
    speaker_label_regex().replace_all(text, "").into_owned()
}

/// Collapse repeated punctuation and normalize spacing around it
pub fn normalize_punctuation(text: &str) -> String {
    let text = dot_run_regex().replace_all(text, ".");
    let text = comma_run_regex().replace_all(&text, ",");
    let text = space_before_punct_regex().replace_all(&text, "$1");
    space_after_punct_regex().replace_all(&text, "$1 ").into_owned()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop immediately repeated word phrases, the artifact auto-generated
/// caption tracks are prone to
///
/// Walks the word list comparing the lower-cased `window`-word phrase at the
/// cursor against the phrase formed by the last `window` retained words;
/// on a match of at least `min_phrase_chars` characters the duplicate words
/// are skipped instead of emitted. Longer repeated spans that do not repeat
/// back-to-back within the window are left alone.
pub fn dedupe_repeated_phrases(text: &str, window: usize, min_phrase_chars: usize) -> String {
    if window == 0 {
        return text.to_string();
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::new();
    let mut i = 0;

    while i < words.len() {
        if kept.len() >= window && i + window <= words.len() {
            let current = words[i..i + window].join(" ").to_lowercase();
            let previous = kept[kept.len() - window..].join(" ").to_lowercase();
            if current == previous && current.len() >= min_phrase_chars {
                i += window;
                continue;
            }
        }
        kept.push(words[i]);
        i += 1;
    }

    kept.join(" ")
}
