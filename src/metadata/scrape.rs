use regex::Regex;
use std::sync::OnceLock;

use super::PlayerResponse;

/// Watch page address for a video identifier
pub fn watch_page_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/watch?v={}",
        urlencoding::encode(video_id)
    )
}

/// One way of locating the player response inside watch-page markup
struct ScrapeStrategy {
    name: &'static str,
    pattern: fn() -> &'static Regex,
}

fn assignment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)var\s+ytInitialPlayerResponse\s*=\s*(\{.+?\})\s*;")
            .expect("Failed to compile assignment regex")
    })
}

fn bare_assignment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)ytInitialPlayerResponse\s*=\s*(\{.+?\});")
            .expect("Failed to compile bare assignment regex")
    })
}

fn json_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)"ytInitialPlayerResponse":\s*(\{.+?\}),"#)
            .expect("Failed to compile json key regex")
    })
}

/// Strategies in ranked order; the first capture that deserializes wins
const STRATEGIES: &[ScrapeStrategy] = &[
    ScrapeStrategy { name: "var assignment", pattern: assignment_regex },
    ScrapeStrategy { name: "bare assignment", pattern: bare_assignment_regex },
    ScrapeStrategy { name: "embedded json key", pattern: json_key_regex },
];

/// Scrape the embedded player response out of watch-page markup
///
/// The page embeds the player data in script text in a handful of shapes that
/// shift between site revisions. Each strategy is tried in order and the
/// first captured object that decodes is returned; none matching is a normal
/// outcome that sends the pipeline down the identifier-based fallback path.
pub fn scrape_player_response(html: &str) -> Option<PlayerResponse> {
    for strategy in STRATEGIES {
        let Some(captures) = (strategy.pattern)().captures(html) else {
            continue;
        };
        let Some(raw) = captures.get(1) else {
            continue;
        };

        match PlayerResponse::from_json(raw.as_str()) {
            Ok(response) => {
                tracing::debug!("scraped player response via {} strategy", strategy.name);
                return Some(response);
            }
            Err(e) => {
                tracing::debug!("{} capture did not decode: {}", strategy.name, e);
            }
        }
    }

    tracing::debug!("no scrape strategy matched the page");
    None
}
