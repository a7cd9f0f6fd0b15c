use url::Url;

use crate::Result;

/// Caption delivery formats the upstream endpoint understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// Structured JSON events (cheapest to parse, tried first)
    Json3,
    /// Alternative structured format
    Srv3,
    /// WebVTT cue text
    Vtt,
    /// No format hint, whatever the endpoint serves by default
    Default,
}

impl CaptionFormat {
    pub fn as_query_value(&self) -> Option<&'static str> {
        match self {
            CaptionFormat::Json3 => Some("json3"),
            CaptionFormat::Srv3 => Some("srv3"),
            CaptionFormat::Vtt => Some("vtt"),
            CaptionFormat::Default => None,
        }
    }
}

/// One caption URL the fetch cascade is willing to try
#[derive(Debug, Clone)]
pub struct FetchCandidate {
    pub url: String,
    pub format: CaptionFormat,
}

/// Query parameters that trigger cross-origin rejections or format drift
const STRIPPED_PARAMS: &[&str] = &["variant", "opi", "xoaf"];

/// Strip known problematic query parameters from a caption track base URL
pub fn clean_base_url(base_url: &str) -> Result<Url> {
    let mut parsed = Url::parse(base_url)
        .map_err(|_| anyhow::anyhow!("Invalid caption base URL: {}", base_url))?;

    let retained: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !STRIPPED_PARAMS.contains(&key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    if retained.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(retained);
    }

    Ok(parsed)
}

/// Build the ordered candidate list for a selected caption track
///
/// Format hints are appended in fixed priority order; the cleaned URL with no
/// hint at all is always the last candidate, carrying the fewest assumptions.
pub fn track_candidates(base_url: &str) -> Result<Vec<FetchCandidate>> {
    let cleaned = clean_base_url(base_url)?;

    let with_format = |format: CaptionFormat| {
        let mut url = cleaned.clone();
        if let Some(value) = format.as_query_value() {
            url.query_pairs_mut().append_pair("fmt", value);
        }
        FetchCandidate { url: url.to_string(), format }
    };

    Ok(vec![
        with_format(CaptionFormat::Json3),
        with_format(CaptionFormat::Srv3),
        with_format(CaptionFormat::Vtt),
        with_format(CaptionFormat::Default),
    ])
}

const TIMEDTEXT_ENDPOINT: &str = "https://www.youtube.com/api/timedtext";

/// Language/track scopes tried against the timedtext endpoint, most likely first
const TIMEDTEXT_SCOPES: &[&str] = &["lang=en&type=asr", "lang=en", ""];

/// Build the fixed candidate list used when no host metadata is available
///
/// Crosses auto-generated, manual-English, and any-language track scopes with
/// the json3, vtt, and unspecified formats; json3 candidates come first since
/// they are the most likely to exist and the cheapest to parse.
pub fn timedtext_candidates(video_id: &str) -> Vec<FetchCandidate> {
    let encoded_id = urlencoding::encode(video_id);
    let mut candidates = Vec::new();

    for format in [CaptionFormat::Json3, CaptionFormat::Vtt, CaptionFormat::Default] {
        for scope in TIMEDTEXT_SCOPES {
            let mut url = format!("{}?", TIMEDTEXT_ENDPOINT);
            if !scope.is_empty() {
                url.push_str(scope);
                url.push('&');
            }
            url.push_str(&format!("v={}", encoded_id));
            if let Some(value) = format.as_query_value() {
                url.push_str(&format!("&fmt={}", value));
            }
            candidates.push(FetchCandidate { url, format });
        }
    }

    candidates
}
