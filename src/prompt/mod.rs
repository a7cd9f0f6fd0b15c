use crate::metadata::scrape;
use crate::pipeline::Transcript;

/// Default summary prompt wrapped around a fetched transcript
pub const DEFAULT_TEMPLATE: &str = "Please summarize the following YouTube video transcript into key points:

Title: {title}
URL: {url}

Transcript:
{transcript}

Please provide:
1. A brief overview (2-3 sentences)
2. 5-8 key points or main ideas
3. Any important conclusions or takeaways";

/// Render a prompt template against a fetched transcript
///
/// Recognized placeholders are `{title}`, `{url}`, and `{transcript}`; every
/// occurrence is substituted and unknown placeholders are left alone.
pub fn render(template: &str, transcript: &Transcript) -> String {
    let watch_url = scrape::watch_page_url(&transcript.video_id);

    template
        .replace("{title}", transcript.title.as_deref().unwrap_or("(unknown title)"))
        .replace("{url}", &watch_url)
        .replace("{transcript}", &transcript.text)
}
