use anyhow::{Context, Result};
use std::path::Path;

use crate::cli::OutputFormat;
use crate::pipeline::Transcript;
use crate::prompt;

/// Render a transcript in the requested output format
pub fn format_transcript(
    transcript: &Transcript,
    format: &OutputFormat,
    template: Option<&str>,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(transcript.text.clone()),
        OutputFormat::Json => serde_json::to_string_pretty(transcript)
            .context("Failed to serialize transcript"),
        OutputFormat::Prompt => Ok(prompt::render(
            template.unwrap_or(prompt::DEFAULT_TEMPLATE),
            transcript,
        )),
    }
}

/// Save a transcript to file
pub async fn save_to_file(
    transcript: &Transcript,
    path: &Path,
    format: &OutputFormat,
    template: Option<&str>,
) -> Result<()> {
    let content = format_transcript(transcript, format, template)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Print a transcript to the console
pub fn print_to_console(
    transcript: &Transcript,
    format: &OutputFormat,
    template: Option<&str>,
) -> Result<()> {
    let content = format_transcript(transcript, format, template)?;
    println!("{}", content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn transcript() -> Transcript {
        Transcript {
            video_id: "dQw4w9WgXcQ".to_string(),
            title: Some("A Video".to_string()),
            language: Some("en".to_string()),
            source_url: "https://x/caps?fmt=json3".to_string(),
            text: "hello world".to_string(),
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn test_text_format_is_bare_transcript() {
        let out = format_transcript(&transcript(), &OutputFormat::Text, None).unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn test_json_format_carries_provenance() {
        let out = format_transcript(&transcript(), &OutputFormat::Json, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["video_id"], "dQw4w9WgXcQ");
        assert_eq!(value["language"], "en");
        assert_eq!(value["text"], "hello world");
    }

    #[test]
    fn test_prompt_format_uses_custom_template() {
        let out =
            format_transcript(&transcript(), &OutputFormat::Prompt, Some("T: {transcript}"))
                .unwrap();
        assert_eq!(out, "T: hello world");
    }
}
