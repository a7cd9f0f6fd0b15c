use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::captions::{self, candidates::{self, FetchCandidate}};
use crate::config::Config;
use crate::metadata::{self, scrape, CaptionTrack, PlayerResponse};
use crate::transcript::{self, cleanup::TranscriptCleaner};
use crate::utils;
use crate::{Result, ScribeError};

pub mod transport;

use transport::CaptionTransport;

/// A fetched transcript with its provenance
#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    /// Video the transcript belongs to
    pub video_id: String,

    /// Video title when host metadata carried one
    pub title: Option<String>,

    /// Language code of the selected caption track, when one was selected
    pub language: Option<String>,

    /// Candidate URL that produced the transcript
    pub source_url: String,

    /// The transcript text (cleaned unless cleanup is disabled)
    pub text: String,

    /// When the transcript was fetched
    pub fetched_at: DateTime<Utc>,
}

/// Transcript acquisition pipeline
///
/// Track-based candidates built from host metadata are tried first; when
/// those are exhausted (or no metadata exists) the fixed timedtext fallback
/// list is tried. Within each list, candidates are fetched strictly in order
/// and the first one whose assembled transcript reaches the configured
/// minimum length wins. Per-candidate failures are never fatal.
pub struct TranscriptPipeline<T: CaptionTransport> {
    transport: T,
    config: Config,
    cleaner: TranscriptCleaner,
}

impl TranscriptPipeline<transport::HttpTransport> {
    /// Create a pipeline with the production HTTP transport
    pub fn new(config: Config) -> Result<Self> {
        let transport = transport::HttpTransport::new(&config.fetch)?;
        Ok(Self::with_transport(transport, config))
    }
}

impl<T: CaptionTransport> TranscriptPipeline<T> {
    pub fn with_transport(transport: T, config: Config) -> Self {
        let cleaner = TranscriptCleaner::new(&config.cleanup);
        Self { transport, config, cleaner }
    }

    /// Fetch a transcript for a video
    ///
    /// `player_response` is the host metadata when the caller already has it
    /// (e.g. from a saved file); otherwise the pipeline scrapes the watch
    /// page itself. Returns `Ok(None)` when every candidate is exhausted —
    /// "no transcript available" is an outcome, not an error.
    pub async fn fetch_transcript(
        &self,
        video_id: &str,
        player_response: Option<&PlayerResponse>,
    ) -> Result<Option<Transcript>> {
        if !utils::is_video_id(video_id) {
            tracing::warn!("cannot form caption candidates for {:?}", video_id);
            return Ok(None);
        }

        let scraped;
        let player_response = match player_response {
            Some(response) => Some(response),
            None => {
                scraped = self.fetch_player_response(video_id).await;
                scraped.as_ref()
            }
        };

        let title = player_response
            .and_then(|response| response.title())
            .map(str::to_string);

        // Track-based path: host metadata names the caption track's own URL
        if let Some(response) = player_response {
            let tracks = response.caption_tracks();
            match metadata::select_caption_track(tracks, &self.config.fetch.preferred_language) {
                Some(track) => {
                    tracing::info!(
                        "selected caption track: {} ({})",
                        track.language_code,
                        track.display_name().unwrap_or("unnamed")
                    );

                    if let Some(base_url) = track.base_url.as_deref() {
                        match candidates::track_candidates(base_url) {
                            Ok(list) => {
                                if let Some((text, source_url)) = self.run_cascade(&list).await {
                                    return Ok(Some(self.finish(
                                        video_id,
                                        title,
                                        Some(track.language_code.clone()),
                                        text,
                                        source_url,
                                    )));
                                }
                            }
                            Err(e) => tracing::warn!("unusable caption base URL: {}", e),
                        }
                    } else {
                        tracing::debug!("selected caption track has no base URL");
                    }
                }
                None => tracing::debug!("host metadata carries no caption tracks"),
            }
        }

        // Identifier-based path: fixed timedtext endpoint list
        tracing::info!("falling back to timedtext candidates for {}", video_id);
        let fallback = candidates::timedtext_candidates(video_id);
        if let Some((text, source_url)) = self.run_cascade(&fallback).await {
            return Ok(Some(self.finish(video_id, title, None, text, source_url)));
        }

        tracing::info!("all caption candidates exhausted for {}", video_id);
        Ok(None)
    }

    /// List the caption tracks advertised by a video's watch page
    pub async fn fetch_caption_tracks(&self, video_id: &str) -> Result<Vec<CaptionTrack>> {
        if !utils::is_video_id(video_id) {
            return Err(ScribeError::InvalidVideoId(video_id.to_string()).into());
        }

        Ok(self
            .fetch_player_response(video_id)
            .await
            .map(|response| response.caption_tracks().to_vec())
            .unwrap_or_default())
    }

    /// Fetch the watch page and scrape the embedded player response
    async fn fetch_player_response(&self, video_id: &str) -> Option<PlayerResponse> {
        let url = scrape::watch_page_url(video_id);

        match self.transport.fetch_text(&url).await {
            Ok(fetched) if fetched.is_success() => scrape::scrape_player_response(&fetched.body),
            Ok(fetched) => {
                tracing::debug!("watch page returned HTTP {}", fetched.status);
                None
            }
            Err(e) => {
                tracing::debug!("watch page fetch failed: {}", e);
                None
            }
        }
    }

    /// Try candidates strictly in order, stopping at the first usable transcript
    ///
    /// Every failure mode short of success (transport error, bad status,
    /// blank body, unrecognized format, too-short transcript) advances to the
    /// next candidate.
    async fn run_cascade(&self, list: &[FetchCandidate]) -> Option<(String, String)> {
        for (index, candidate) in list.iter().enumerate() {
            tracing::debug!(
                "trying candidate {}/{}: {}",
                index + 1,
                list.len(),
                utils::preview(&candidate.url, 100)
            );

            let fetched = match self.transport.fetch_text(&candidate.url).await {
                Ok(fetched) => fetched,
                Err(e) => {
                    tracing::debug!("candidate fetch failed: {}", e);
                    continue;
                }
            };

            if !fetched.is_success() {
                tracing::debug!("candidate returned HTTP {}", fetched.status);
                continue;
            }

            if fetched.body.trim().is_empty() {
                tracing::debug!("candidate returned an empty body");
                continue;
            }

            let Some(events) = captions::parse_caption_body(&fetched.body) else {
                tracing::debug!(
                    "candidate body unrecognized: {}",
                    utils::preview(&fetched.body, 100)
                );
                continue;
            };

            let assembled = transcript::assemble(&events);
            let length = assembled.chars().count();
            if length < self.config.fetch.min_transcript_chars {
                tracing::debug!(
                    "assembled transcript too short ({} < {} chars)",
                    length,
                    self.config.fetch.min_transcript_chars
                );
                continue;
            }

            tracing::info!("candidate {} succeeded with {} chars", index + 1, length);
            return Some((assembled, candidate.url.clone()));
        }

        None
    }

    fn finish(
        &self,
        video_id: &str,
        title: Option<String>,
        language: Option<String>,
        text: String,
        source_url: String,
    ) -> Transcript {
        let text = if self.config.cleanup.enabled {
            self.cleaner.clean(&text)
        } else {
            text
        };

        Transcript {
            video_id: video_id.to_string(),
            title,
            language,
            source_url,
            text,
            fetched_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::transport::{FetchedBody, MockCaptionTransport};
    use super::*;
    use mockall::Sequence;

    // Long enough to clear the default length threshold, with no filler
    // words so the cleanup pass leaves it untouched.
    const LONG_TEXT: &str = "the quick brown fox jumps over the lazy dog every evening";

    fn long_json3() -> String {
        format!(r#"{{"events":[{{"segs":[{{"utf8":"{}"}}]}}]}}"#, LONG_TEXT)
    }

    fn player_response_with_track() -> PlayerResponse {
        PlayerResponse::from_json(
            r#"{"captions":{"playerCaptionsTracklistRenderer":{"captionTracks":[
                {"languageCode":"en","baseUrl":"https://x/caps?a=1&variant=punctuated"}
            ]}},"videoDetails":{"videoId":"dQw4w9WgXcQ","title":"A Video"}}"#,
        )
        .unwrap()
    }

    fn ok(body: &str) -> Result<FetchedBody> {
        Ok(FetchedBody { status: 200, body: body.to_string() })
    }

    fn not_found() -> Result<FetchedBody> {
        Ok(FetchedBody { status: 404, body: String::new() })
    }

    #[tokio::test]
    async fn test_first_successful_candidate_short_circuits() {
        let mut transport = MockCaptionTransport::new();
        let mut seq = Sequence::new();

        let body = long_json3();
        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| ok(&body));

        let pipeline = TranscriptPipeline::with_transport(transport, Config::default());
        let player = player_response_with_track();
        let result = pipeline
            .fetch_transcript("dQw4w9WgXcQ", Some(&player))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.text, LONG_TEXT);
        assert_eq!(result.language.as_deref(), Some("en"));
        assert_eq!(result.title.as_deref(), Some("A Video"));
        assert!(result.source_url.contains("fmt=json3"));
    }

    #[tokio::test]
    async fn test_cascade_issues_exactly_k_fetches() {
        // candidate 3 is the first to yield a long-enough transcript; exactly
        // three fetches go out and later candidates are never touched
        let mut transport = MockCaptionTransport::new();
        let mut seq = Sequence::new();

        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| not_found());
        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(anyhow::anyhow!("connection reset")));

        let body = long_json3();
        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| ok(&body));

        let pipeline = TranscriptPipeline::with_transport(transport, Config::default());
        let player = player_response_with_track();
        let result = pipeline
            .fetch_transcript("dQw4w9WgXcQ", Some(&player))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.text, LONG_TEXT);
    }

    #[tokio::test]
    async fn test_short_transcript_advances_the_cascade() {
        let mut transport = MockCaptionTransport::new();
        let mut seq = Sequence::new();

        // parses fine but assembles to 11 chars, under the threshold
        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ok(r#"{"events":[{"segs":[{"utf8":"Hello world"}]}]}"#));

        let body = long_json3();
        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| ok(&body));

        let pipeline = TranscriptPipeline::with_transport(transport, Config::default());
        let player = player_response_with_track();
        let result = pipeline
            .fetch_transcript("dQw4w9WgXcQ", Some(&player))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.text, LONG_TEXT);
    }

    #[tokio::test]
    async fn test_exhausted_candidates_return_none() {
        let mut transport = MockCaptionTransport::new();

        // 4 track candidates plus 9 timedtext fallbacks, all failing
        transport
            .expect_fetch_text()
            .times(13)
            .returning(|_| not_found());

        let pipeline = TranscriptPipeline::with_transport(transport, Config::default());
        let player = player_response_with_track();
        let result = pipeline
            .fetch_transcript("dQw4w9WgXcQ", Some(&player))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_no_metadata_falls_back_to_timedtext() {
        let mut transport = MockCaptionTransport::new();
        let mut seq = Sequence::new();

        // watch page yields no player data
        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| ok("<html><body>no player data</body></html>"));

        let body = long_json3();
        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| ok(&body));

        let pipeline = TranscriptPipeline::with_transport(transport, Config::default());
        let result = pipeline
            .fetch_transcript("dQw4w9WgXcQ", None)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.text, LONG_TEXT);
        assert_eq!(result.language, None);
        assert!(result.source_url.contains("type=asr"));
    }

    #[tokio::test]
    async fn test_vtt_fallback_body_parses_end_to_end() {
        let mut transport = MockCaptionTransport::new();
        let mut seq = Sequence::new();

        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| not_found());

        let vtt = format!("WEBVTT\n\n00:00:01.000 --> 00:00:05.000\n{}\n", LONG_TEXT);
        transport
            .expect_fetch_text()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| ok(&vtt));

        let pipeline = TranscriptPipeline::with_transport(transport, Config::default());
        let player = player_response_with_track();
        let result = pipeline
            .fetch_transcript("dQw4w9WgXcQ", Some(&player))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.text, LONG_TEXT);
    }

    #[tokio::test]
    async fn test_invalid_video_id_makes_no_network_calls() {
        // mock with no expectations panics on any call
        let transport = MockCaptionTransport::new();
        let pipeline = TranscriptPipeline::with_transport(transport, Config::default());

        let result = pipeline.fetch_transcript("not a video id", None).await.unwrap();
        assert!(result.is_none());
    }
}
