use serde::Deserialize;

use crate::{Result, ScribeError};

pub mod scrape;

/// Player data embedded in the watch page
///
/// Every level below the root is optional; a missing key anywhere along the
/// captions path means "no host metadata", which is a normal outcome and not
/// an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub captions: Option<Captions>,
    pub video_details: Option<VideoDetails>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Captions {
    pub player_captions_tracklist_renderer: Option<TracklistRenderer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracklistRenderer {
    pub caption_tracks: Option<Vec<CaptionTrack>>,
}

/// One available caption track from the tracklist renderer
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    pub language_code: String,
    pub name: Option<TrackName>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackName {
    pub simple_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetails {
    pub video_id: Option<String>,
    pub title: Option<String>,
}

impl PlayerResponse {
    /// Decode a player response from raw JSON text
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| ScribeError::InvalidPlayerResponse(e.to_string()).into())
    }

    /// The caption tracks, or an empty slice when any key along the path is absent
    pub fn caption_tracks(&self) -> &[CaptionTrack] {
        self.captions
            .as_ref()
            .and_then(|c| c.player_captions_tracklist_renderer.as_ref())
            .and_then(|r| r.caption_tracks.as_deref())
            .unwrap_or_default()
    }

    pub fn title(&self) -> Option<&str> {
        self.video_details.as_ref().and_then(|d| d.title.as_deref())
    }
}

impl CaptionTrack {
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_ref().and_then(|n| n.simple_text.as_deref())
    }
}

/// Pick the best caption track from a tracklist
///
/// Prefers a track whose language code equals or starts with the preferred
/// code; otherwise falls back to the first track in source order.
pub fn select_caption_track<'a>(
    tracks: &'a [CaptionTrack],
    preferred: &str,
) -> Option<&'a CaptionTrack> {
    tracks
        .iter()
        .find(|track| {
            track.language_code == preferred || track.language_code.starts_with(preferred)
        })
        .or_else(|| tracks.first())
}
