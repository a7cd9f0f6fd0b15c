//! ytscribe - A Rust CLI tool for fetching YouTube caption transcripts
//!
//! This library locates a video's caption tracks from the watch page's player
//! data, tries an ordered list of caption URL variants until one yields a
//! usable body, parses the response (json3 or WebVTT) into caption events,
//! and assembles and cleans the events into a single transcript string.

pub mod captions;
pub mod cli;
pub mod config;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod prompt;
pub mod transcript;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use metadata::{CaptionTrack, PlayerResponse};
pub use pipeline::{Transcript, TranscriptPipeline};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to ytscribe
#[derive(thiserror::Error, Debug)]
pub enum ScribeError {
    #[error("Unrecognized video URL or identifier: {0}")]
    InvalidVideoId(String),

    #[error("Player response is not valid JSON: {0}")]
    InvalidPlayerResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
