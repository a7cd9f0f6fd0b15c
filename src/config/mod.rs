use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ScribeError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Network fetch settings
    pub fetch: FetchConfig,

    /// Transcript cleanup settings
    pub cleanup: CleanupConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User agent sent with caption and watch-page requests
    pub user_agent: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Preferred caption track language code
    pub preferred_language: String,

    /// Minimum assembled length for a transcript to count as a success.
    /// Shorter results advance the cascade to the next candidate.
    pub min_transcript_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupConfig {
    /// Apply the cleanup pass to fetched transcripts
    pub enabled: bool,

    /// Word-phrase window for the repeated-phrase dedup
    pub dedup_window: usize,

    /// Minimum phrase length in characters for dedup to apply
    pub min_phrase_chars: usize,

    /// Filler words and phrases removed case-insensitively
    pub filler_words: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig {
                user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
                timeout_seconds: 15,
                preferred_language: "en".to_string(),
                min_transcript_chars: 50,
            },
            cleanup: CleanupConfig::default(),
        }
    }
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dedup_window: 3,
            min_phrase_chars: 6,
            filler_words: ["um", "uh", "ah", "like", "you know", "so", "well"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from file or create default
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs_err::read_to_string(&config_path)
                .context("Failed to read config file")?;

            let config: Config = serde_yaml::from_str(&content)
                .context("Failed to parse config file")?;

            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save().await?;
            Ok(config)
        }
    }

    /// Save configuration to file
    pub async fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs_err::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs_err::write(&config_path, content)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get configuration file path
    pub fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?;

        Ok(config_dir.join("ytscribe").join("config.yaml"))
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.fetch.timeout_seconds == 0 {
            return Err(ScribeError::ConfigError("timeout_seconds must be non-zero".to_string()).into());
        }
        if self.fetch.min_transcript_chars == 0 {
            return Err(ScribeError::ConfigError("min_transcript_chars must be non-zero".to_string()).into());
        }
        if self.cleanup.dedup_window == 0 {
            return Err(ScribeError::ConfigError("dedup_window must be non-zero".to_string()).into());
        }
        Ok(())
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Preferred Language: {}", self.fetch.preferred_language);
        println!("  Timeout: {}s", self.fetch.timeout_seconds);
        println!("  Minimum Transcript Length: {} chars", self.fetch.min_transcript_chars);
        println!("  Cleanup Enabled: {}", self.cleanup.enabled);
        println!("  Dedup Window: {} words", self.cleanup.dedup_window);
        println!("  Filler Words: {}", self.cleanup.filler_words.join(", "));
    }
}
