use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ytscribe",
    about = "ytscribe - Fetch and clean YouTube caption transcripts",
    version,
    long_about = "A CLI tool that extracts a video's caption track, trying multiple caption URL formats until one yields a usable transcript, then cleans the result into readable prose."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a video's caption transcript
    Fetch {
        /// Watch URL or bare video identifier
        #[arg(value_name = "URL_OR_ID")]
        video: String,

        /// Player-response JSON file to use instead of scraping the watch page
        #[arg(long, value_name = "FILE")]
        player_response: Option<PathBuf>,

        /// Output file path (prints to console if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Preferred caption track language code (overrides config)
        #[arg(short, long, value_name = "LANG")]
        language: Option<String>,

        /// Skip the transcript cleanup pass
        #[arg(long)]
        raw: bool,

        /// Template file for the prompt output format
        #[arg(long, value_name = "FILE")]
        template: Option<PathBuf>,
    },

    /// List the caption tracks a video advertises
    Tracks {
        /// Watch URL or bare video identifier
        #[arg(value_name = "URL_OR_ID")]
        video: String,
    },

    /// Show or write the configuration file
    Config {
        /// Show current configuration
        #[arg(short, long)]
        show: bool,
    },
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormat {
    /// Plain transcript text
    Text,
    /// JSON with provenance metadata
    Json,
    /// Transcript rendered into a summary prompt
    Prompt,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Prompt => write!(f, "prompt"),
        }
    }
}
