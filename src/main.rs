use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ytscribe::cli::{Cli, Commands};
use ytscribe::config::Config;
use ytscribe::metadata::PlayerResponse;
use ytscribe::pipeline::TranscriptPipeline;
use ytscribe::{output, utils};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose { "ytscribe=debug" } else { "ytscribe=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Fetch {
            video,
            player_response,
            output: output_path,
            format,
            language,
            raw,
            template,
        } => {
            let video_id = utils::extract_video_id(&video)?;

            let mut config = Config::load().await?;
            if let Some(language) = language {
                config.fetch.preferred_language = language;
            }
            if raw {
                config.cleanup.enabled = false;
            }

            // Host metadata from a saved file, when the caller has one
            let player_response = match player_response {
                Some(path) => {
                    let text = fs_err::read_to_string(&path)
                        .context("Failed to read player response file")?;
                    Some(PlayerResponse::from_json(&text)?)
                }
                None => None,
            };

            let template = match template {
                Some(path) => Some(
                    fs_err::read_to_string(&path).context("Failed to read template file")?,
                ),
                None => None,
            };

            let pipeline = TranscriptPipeline::new(config)?;

            tracing::info!("Fetching transcript for video: {} ({} output)", video_id, format);

            let progress = (!cli.quiet).then(|| {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg}")
                        .unwrap(),
                );
                spinner.set_message("Fetching transcript...");
                spinner.enable_steady_tick(std::time::Duration::from_millis(100));
                spinner
            });

            let result = pipeline
                .fetch_transcript(&video_id, player_response.as_ref())
                .await?;

            if let Some(progress) = progress {
                progress.finish_and_clear();
            }

            match result {
                Some(transcript) => match output_path {
                    Some(path) => {
                        output::save_to_file(&transcript, &path, &format, template.as_deref())
                            .await?;
                        println!("Transcript saved to: {}", path.display());
                    }
                    None => {
                        output::print_to_console(&transcript, &format, template.as_deref())?;
                    }
                },
                None => {
                    eprintln!(
                        "{}",
                        console::style("No transcript available for this video").yellow()
                    );
                    std::process::exit(1);
                }
            }
        }
        Commands::Tracks { video } => {
            let video_id = utils::extract_video_id(&video)?;
            let config = Config::load().await?;
            let pipeline = TranscriptPipeline::new(config)?;

            let tracks = pipeline.fetch_caption_tracks(&video_id).await?;
            if tracks.is_empty() {
                println!("No caption tracks advertised for {}", video_id);
            } else {
                println!("Caption tracks for {}:", video_id);
                for track in tracks {
                    println!(
                        "  • {} ({})",
                        track.language_code,
                        track.display_name().unwrap_or("unnamed")
                    );
                }
            }
        }
        Commands::Config { show } => {
            let config = Config::load().await?;
            if show {
                config.display();
            } else {
                config.save().await?;
                println!("Configuration written to: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
