//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// Flairscope - political compass flair distribution grapher
///
/// Samples post and comment flairs from Reddit communities, tallies
/// them into the ten compass quadrants, and renders the distribution
/// as a multi-panel PNG figure.
///
/// Examples:
///   flairscope
///   flairscope --subreddits PoliticalCompassMemes --count 200
///   flairscope --config ~/secrets/app.yaml --output out.png
///   flairscope --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Communities to sample, without the r/ prefix (comma-separated)
    ///
    /// Each community becomes one row of panels in the figure.
    #[arg(
        short,
        long,
        value_name = "NAMES",
        value_delimiter = ',',
        default_value = "PoliticalCompass,PoliticalCompassMemes"
    )]
    pub subreddits: Vec<String>,

    /// Number of posts to inspect per listing
    ///
    /// Comment metrics still look at `count` posts, inspecting all their
    /// top-level comments.
    #[arg(short = 'n', long, default_value = "500", value_name = "COUNT")]
    pub count: u32,

    /// Word count above which a comment is considered a wall of text
    #[arg(long, default_value = "100", value_name = "WORDS")]
    pub wall_of_text: usize,

    /// Output image path
    #[arg(short, long, default_value = "pcm.png", value_name = "FILE")]
    pub output: PathBuf,

    /// Path to the credentials file
    ///
    /// If not specified, looks for app.yaml in the current directory.
    /// Can also be set via the FLAIRSCOPE_CONFIG env var.
    #[arg(short, long, value_name = "FILE", env = "FLAIRSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    pub timeout: u64,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output, no progress bar)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a template app.yaml credentials file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if self.subreddits.is_empty() {
            return Err("At least one subreddit is required".to_string());
        }

        if self.subreddits.iter().any(|name| name.trim().is_empty()) {
            return Err("Subreddit names must not be empty".to_string());
        }

        if self.count == 0 {
            return Err("Count must be at least 1".to_string());
        }

        if self.wall_of_text == 0 {
            return Err("Wall of text threshold must be at least 1 word".to_string());
        }

        if self.timeout == 0 {
            return Err("Timeout must be at least 1 second".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}
