//! Flairscope - political compass flair distribution grapher
//!
//! A CLI tool that samples post and comment flairs from Reddit
//! communities, tallies them into the ten compass quadrants, and renders
//! the distribution as a multi-panel PNG figure.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (connection, config, unknown flair, render failure)

mod cli;
mod compass;
mod config;
mod metrics;
mod quadrant;
mod reddit;

use anyhow::{Context, Result};
use chrono::Local;
use cli::Args;
use compass::{CompassData, Figure, FigureRow, Magnitudes, Panel};
use config::Credentials;
use indicatif::{ProgressBar, ProgressStyle};
use metrics::CommentStats;
use quadrant::{Quadrant, Tally};
use reddit::{RedditClient, Sort};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};
use tracing_subscriber::FmtSubscriber;

/// Metric panels per community row.
const PANELS_PER_ROW: u64 = 5;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Flairscope v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Run failed: {}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a template app.yaml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  app.yaml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    std::fs::write(path, Credentials::template_yaml()).context("Failed to write app.yaml")?;

    println!("✅ Created app.yaml template.");
    println!("   Fill in your Reddit script-app credentials.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete sampling and rendering workflow.
async fn run(args: Args) -> Result<()> {
    let start_time = Instant::now();

    let credentials = load_credentials(&args)?;

    println!("🔑 Authenticating as u/{}", credentials.username);
    let client = RedditClient::connect(&credentials, Duration::from_secs(args.timeout)).await?;

    let progress = panel_progress(&args);

    let mut rows = Vec::new();
    for (index, subreddit) in args.subreddits.iter().enumerate() {
        println!("📊 Sampling r/{}", subreddit);
        let last_row = index + 1 == args.subreddits.len();
        let row = collect_row(&client, subreddit, &args, last_row, &progress).await?;
        rows.push(row);
    }
    progress.finish_and_clear();

    println!("🖼️  Rendering figure...");
    let figure = Figure {
        title: "Flair distribution on posts and comments and average comment length".to_string(),
        footer: format!(
            "Wall of text for >{} words. {}",
            args.wall_of_text,
            Local::now().date_naive()
        ),
        rows,
    };
    compass::render_figure(&args.output, &figure)?;

    println!(
        "\n✅ Done in {:.1}s. Figure saved to: {}",
        start_time.elapsed().as_secs_f64(),
        args.output.display()
    );

    Ok(())
}

/// Collect the five metric panels for one community.
async fn collect_row(
    client: &RedditClient,
    subreddit: &str,
    args: &Args,
    last_row: bool,
    progress: &ProgressBar,
) -> Result<FigureRow> {
    let hot = metrics::listing_flair_tally(client, subreddit, Sort::Hot, args.count).await?;
    progress.inc(1);

    let top = metrics::listing_flair_tally(client, subreddit, Sort::Top, args.count).await?;
    progress.inc(1);

    let comments = metrics::comment_flair_tally(client, subreddit, args.count).await?;
    progress.inc(1);

    let lengths = metrics::average_comment_words(client, subreddit, args.count).await?;
    progress.inc(1);

    let walls =
        metrics::wall_of_text_fraction(client, subreddit, args.count, args.wall_of_text).await?;
    progress.inc(1);

    let panels = vec![
        tally_panel("Hot", &hot, format!("Latest {} posts", hot.total())),
        tally_panel("Top", &top, format!("Latest {} posts", top.total())),
        tally_panel(
            "Comments",
            &comments,
            format!("Latest {} comments", comments.total()),
        ),
        stats_panel(
            "Comment Length [words]",
            &lengths,
            |value| format!("{:.1}", value),
            false,
        ),
        stats_panel(
            "%age comments are wall of text",
            &walls,
            |value| format!("{:.1}%", 100.0 * value),
            // Only the very last panel gets the directional callouts.
            last_row,
        ),
    ];

    Ok(FigureRow {
        heading: format!("r/{}", subreddit),
        panels,
    })
}

/// Build a panel from a flair tally: patch sizes are fractions of the
/// total and labels are percentage shares.
fn tally_panel(title: &str, tally: &Tally, footnote: String) -> Panel {
    let compass = (tally.total() > 0).then(|| {
        let fractions = tally.fractions();
        let mut labels: [String; Quadrant::COUNT] = Default::default();
        for quadrant in Quadrant::ALL {
            labels[quadrant.index()] = format!("{:.1}%", 100.0 * fractions[quadrant.index()]);
        }
        CompassData {
            magnitudes: Magnitudes::from_values(fractions),
            labels,
            callouts: false,
        }
    });

    Panel {
        title: title.to_string(),
        footnote,
        compass,
    }
}

/// Build a panel from per-quadrant comment statistics.
fn stats_panel(
    title: &str,
    stats: &CommentStats,
    format_label: impl Fn(f64) -> String,
    callouts: bool,
) -> Panel {
    let mut labels: [String; Quadrant::COUNT] = Default::default();
    for quadrant in Quadrant::ALL {
        labels[quadrant.index()] = format_label(stats.per_quadrant[quadrant.index()]);
    }

    Panel {
        title: title.to_string(),
        footnote: format!("{} comments on latest posts", stats.comments_seen),
        compass: Some(CompassData {
            magnitudes: Magnitudes::from_values(stats.per_quadrant),
            labels,
            callouts,
        }),
    }
}

/// Progress bar over all panels, hidden in quiet mode.
fn panel_progress(args: &Args) -> ProgressBar {
    if args.quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(args.subreddits.len() as u64 * PANELS_PER_ROW);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Load credentials from the explicit path or the default location.
fn load_credentials(args: &Args) -> Result<Credentials> {
    if let Some(ref config_path) = args.config {
        info!("Loading credentials from: {}", config_path.display());
        return Credentials::load(config_path);
    }

    match Credentials::load_default()? {
        Some(credentials) => {
            info!("Loaded credentials from {}", config::DEFAULT_CONFIG_FILE);
            Ok(credentials)
        }
        None => anyhow::bail!(
            "No credentials found. Create {} (try --init-config) or pass --config",
            config::DEFAULT_CONFIG_FILE
        ),
    }
}
