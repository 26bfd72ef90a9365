//! Speaker Harvest main entry point
//!
//! This is the command-line interface for the Speaker Harvest scraper.

use anyhow::Context;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use speaker_harvest::config::{load_config_with_hash, load_default_config, Config};
use speaker_harvest::crawler::{Harvester, HttpFetcher, Progress};
use speaker_harvest::output::{print_run_stats, JsonFileSink, OutputSink};
use speaker_harvest::Speaker;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Speaker Harvest: collects speakers and their talks from a conference site
///
/// Repeatedly samples the site's speaker listing page until every speaker the
/// site reports has been seen, follows each speaker to their talks, and
/// writes the result as a JSON array.
#[derive(Parser, Debug)]
#[command(name = "speaker-harvest")]
#[command(version)]
#[command(about = "Harvests speakers and talks from a conference site", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Output file, overriding the configured path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be harvested without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // A missing .env file is fine
    dotenvy::dotenv().ok();

    let mut config = load(&cli)?;
    if let Some(output) = &cli.output {
        config.output.path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_harvest(&config, cli.quiet).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("speaker_harvest=info,warn"),
            1 => EnvFilter::new("speaker_harvest=debug,info"),
            2 => EnvFilter::new("speaker_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the config file if one was given, else the built-in defaults
fn load(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => load_default_config().context("Failed to build default configuration"),
    }
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) {
    println!("=== Speaker Harvest Dry Run ===\n");

    println!("Site:");
    println!(
        "  Listing page: {}",
        config.site.base_url.as_deref().unwrap_or("<unset>")
    );
    println!("  Include images: {}", config.site.include_images);

    println!("\nCrawler Configuration:");
    println!("  Max iterations: {}", config.crawler.max_iterations);
    println!("  Talk concurrency: {}", config.crawler.talk_concurrency);
    println!("  Request delay: {}ms", config.crawler.request_delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);

    println!("\n✓ Configuration is valid");
}

/// Runs the harvest and writes the output file
async fn handle_harvest(config: &Config, quiet: bool) -> anyhow::Result<()> {
    let fetcher = HttpFetcher::new(&config.user_agent, &config.crawler)?;
    let mut harvester = Harvester::new(config, fetcher)?;

    let progress = BarProgress::new(quiet)?;
    if let Err(e) = harvester.run(&progress).await {
        progress.bar.abandon();
        tracing::error!("Harvest failed: {}", e);
        return Err(e.into());
    }

    let sink = JsonFileSink::new(&config.output.path);
    sink.write(harvester.speakers())
        .with_context(|| format!("Failed to write {}", sink.describe()))?;

    if !quiet {
        print_run_stats(harvester.stats());
        println!("✓ Speakers written to: {}", sink.describe());
    }

    Ok(())
}

/// Progress bar over the number of collected speakers
struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    fn new(hidden: bool) -> anyhow::Result<Self> {
        let bar = if hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?,
        );
        Ok(Self { bar })
    }
}

impl Progress for BarProgress {
    fn started(&self, target: usize) {
        self.bar.set_length(target as u64);
    }

    fn speaker_added(&self, speaker: &Speaker, collected: usize) {
        self.bar.set_position(collected as u64);
        self.bar.set_message(speaker.name.clone());
    }

    fn finished(&self, _collected: usize) {
        self.bar.finish_with_message("done");
    }
}
