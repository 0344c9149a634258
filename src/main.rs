//! Sumi-Scrape main entry point
//!
//! This is a thin command-line driver around the scraping library.

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use sumi_scrape::config::{load_config, validate, Config};
use sumi_scrape::{FetchResult, Scraper};
use tracing_subscriber::EnvFilter;

/// Sumi-Scrape: a polite page fetcher and content extractor
///
/// Fetches each URL while respecting robots.txt and per-origin rate limits,
/// then prints the extracted title, metadata, text and links as JSON.
#[derive(Parser, Debug)]
#[command(name = "sumi-scrape")]
#[command(version = "1.0.0")]
#[command(about = "A polite page fetcher and content extractor", long_about = None)]
struct Cli {
    /// URLs to scrape
    #[arg(value_name = "URL", required = true)]
    urls: Vec<String>,

    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Render pages with a headless browser
    #[arg(long)]
    js: bool,

    /// Keep full body text instead of summarizing long pages
    #[arg(long)]
    no_summary: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// One line of output: the URL and what was scraped from it
#[derive(Serialize)]
struct ScrapedPage<'a> {
    url: &'a str,
    #[serde(flatten)]
    result: &'a FetchResult,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if cli.js {
        config.render.enabled = true;
    }
    if cli.no_summary {
        config.scraper.summarize = false;
    }
    validate(&config).context("Invalid configuration")?;

    let scraper = Scraper::new(config).context("Failed to build scraper")?;
    let results = scraper.scrape_many(cli.urls.iter().cloned()).await;

    let pages: Vec<ScrapedPage<'_>> = cli
        .urls
        .iter()
        .filter_map(|url| {
            results.get(url).map(|result| ScrapedPage {
                url: url.as_str(),
                result,
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&pages)?);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the JSON output.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_scrape=info,warn"),
            1 => EnvFilter::new("sumi_scrape=debug,info"),
            2 => EnvFilter::new("sumi_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
