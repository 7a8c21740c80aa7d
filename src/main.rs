//! # GQ Feed
//!
//! Builds a full-content feed from a GQ Magazine listing page (a section
//! such as `sexe/news` or an author page such as
//! `journaliste/maia-mazaurette`).
//!
//! The site offers no stable markup hooks, so everything is discovered from
//! structure: article links by their author marker, article bodies by
//! climbing from the headline until enough text has accumulated.
//!
//! ## Usage
//!
//! ```sh
//! gq_feed --page sexe/news > news.xml
//! RUST_LOG=debug gq_feed --page sexe/news --format json -o news.json
//! ```
//!
//! ## Architecture
//!
//! 1. **Listing**: fetch the listing page and discover article candidates
//! 2. **Extraction**: fetch each article (cached), locate and clean its body
//! 3. **Output**: render the feed as RSS or JSON

use clap::Parser;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, OutputFormat};
use config::FeedConfig;
use error::Result;
use fetch::{CachedFetcher, HttpFetcher};
use models::Feed;
use scrapers::rules::ExtractionRules;

#[tokio::main]
async fn main() -> ExitCode {
    // --- Tracing init (stderr: stdout carries the feed) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Feed generation failed");
            ExitCode::FAILURE
        }
    }
}

#[instrument(level = "info", skip_all)]
async fn run(args: &Cli) -> Result<()> {
    let start_time = std::time::Instant::now();
    let config = FeedConfig::load(args).await?;
    info!(origin = %config.origin, page = %config.page, header_size = config.header_size, "Configuration resolved");

    let rules = ExtractionRules::new()?;
    let http = HttpFetcher::new(config.timeout)?;
    let article_fetcher = CachedFetcher::new(http.clone(), config.cache_ttl);

    let items = scrapers::collect_feed(&http, &article_fetcher, &config, &rules).await?;

    let feed = Feed {
        title: format!("GQMagazine - {}", config.page),
        link: config.listing_url(),
        description: format!("GQMagazine section {}", config.page),
        items,
    };

    let rendered = match args.format {
        OutputFormat::Rss => outputs::rss::render(&feed)?,
        OutputFormat::Json => outputs::json::render(&feed)?,
    };
    outputs::deliver(&rendered, args.output.as_deref()).await?;

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        items = feed.items.len(),
        "Execution complete"
    );
    Ok(())
}
