//! Command-line interface definitions for the GQ feed builder.
//!
//! Every option can also come from a YAML file passed with `--config`;
//! values given on the command line take precedence over the file.

use clap::{Parser, ValueEnum};

/// Output format of the generated feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// RSS 2.0 document.
    #[default]
    Rss,
    /// Pretty-printed JSON records.
    Json,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Feed of the news section, RSS on stdout
/// gq_feed --page sexe/news
///
/// # Journalist page, JSON written to a file
/// gq_feed --page journaliste/maia-mazaurette --format json -o maia.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Listing page path to scan, e.g. `sexe/news`
    #[arg(short, long, env = "GQ_PAGE")]
    pub page: Option<String>,

    /// Site domain or origin; a bare hostname is served over https
    #[arg(short, long, env = "GQ_DOMAIN")]
    pub domain: Option<String>,

    /// Minimal amount of text, beyond the title, an article container must hold
    #[arg(long)]
    pub header_size: Option<usize>,

    /// Lifetime of cached article pages, in seconds
    #[arg(long)]
    pub cache_ttl_secs: Option<u64>,

    /// HTTP request timeout, in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Feed format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Rss)]
    pub format: OutputFormat,

    /// Write the feed to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,
}
