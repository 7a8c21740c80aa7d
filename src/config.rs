//! Runtime configuration: site origin, listing page and extraction knobs.
//!
//! Values are resolved from, in increasing priority, built-in defaults, an
//! optional YAML file and the command line.
//!
//! ```yaml
//! domain: www.gqmagazine.fr
//! page: sexe/news
//! headerSize: 300
//! cacheTtlSecs: 7200
//! ```

use crate::cli::Cli;
use crate::error::{BridgeError, Result};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Production hostname used when no domain is configured.
pub const DEFAULT_DOMAIN: &str = "www.gqmagazine.fr";
/// Default ascent threshold for locating the article container.
pub const DEFAULT_HEADER_SIZE: usize = 300;
/// Default lifetime of cached article pages (2h).
pub const DEFAULT_CACHE_TTL_SECS: u64 = 7200;
/// Default HTTP timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Keys accepted in the YAML config file. All optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileConfig {
    pub domain: Option<String>,
    pub page: Option<String>,
    pub header_size: Option<usize>,
    pub cache_ttl_secs: Option<u64>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedConfig {
    /// Scheme + host, without trailing slash, e.g. `https://www.gqmagazine.fr`.
    pub origin: String,
    /// Listing page path without surrounding slashes, e.g. `sexe/news`.
    pub page: String,
    pub header_size: usize,
    pub cache_ttl: Duration,
    pub timeout: Duration,
}

impl FeedConfig {
    /// Resolve configuration from the CLI, reading `--config` when given.
    #[instrument(level = "info", skip_all)]
    pub async fn load(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => {
                let raw = tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| BridgeError::Config(format!("{path}: {e}")))?;
                debug!(%path, "Loaded config file");
                parse_file_config(&raw)?
            }
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }

    /// Merge CLI values over file values over defaults.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let domain = cli
            .domain
            .clone()
            .or(file.domain)
            .unwrap_or_else(|| DEFAULT_DOMAIN.to_string());
        let page = cli
            .page
            .clone()
            .or(file.page)
            .ok_or_else(|| BridgeError::Config("a listing page is required (--page)".into()))?;
        let page = page.trim().trim_matches('/').to_string();
        if page.is_empty() {
            return Err(BridgeError::Config("listing page must not be empty".into()));
        }

        Ok(Self {
            origin: coerce_origin(&domain)?,
            page,
            header_size: cli
                .header_size
                .or(file.header_size)
                .unwrap_or(DEFAULT_HEADER_SIZE),
            cache_ttl: Duration::from_secs(
                cli.cache_ttl_secs
                    .or(file.cache_ttl_secs)
                    .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            ),
            timeout: Duration::from_secs(
                cli.timeout_secs
                    .or(file.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        })
    }

    /// URL of the listing page.
    pub fn listing_url(&self) -> String {
        format!("{}/{}", self.origin, self.page)
    }
}

pub fn parse_file_config(raw: &str) -> Result<FileConfig> {
    serde_yaml::from_str(raw).map_err(|e| BridgeError::Config(e.to_string()))
}

/// Turn a configured domain into an origin.
///
/// Empty input falls back to [`DEFAULT_DOMAIN`]; input without `://` is
/// served over https. The trailing slash is dropped.
pub fn coerce_origin(domain: &str) -> Result<String> {
    let domain = domain.trim();
    let domain = if domain.is_empty() { DEFAULT_DOMAIN } else { domain };
    let origin = if domain.contains("://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };
    let origin = origin.trim_end_matches('/').to_string();

    let parsed = Url::parse(&origin).map_err(|e| BridgeError::Config(format!("{origin}: {e}")))?;
    if parsed.host_str().is_none() {
        return Err(BridgeError::Config(format!("{origin}: missing host")));
    }
    Ok(origin)
}
