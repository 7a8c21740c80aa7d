//! Feed serialization and delivery.
//!
//! # Submodules
//!
//! - [`json`]: the feed as pretty-printed JSON records
//! - [`rss`]: the feed as an RSS 2.0 document
//!
//! Rendered feeds go to a file when a path is given, stdout otherwise.

pub mod json;
pub mod rss;

use crate::error::{BridgeError, Result};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, instrument};

/// Write a rendered feed to `path`, or to stdout when `path` is `None`.
#[instrument(level = "info", skip(rendered))]
pub async fn deliver(rendered: &str, path: Option<&str>) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, rendered)
                .await
                .map_err(|e| BridgeError::Output(format!("{path}: {e}")))?;
            info!(%path, bytes = rendered.len(), "Wrote feed");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(rendered.as_bytes())
                .await
                .map_err(|e| BridgeError::Output(e.to_string()))?;
            stdout
                .flush()
                .await
                .map_err(|e| BridgeError::Output(e.to_string()))?;
        }
    }
    Ok(())
}
