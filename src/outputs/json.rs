//! JSON rendering of the feed.
//!
//! Items keep the record shape `{author, title, url, publishedAt, content}`.

use crate::error::{BridgeError, Result};
use crate::models::Feed;
use tracing::{debug, instrument};

/// Render the feed as pretty-printed JSON.
#[instrument(level = "info", skip_all, fields(items = feed.items.len()))]
pub fn render(feed: &Feed) -> Result<String> {
    let json = serde_json::to_string_pretty(feed).map_err(|e| BridgeError::Output(e.to_string()))?;
    debug!(bytes = json.len(), "Rendered JSON feed");
    Ok(json)
}
