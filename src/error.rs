//! Error taxonomy for the feed pipeline.
//!
//! Listing-page errors abort the run. Article-level errors are caught per
//! candidate and replaced by a visible placeholder (see
//! [`crate::scrapers::PLACEHOLDER_CONTENT`]).

/// Errors raised while building the feed.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// Network or transport failure while fetching a page.
    #[error("could not request {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// An expected structural landmark is missing from the document.
    #[error("page structure not recognised: {0}")]
    Structure(String),

    /// No element's text exactly matches the expected article title.
    #[error("no element matches title {0:?}")]
    MissingContent(String),

    /// Invalid or incomplete configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Feed serialization or writing failed.
    #[error("could not write feed: {0}")]
    Output(String),
}

impl BridgeError {
    pub fn fetch(url: &str, reason: impl std::fmt::Display) -> Self {
        BridgeError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BridgeError>;
