//! Listing page scan.
//!
//! The site exposes no stable class names, so articles are discovered from
//! structural cues only: every link inside `<main>` whose surrounding block
//! carries an author marker is an article. Its block also provides the
//! headline (first `h2`, else `h3`) and the publication `time`.

use super::rules::ExtractionRules;
use super::rendered_text;
use super::urls::normalize;
use crate::error::{BridgeError, Result};
use crate::models::ArticleCandidate;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::{debug, info, instrument};
use url::Url;

/// Tags treated as the block an anchor belongs to. Headings count, so a
/// link wrapped in its own `h2` is judged by the heading alone.
const BLOCK_TAGS: &[&str] = &[
    "div", "article", "section", "li", "header", "footer", "aside", "main", "p", "figure",
    "ul", "ol", "nav", "body", "h1", "h2", "h3", "h4", "h5", "h6", "td", "dd", "blockquote",
    "table",
];

/// Path suffix of a paginated listing (`2`, `page/2`).
static PAGINATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:page/)?\d+$").unwrap());

/// Scan a listing document for article candidates, in document order.
///
/// Fails with [`BridgeError::Structure`] when the document has no main
/// region. Links without an author marker nearby are dropped silently; they
/// are category or navigation links.
#[instrument(level = "info", skip(document, rules))]
pub fn list_candidates(
    document: &Html,
    page: &str,
    origin: &str,
    rules: &ExtractionRules,
) -> Result<Vec<ArticleCandidate>> {
    let main = document
        .select(&rules.main_region)
        .next()
        .ok_or_else(|| BridgeError::Structure("listing page has no <main> region".into()))?;

    let mut candidates = Vec::new();
    for anchor in main.select(&rules.anchor) {
        let href = anchor.value().attr("href").unwrap_or_default();
        if is_self_link(href, page) {
            debug!(%href, "Skipping self or pagination link");
            continue;
        }
        let Some(block) = enclosing_block(anchor) else {
            continue;
        };
        let Some(author) = block.select(&rules.author_marker).next() else {
            debug!(%href, "No author marker; not an article link");
            continue;
        };
        let Some(title) = find_title(block, rules) else {
            debug!(%href, "No headline near link; skipping");
            continue;
        };
        let published_at = block
            .select(&rules.time)
            .next()
            .and_then(|time| time.value().attr("datetime"))
            .and_then(parse_datetime);
        if published_at.is_none() {
            debug!(%href, "No usable publication datetime");
        }

        candidates.push(ArticleCandidate::new(
            rendered_text(author).trim().to_string(),
            title,
            normalize(href, origin),
            published_at,
        ));
    }

    info!(count = candidates.len(), "Listed article candidates");
    Ok(candidates)
}

/// First non-blank heading of the block, in the configured priority order.
///
/// The text is kept as rendered, surrounding whitespace included: the
/// article page is searched for an element with exactly this text.
fn find_title(block: ElementRef, rules: &ExtractionRules) -> Option<String> {
    rules.title_headings.iter().find_map(|selector| {
        block
            .select(selector)
            .next()
            .map(rendered_text)
            .filter(|text| !text.trim().is_empty())
    })
}

/// Nearest block-level ancestor of the anchor.
fn enclosing_block(anchor: ElementRef) -> Option<ElementRef> {
    anchor
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| BLOCK_TAGS.contains(&el.value().name()))
}

/// `true` when `href` points at the listing page itself or one of its
/// pagination pages.
fn is_self_link(href: &str, page: &str) -> bool {
    let path = match Url::parse(href) {
        Ok(url) => url.path().to_string(),
        Err(_) => href
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    };
    let path = path.trim_matches('/');

    if path == page {
        return true;
    }
    path.strip_prefix(page)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| PAGINATION.is_match(rest))
}

/// Convert a machine-readable `datetime` value into epoch seconds.
///
/// Accepts RFC 3339, a zone-less date-time (read as UTC) or a bare date.
pub fn parse_datetime(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc().timestamp());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp())
}
