//! Article body discovery.
//!
//! Listing and article pages share no markup, so the body is found from the
//! headline: take the first element whose text is exactly the title, then
//! climb until the ancestor holds at least `title.len() + header_size`
//! bytes of text. Thin wrappers around the headline are skipped that way.

use super::rendered_text_len;
use crate::error::{BridgeError, Result};
use ego_tree::NodeId;
use scraper::{ElementRef, Html};
use tracing::{debug, instrument};

/// Headline element and the ancestor chosen as the article body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedArticle {
    pub title_element: NodeId,
    pub content_root: NodeId,
}

/// Locate the article body around the element whose text equals `title`.
///
/// The first match in document order wins. At least one step up is always
/// taken.
///
/// # Errors
///
/// - [`BridgeError::MissingContent`] when no element matches the title
/// - [`BridgeError::Structure`] when no ancestor reaches the size bound
#[instrument(level = "debug", skip(document))]
pub fn locate_article(document: &Html, title: &str, header_size: usize) -> Result<LocatedArticle> {
    let title_element = document
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| rendered_text_is(*el, title))
        .ok_or_else(|| BridgeError::MissingContent(title.to_string()))?;

    let wanted = title.len().saturating_add(header_size);
    let mut current = title_element;
    loop {
        current = current.parent().and_then(ElementRef::wrap).ok_or_else(|| {
            BridgeError::Structure(format!(
                "no ancestor of {:?} holds {wanted} bytes of text",
                title
            ))
        })?;
        let len = rendered_text_len(current);
        if len >= wanted {
            debug!(tag = current.value().name(), len, wanted, "Found article container");
            break;
        }
    }

    Ok(LocatedArticle {
        title_element: title_element.id(),
        content_root: current.id(),
    })
}

fn rendered_text_is(el: ElementRef, expected: &str) -> bool {
    rendered_text_len(el) == expected.len() && super::rendered_text(el) == expected
}
