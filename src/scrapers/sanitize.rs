//! Noise removal on the located article body.
//!
//! Only a fixed set of patterns is targeted: scripts, iframes, anchors
//! wrapping an inline `svg` (share buttons), the first `time` element, and
//! whatever trails the article footer marker. Each step is a no-op when
//! its pattern is absent.

use super::article::LocatedArticle;
use super::rules::ExtractionRules;
use ego_tree::NodeId;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

/// Strip noise below `located.content_root` and return its inner markup
/// with the headline markup removed.
///
/// The headline is removed as a string: the first occurrence of its outer
/// HTML in the serialized body is cut, whichever element produced it.
#[instrument(level = "debug", skip_all)]
pub fn sanitize(document: &mut Html, located: LocatedArticle, rules: &ExtractionRules) -> String {
    let root = located.content_root;

    let scripts = select_ids(document, root, &rules.script);
    let iframes = select_ids(document, root, &rules.iframe);
    debug!(scripts = scripts.len(), iframes = iframes.len(), "Removing embeds");
    for id in scripts.into_iter().chain(iframes) {
        detach(document, id);
    }

    for anchor in share_anchors(document, root, &rules.svg) {
        detach(document, anchor);
    }

    if let Some(time) = select_ids(document, root, &rules.time).first() {
        detach(document, *time);
    }

    if let Some(footer) = select_ids(document, root, &rules.footer_marker).first() {
        truncate_after(document, root, *footer);
    }

    let body = element(document, root).map(|el| el.inner_html()).unwrap_or_default();
    let title = element(document, located.title_element)
        .map(|el| el.html())
        .unwrap_or_default();
    if title.is_empty() {
        body
    } else {
        body.replacen(&title, "", 1)
    }
}

/// Anchors whose direct child is an `svg`.
fn share_anchors(document: &Html, root: NodeId, svg: &Selector) -> Vec<NodeId> {
    let mut anchors: Vec<NodeId> = select_ids(document, root, svg)
        .into_iter()
        .filter_map(|id| document.tree.get(id)?.parent())
        .filter(|parent| parent.id() != root)
        .filter_map(ElementRef::wrap)
        .filter(|parent| parent.value().name() == "a")
        .map(|anchor| anchor.id())
        .collect();
    anchors.dedup();
    anchors
}

/// Drop every sibling following the footer marker, keeping the marker.
/// Only applies when the marker is a direct child of the body.
fn truncate_after(document: &mut Html, root: NodeId, footer: NodeId) {
    let parent = document
        .tree
        .get(footer)
        .and_then(|node| node.parent())
        .map(|node| node.id());
    if parent != Some(root) {
        return;
    }
    let mut removed = 0usize;
    while let Some(next) = document
        .tree
        .get(footer)
        .and_then(|node| node.next_sibling())
        .map(|node| node.id())
    {
        detach(document, next);
        removed += 1;
    }
    debug!(removed, "Dropped nodes after article footer");
}

fn element(document: &Html, id: NodeId) -> Option<ElementRef<'_>> {
    document.tree.get(id).and_then(ElementRef::wrap)
}

fn select_ids(document: &Html, root: NodeId, selector: &Selector) -> Vec<NodeId> {
    element(document, root)
        .map(|el| el.select(selector).map(|found| found.id()).collect())
        .unwrap_or_default()
}

fn detach(document: &mut Html, id: NodeId) {
    if let Some(mut node) = document.tree.get_mut(id) {
        node.detach();
    }
}
