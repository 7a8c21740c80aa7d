//! Fixed selectors and tables driving the extraction.

use crate::error::{BridgeError, Result};
use scraper::Selector;

/// Immutable extraction configuration, built once per run.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Landmark holding the listing.
    pub main_region: Selector,
    pub anchor: Selector,
    /// Element naming an article's author.
    pub author_marker: Selector,
    /// Headline tags in priority order.
    pub title_headings: Vec<Selector>,
    pub time: Selector,
    pub script: Selector,
    pub iframe: Selector,
    pub svg: Selector,
    /// Element after which the article body ends.
    pub footer_marker: Selector,
    /// Attribute rewrites applied to root-relative URLs, `(source, target)`.
    pub attribute_remap: Vec<(&'static str, &'static str)>,
}

impl ExtractionRules {
    pub fn new() -> Result<Self> {
        Ok(Self {
            main_region: selector("main")?,
            anchor: selector("a")?,
            author_marker: selector("span[itemprop=name]")?,
            title_headings: vec![selector("h2")?, selector("h3")?],
            time: selector("time")?,
            script: selector("script")?,
            iframe: selector("iframe")?,
            svg: selector("svg")?,
            footer_marker: selector(r#"[data-test-id="ArticleFooter"]"#)?,
            attribute_remap: vec![("href", "href"), ("src", "src"), ("data-original", "src")],
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| BridgeError::Config(format!("selector {css:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_build() {
        let rules = ExtractionRules::new().unwrap();
        assert_eq!(rules.title_headings.len(), 2);
        assert_eq!(rules.attribute_remap[2], ("data-original", "src"));
    }
}
