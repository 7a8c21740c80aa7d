//! Article discovery and full-content extraction.
//!
//! # Pipeline
//!
//! 1. [`listing::list_candidates`] scans the listing page for article links
//! 2. each article page is fetched (through the cache)
//! 3. [`article::locate_article`] finds the body from the headline text
//! 4. [`sanitize::sanitize`] strips known noise
//! 5. [`urls::rewrite_relative_urls`] makes embedded links absolute
//!
//! A failing article never stops the run: its content becomes
//! [`PLACEHOLDER_CONTENT`].

pub mod article;
pub mod listing;
pub mod rules;
pub mod sanitize;
pub mod urls;

use crate::config::FeedConfig;
use crate::error::Result;
use crate::fetch::{PageFetcher, fetch_document};
use crate::models::ArticleCandidate;
use rules::ExtractionRules;
use scraper::{ElementRef, Html};
use tracing::{info, instrument, warn};

/// Content used when an article body could not be extracted.
pub const PLACEHOLDER_CONTENT: &str =
    "<strong>Article body couldn't be loaded</strong>. It must be a bug!";

/// Concatenated text of all descendant text nodes.
pub(crate) fn rendered_text(el: ElementRef) -> String {
    el.text().collect()
}

/// Byte length of [`rendered_text`] without building the string.
pub(crate) fn rendered_text_len(el: ElementRef) -> usize {
    el.text().map(str::len).sum()
}

/// Extract the sanitized, URL-rewritten body of one article document.
pub fn extract_article(
    mut document: Html,
    title: &str,
    config: &FeedConfig,
    rules: &ExtractionRules,
) -> Result<String> {
    let located = article::locate_article(&document, title, config.header_size)?;
    let fragment = sanitize::sanitize(&mut document, located, rules);
    Ok(urls::rewrite_relative_urls(
        &fragment,
        &rules.attribute_remap,
        &config.origin,
    ))
}

/// Build the list of articles for the configured listing page.
///
/// Listing errors are returned. Article errors are logged and replaced by
/// [`PLACEHOLDER_CONTENT`]; candidates keep their listing order.
#[instrument(level = "info", skip_all, fields(page = %config.page))]
pub async fn collect_feed<L, A>(
    listing_fetcher: &L,
    article_fetcher: &A,
    config: &FeedConfig,
    rules: &ExtractionRules,
) -> Result<Vec<ArticleCandidate>>
where
    L: PageFetcher,
    A: PageFetcher,
{
    let listing = fetch_document(listing_fetcher, &config.listing_url()).await?;
    let mut candidates = listing::list_candidates(&listing, &config.page, &config.origin, rules)?;
    drop(listing);

    let mut failed = 0usize;
    for candidate in candidates.iter_mut() {
        candidate.content = match load_article(article_fetcher, candidate, config, rules).await {
            Ok(content) => content,
            Err(e) => {
                failed += 1;
                warn!(url = %candidate.url, error = %e, "Article body not extracted");
                PLACEHOLDER_CONTENT.to_string()
            }
        };
    }

    info!(
        total = candidates.len(),
        failed,
        "Completed article extraction"
    );
    Ok(candidates)
}

#[instrument(level = "info", skip_all, fields(url = %candidate.url))]
async fn load_article<A: PageFetcher>(
    fetcher: &A,
    candidate: &ArticleCandidate,
    config: &FeedConfig,
    rules: &ExtractionRules,
) -> Result<String> {
    let document = fetch_document(fetcher, &candidate.url).await?;
    let content = extract_article(document, &candidate.title, config, rules)?;
    info!(bytes = content.len(), "Extracted article body");
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BridgeError;
    use crate::fetch::tests::StubFetcher;
    use std::time::Duration;

    const LISTING_URL: &str = "https://www.gqmagazine.fr/sexe/news";

    fn config() -> FeedConfig {
        FeedConfig {
            origin: "https://www.gqmagazine.fr".to_string(),
            page: "sexe/news".to_string(),
            header_size: 20,
            cache_ttl: Duration::from_secs(60),
            timeout: Duration::from_secs(5),
        }
    }

    fn listing(cards: &[(&str, &str)]) -> String {
        let cards: String = cards
            .iter()
            .map(|(href, title)| {
                format!(
                    r#"<div><a href="{href}"><h2>{title}</h2></a><span itemprop="name">Jane Doe</span><time datetime="2023-05-01T10:00:00Z">1 mai</time></div>"#
                )
            })
            .collect();
        format!("<html><body><nav><a href='/mode'>Mode</a></nav><main>{cards}</main></body></html>")
    }

    const ARTICLE_A: &str = r#"<html><body><article>
        <header><h1>Title A</h1><time datetime="2023-05-01T10:00:00Z">1 mai</time></header>
        <div class="body">
          <p>Le corps de l'article, assez long pour passer le seuil.</p>
          <img data-original="/img/x.png">
          <script>tracker()</script>
          <a href="https://twitter.com/share"><svg></svg></a>
          <a href="/sexe/news/456-other">Lire aussi</a>
        </div>
    </article></body></html>"#;

    #[tokio::test]
    async fn test_full_pipeline() {
        let listing_fetcher = StubFetcher::default().with_page(
            LISTING_URL,
            &listing(&[("/sexe/news/123-article", "Title A")]),
        );
        let articles = StubFetcher::default()
            .with_page("https://www.gqmagazine.fr/sexe/news/123-article", ARTICLE_A);
        let rules = ExtractionRules::new().unwrap();

        let items = collect_feed(&listing_fetcher, &articles, &config(), &rules)
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.author, "Jane Doe");
        assert_eq!(item.published_at, Some(1_682_935_200));
        assert!(item.content.contains("Le corps de l'article"));
        assert!(item.content.contains(r#"src="https://www.gqmagazine.fr/img/x.png""#));
        assert!(item.content.contains(r#"href="https://www.gqmagazine.fr/sexe/news/456-other""#));
        assert!(!item.content.contains("<h1>Title A</h1>"));
        assert!(!item.content.contains("<script"));
        assert!(!item.content.contains("twitter.com"));
        assert!(!item.content.contains("<time"));
    }

    #[tokio::test]
    async fn test_padded_headings_still_match() {
        let listing_fetcher = StubFetcher::default().with_page(
            LISTING_URL,
            &listing(&[("/sexe/news/123-article", " Title A ")]),
        );
        let article = r#"<html><body><article>
            <h1> Title A </h1>
            <p>Le corps de l'article, assez long pour passer le seuil.</p>
        </article></body></html>"#;
        let articles = StubFetcher::default()
            .with_page("https://www.gqmagazine.fr/sexe/news/123-article", article);
        let rules = ExtractionRules::new().unwrap();

        let items = collect_feed(&listing_fetcher, &articles, &config(), &rules)
            .await
            .unwrap();

        assert_eq!(items[0].title, " Title A ");
        assert_ne!(items[0].content, PLACEHOLDER_CONTENT);
        assert!(items[0].content.contains("Le corps de l'article"));
        assert!(!items[0].content.contains("<h1>"));
    }

    #[tokio::test]
    async fn test_missing_title_gives_placeholder() {
        let listing_fetcher = StubFetcher::default().with_page(
            LISTING_URL,
            &listing(&[
                ("/sexe/news/1-renamed", "Title A"),
                ("/sexe/news/123-article", "Title A"),
            ]),
        );
        let articles = StubFetcher::default()
            .with_page(
                "https://www.gqmagazine.fr/sexe/news/1-renamed",
                "<article><h1>Another headline</h1><p>text</p></article>",
            )
            .with_page("https://www.gqmagazine.fr/sexe/news/123-article", ARTICLE_A);
        let rules = ExtractionRules::new().unwrap();

        let items = collect_feed(&listing_fetcher, &articles, &config(), &rules)
            .await
            .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].content, PLACEHOLDER_CONTENT);
        assert_ne!(items[1].content, PLACEHOLDER_CONTENT);
    }

    #[tokio::test]
    async fn test_article_fetch_failure_is_not_fatal() {
        let listing_fetcher = StubFetcher::default().with_page(
            LISTING_URL,
            &listing(&[("/sexe/news/gone-article", "Gone"), ("/sexe/news/123-article", "Title A")]),
        );
        let articles = StubFetcher::default()
            .with_page("https://www.gqmagazine.fr/sexe/news/123-article", ARTICLE_A);
        let rules = ExtractionRules::new().unwrap();

        let items = collect_feed(&listing_fetcher, &articles, &config(), &rules)
            .await
            .unwrap();

        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["Gone", "Title A"]);
        assert_eq!(items[0].content, PLACEHOLDER_CONTENT);
        assert_eq!(articles.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_listing_fetch_failure_aborts() {
        let rules = ExtractionRules::new().unwrap();
        let err = collect_feed(&StubFetcher::default(), &StubFetcher::default(), &config(), &rules)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Fetch { .. }));
    }

    #[tokio::test]
    async fn test_listing_without_main_aborts() {
        let listing_fetcher =
            StubFetcher::default().with_page(LISTING_URL, "<html><body><p>maintenance</p></body></html>");
        let articles = StubFetcher::default();
        let rules = ExtractionRules::new().unwrap();

        let err = collect_feed(&listing_fetcher, &articles, &config(), &rules)
            .await
            .unwrap_err();
        assert!(matches!(err, BridgeError::Structure(_)));
        assert_eq!(articles.calls.get(), 0);
    }
}
