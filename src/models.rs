//! Data models for discovered articles and the assembled feed.
//!
//! - [`ArticleCandidate`]: an article found on the listing page, later filled
//!   with its extracted body
//! - [`Feed`]: the ordered collection handed to the output writers
//!
//! Field names serialize in camelCase (`publishedAt`) to match the record
//! shape consumed by feed readers of the JSON output.

use serde::{Deserialize, Serialize};

/// An article discovered on the listing page.
///
/// Created by the listing scan with an empty `content`, then mutated once by
/// the extraction pipeline: either the sanitized HTML fragment or the fixed
/// placeholder notice.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleCandidate {
    /// Author name as shown next to the link.
    pub author: String,
    /// Headline text, never empty.
    pub title: String,
    /// Absolute article URL.
    pub url: String,
    /// Publication instant in seconds since the Unix epoch, when the listing
    /// carried a parseable `datetime`.
    pub published_at: Option<i64>,
    /// HTML fragment of the article body.
    pub content: String,
}

impl ArticleCandidate {
    pub fn new(author: String, title: String, url: String, published_at: Option<i64>) -> Self {
        Self {
            author,
            title,
            url,
            published_at,
            content: String::new(),
        }
    }
}

/// A feed built from one listing page.
#[derive(Debug, Deserialize, Serialize)]
pub struct Feed {
    /// Channel title, e.g. `GQMagazine - sexe/news`.
    pub title: String,
    /// The listing page URL.
    pub link: String,
    /// Channel description.
    pub description: String,
    /// Articles in listing order.
    pub items: Vec<ArticleCandidate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_starts_without_content() {
        let candidate = ArticleCandidate::new(
            "Jane Doe".to_string(),
            "Title A".to_string(),
            "https://www.gqmagazine.fr/sexe/news/123-article".to_string(),
            Some(1_682_935_200),
        );
        assert!(candidate.content.is_empty());
        assert_eq!(candidate.published_at, Some(1_682_935_200));
    }

    #[test]
    fn test_candidate_serializes_camel_case() {
        let candidate = ArticleCandidate {
            author: "Jane Doe".to_string(),
            title: "Title A".to_string(),
            url: "https://example.com/a".to_string(),
            published_at: Some(42),
            content: "<p>Body</p>".to_string(),
        };

        let json = serde_json::to_string(&candidate).unwrap();
        assert!(json.contains("\"publishedAt\":42"));
        assert!(!json.contains("published_at"));
    }

    #[test]
    fn test_feed_deserialization() {
        let json = r#"{
            "title": "GQMagazine - sexe/news",
            "link": "https://www.gqmagazine.fr/sexe/news",
            "description": "Articles",
            "items": [{
                "author": "Jane Doe",
                "title": "Title A",
                "url": "https://www.gqmagazine.fr/sexe/news/123-article",
                "publishedAt": null,
                "content": ""
            }]
        }"#;

        let feed: Feed = serde_json::from_str(json).unwrap();
        assert_eq!(feed.items.len(), 1);
        assert_eq!(feed.items[0].published_at, None);
        assert_eq!(feed.link, "https://www.gqmagazine.fr/sexe/news");
    }
}
