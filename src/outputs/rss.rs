//! RSS 2.0 rendering of the feed.
//!
//! Article bodies are HTML fragments; they go into `<description>` as text
//! and are escaped by the writer. Authors use `dc:creator` since RSS
//! `<author>` expects an e-mail address.

use crate::error::{BridgeError, Result};
use crate::models::{ArticleCandidate, Feed};
use chrono::DateTime;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fmt::Display;
use std::io::Write;
use tracing::{debug, instrument};

const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";

fn xml_error(e: impl Display) -> BridgeError {
    BridgeError::Output(format!("xml: {e}"))
}

fn write_text_element<W: Write>(w: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_error)?;
    w.write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_error)?;
    w.write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_error)?;
    Ok(())
}

/// RFC 2822 date for an epoch timestamp.
fn format_pub_date(epoch_secs: i64) -> Option<String> {
    DateTime::from_timestamp(epoch_secs, 0).map(|dt| dt.to_rfc2822())
}

fn write_item<W: Write>(w: &mut Writer<W>, item: &ArticleCandidate) -> Result<()> {
    w.write_event(Event::Start(BytesStart::new("item")))
        .map_err(xml_error)?;
    write_text_element(w, "title", &item.title)?;
    write_text_element(w, "link", &item.url)?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    w.write_event(Event::Start(guid)).map_err(xml_error)?;
    w.write_event(Event::Text(BytesText::new(&item.url)))
        .map_err(xml_error)?;
    w.write_event(Event::End(BytesEnd::new("guid")))
        .map_err(xml_error)?;

    write_text_element(w, "dc:creator", &item.author)?;
    if let Some(date) = item.published_at.and_then(format_pub_date) {
        write_text_element(w, "pubDate", &date)?;
    }
    write_text_element(w, "description", &item.content)?;
    w.write_event(Event::End(BytesEnd::new("item")))
        .map_err(xml_error)?;
    Ok(())
}

/// Render the feed as an RSS 2.0 document.
#[instrument(level = "info", skip_all, fields(items = feed.items.len()))]
pub fn render(feed: &Feed) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_error)?;

    let mut rss_start = BytesStart::new("rss");
    rss_start.push_attribute(("version", "2.0"));
    rss_start.push_attribute(("xmlns:dc", DC_NAMESPACE));
    writer.write_event(Event::Start(rss_start)).map_err(xml_error)?;
    writer
        .write_event(Event::Start(BytesStart::new("channel")))
        .map_err(xml_error)?;
    write_text_element(&mut writer, "title", &feed.title)?;
    write_text_element(&mut writer, "link", &feed.link)?;
    write_text_element(&mut writer, "description", &feed.description)?;

    for item in &feed.items {
        write_item(&mut writer, item)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("channel")))
        .map_err(xml_error)?;
    writer
        .write_event(Event::End(BytesEnd::new("rss")))
        .map_err(xml_error)?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(xml_error)?;
    xml.push('\n');
    debug!(bytes = xml.len(), "Rendered RSS feed");
    Ok(xml)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed() -> Feed {
        let mut item = ArticleCandidate::new(
            "Jane Doe".into(),
            "Title A & more".into(),
            "https://www.gqmagazine.fr/sexe/news/123-article".into(),
            Some(1_682_935_200),
        );
        item.content = "<p>Body</p>".into();
        let undated = ArticleCandidate::new(
            "John".into(),
            "Undated".into(),
            "https://www.gqmagazine.fr/sexe/news/456".into(),
            None,
        );
        Feed {
            title: "GQMagazine - sexe/news".into(),
            link: "https://www.gqmagazine.fr/sexe/news".into(),
            description: "GQMagazine section sexe/news".into(),
            items: vec![item, undated],
        }
    }

    #[test]
    fn test_render_channel_and_items() {
        let xml = render(&feed()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<rss version=\"2.0\""));
        assert!(xml.contains("<title>GQMagazine - sexe/news</title>"));
        assert!(xml.contains("<title>Title A &amp; more</title>"));
        assert!(xml.contains("<dc:creator>Jane Doe</dc:creator>"));
        assert!(xml.contains("May 2023 10:00:00 +0000</pubDate>"));
        assert_eq!(xml.matches("<item>").count(), 2);
        assert_eq!(xml.matches("<pubDate>").count(), 1);
    }

    #[test]
    fn test_content_is_escaped() {
        let xml = render(&feed()).unwrap();
        assert!(xml.contains("<description>&lt;p&gt;Body&lt;/p&gt;</description>"));
    }
}
