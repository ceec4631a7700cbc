//! HTML parser for extracting article links
//!
//! Only links inside the article body (`div#mw-content-text`) are considered,
//! and only those pointing at other articles:
//!
//! **Include:**
//! - `<a href="/wiki/Name">`, with any `#fragment` stripped from the name
//!
//! **Exclude:**
//! - Links outside the `/wiki/` namespace (external, edit, and index links)
//! - Names containing `:` (files, categories, help and other special pages)
//! - Disambiguation pages
//! - `List_of_...` articles, unless explicitly kept
//! - Repeats of an article already collected from the same page

use crate::graph::NodeId;
use scraper::{Html, Selector};
use std::collections::HashSet;

const ARTICLE_PREFIX: &str = "/wiki/";

/// Extracts the ordered, de-duplicated article links of a page
///
/// # Arguments
///
/// * `html` - The page content
/// * `keep_list_articles` - Whether `List_of_...` articles are kept
///
/// # Returns
///
/// * `Some(links)` - Links in document order
/// * `None` - The page has no article content container
///
/// # Example
///
/// ```
/// use wiki_mapper::fetcher::extract_article_links;
///
/// let html = r#"<div id="mw-content-text">
///     <a href="/wiki/Ubisoft">Ubisoft</a>
///     <a href="/wiki/File:Logo.png">Logo</a>
/// </div>"#;
/// let links = extract_article_links(html, false).unwrap();
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "Ubisoft");
/// ```
pub fn extract_article_links(html: &str, keep_list_articles: bool) -> Option<Vec<NodeId>> {
    let document = Html::parse_document(html);

    let content_selector = Selector::parse("div#mw-content-text").ok()?;
    let link_selector = Selector::parse("a[href]").ok()?;

    let content = document.select(&content_selector).next()?;

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in content.select(&link_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if let Some(name) = article_name(href, keep_list_articles) {
            if seen.insert(name.to_string()) {
                links.push(NodeId::from(name));
            }
        }
    }

    Some(links)
}

/// Returns the article name an href points at, if it should be followed
fn article_name(href: &str, keep_list_articles: bool) -> Option<&str> {
    let rest = href.trim().strip_prefix(ARTICLE_PREFIX)?;
    let name = rest.split('#').next().unwrap_or(rest);

    if name.is_empty() || name.contains(':') || name.contains("(disambiguation)") {
        return None;
    }

    if !keep_list_articles && name.contains("List_of_") {
        return None;
    }

    Some(name)
}
