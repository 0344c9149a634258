//! HTML content extraction
//!
//! This module turns fetched markup into a [`FetchResult`]:
//! - Page title, description and keywords
//! - Paragraph text of the main content area
//! - Links resolved against the page URL
//!
//! Extraction is best effort. Any markup parses; missing pieces fall back to
//! fixed placeholder strings.

use crate::crawler::result::{FetchResult, NO_CONTENT, NO_DESCRIPTION, NO_KEYWORDS, NO_TITLE};
use crate::crawler::summary::summarize;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Maximum length of the body text, in characters
pub const MAX_CONTENT_CHARS: usize = 2400;

/// Maximum number of distinct links kept per page
pub const MAX_LINKS: usize = 10;

/// Body text longer than this many words is summarized
pub const SUMMARY_WORD_THRESHOLD: usize = 100;

/// Elements removed before any text is read
const NON_CONTENT_ELEMENTS: &str = "script, style, nav, footer, header";

/// Main content candidates, first match wins
const MAIN_CONTENT_PRIORITY: [&str; 4] = ["main", "article", "section", "div"];

/// Extracts structured content from HTML pages
#[derive(Debug, Clone, Copy)]
pub struct ContentExtractor {
    summarize: bool,
}

impl Default for ContentExtractor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ContentExtractor {
    /// Creates an extractor; `summarize` enables the leading-sentence pass
    pub fn new(summarize: bool) -> Self {
        Self { summarize }
    }

    /// Parses `markup` fetched from `base_url` into a [`FetchResult`]
    ///
    /// # Extraction Rules
    ///
    /// 1. `script`, `style`, `nav`, `footer` and `header` elements are removed
    /// 2. Title and meta description/keywords, or their placeholders
    /// 3. The main content node is the first `main`, then `article`,
    ///    `section`, `div`, falling back to the whole document
    /// 4. Trimmed text of every `<p>` under that node, joined by a single
    ///    space and cut to 2400 characters
    /// 5. Anchors resolved against `base_url`, first 10 distinct kept
    /// 6. When summarizing and the text exceeds 100 words, it is replaced by
    ///    [`summarize`]
    ///
    /// # Example
    ///
    /// ```
    /// use sumi_scrape::ContentExtractor;
    /// use url::Url;
    ///
    /// let html = r#"<html><head><title>Test</title></head>
    ///     <body><main><p>Hello.</p><a href="/next">Next</a></main></body></html>"#;
    /// let base_url = Url::parse("https://example.com/").unwrap();
    /// let result = ContentExtractor::default().extract(html, &base_url);
    ///
    /// assert_eq!(result.title, "Test");
    /// assert_eq!(result.content, "Hello.");
    /// assert!(result.links.contains("https://example.com/next"));
    /// ```
    pub fn extract(&self, markup: &str, base_url: &Url) -> FetchResult {
        let mut document = Html::parse_document(markup);
        strip_non_content(&mut document);

        let root = document.root_element();

        let title = extract_title(root).unwrap_or_else(|| NO_TITLE.to_string());
        let description =
            extract_meta(root, "description").unwrap_or_else(|| NO_DESCRIPTION.to_string());
        let keywords = extract_meta(root, "keywords").unwrap_or_else(|| NO_KEYWORDS.to_string());

        let main = select_main_content(root);
        let mut content = truncate_chars(&paragraph_text(main), MAX_CONTENT_CHARS);

        if self.summarize && content.split_whitespace().count() > SUMMARY_WORD_THRESHOLD {
            content = truncate_chars(&summarize(&content), MAX_CONTENT_CHARS);
        }

        if content.is_empty() {
            content = NO_CONTENT.to_string();
        }

        let links = extract_links(root, base_url);

        FetchResult {
            title,
            description,
            keywords,
            content,
            links,
        }
    }
}

/// Detaches presentation-only elements from the tree
///
/// Selection always starts from the root element afterwards, since detached
/// nodes stay in the arena and `Html::select` would still visit them.
fn strip_non_content(document: &mut Html) {
    let Ok(selector) = Selector::parse(NON_CONTENT_ELEMENTS) else {
        return;
    };

    let ids: Vec<_> = document
        .root_element()
        .select(&selector)
        .map(|element| element.id())
        .collect();

    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Extracts the page title
fn extract_title(root: ElementRef<'_>) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    root.select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Returns the `content` attribute of the first `<meta name="...">`
fn extract_meta(root: ElementRef<'_>, name: &str) -> Option<String> {
    let selector = Selector::parse(&format!("meta[name=\"{}\"]", name)).ok()?;

    root.select(&selector)
        .next()
        .and_then(|element| element.value().attr("content"))
        .map(str::to_string)
}

/// Picks the main content node by tag priority
fn select_main_content(root: ElementRef<'_>) -> ElementRef<'_> {
    for tag in MAIN_CONTENT_PRIORITY {
        let Ok(selector) = Selector::parse(tag) else {
            continue;
        };
        if let Some(element) = root.select(&selector).next() {
            return element;
        }
    }
    root
}

/// Joins the trimmed text of every paragraph below `node`
fn paragraph_text(node: ElementRef<'_>) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    node.select(&selector)
        .map(|p| p.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects the first distinct absolute links of the document
fn extract_links(root: ElementRef<'_>, base_url: &Url) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    let Ok(selector) = Selector::parse("a[href]") else {
        return links;
    };

    for element in root.select(&selector) {
        if links.len() >= MAX_LINKS {
            break;
        }
        if let Some(absolute_url) = element
            .value()
            .attr("href")
            .and_then(|href| resolve_link(href, base_url))
        {
            links.insert(absolute_url);
        }
    }

    links
}

/// Resolves a link href against the page URL
///
/// Every href that joins cleanly is kept, whatever its scheme.
fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    base_url.join(href.trim()).ok().map(String::from)
}

/// Cuts `text` to at most `max` characters
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}
