//! HTML parser for extracting page content, metadata and links
//!
//! This module turns a fetched HTML document into what the crawler needs:
//! - The page title (from the `<title>` tag)
//! - Links to follow, split into internal (same host) and external
//! - The page body converted to Markdown

use htmd::HtmlToMarkdown;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Elements treated as overlays: modals, popups and consent banners
const OVERLAY_SELECTOR: &str = "dialog, [role='dialog'], [role='alertdialog'], [aria-modal='true'], \
     [class*='modal'], [class*='popup'], [class*='overlay'], [class*='cookie'], [id*='cookie']";

/// Tags never rendered into the document
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// Embedded frames, dropped together with overlays
const OVERLAY_TAGS: &[&str] = &["iframe"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// The page body as Markdown
    pub markdown: String,

    /// Absolute links on the same host as the page
    pub internal_links: Vec<String>,
}

/// Parses an HTML page into title, Markdown and links
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags
/// - `<link rel="canonical" href="...">`
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Fragment-only links (same page anchors)
///
/// Links are resolved against `page_url` and de-duplicated in document order.
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `page_url` - The URL the page was served from
/// * `remove_overlay_elements` - Strip modals, popups, banners and iframes before conversion
///
/// # Example
///
/// ```
/// use site_harvest::crawler::parse_page;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let page_url = Url::parse("https://example.com/").unwrap();
/// let parsed = parse_page(html, &page_url, true);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.internal_links, vec!["https://example.com/page".to_string()]);
/// ```
pub fn parse_page(html: &str, page_url: &Url, remove_overlay_elements: bool) -> ParsedPage {
    let document = Html::parse_document(html);

    let title = extract_title(&document);
    let internal_links = extract_links(&document, page_url);

    let body = extract_body(&document, remove_overlay_elements);
    let markdown = html_to_markdown(&body, remove_overlay_elements);

    ParsedPage {
        title,
        markdown,
        internal_links,
    }
}

/// Converts an HTML fragment to Markdown
///
/// Scripts, styles and templates are always skipped; iframes are skipped
/// too when overlay removal is on.
pub fn html_to_markdown(html: &str, remove_overlay_elements: bool) -> String {
    let mut skipped: Vec<&str> = NON_CONTENT_TAGS.to_vec();
    if remove_overlay_elements {
        skipped.extend_from_slice(OVERLAY_TAGS);
    }

    let converter = HtmlToMarkdown::builder().skip_tags(skipped).build();

    match converter.convert(html) {
        Ok(markdown) => markdown.trim().to_string(),
        Err(e) => {
            tracing::debug!("Markdown conversion failed: {}", e);
            String::new()
        }
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Returns the serialized `<body>`, with overlay elements cut out if requested
fn extract_body(document: &Html, remove_overlay_elements: bool) -> String {
    let body = match Selector::parse("body") {
        Ok(selector) => document.select(&selector).next(),
        Err(_) => None,
    };

    let Some(body) = body else {
        return document.root_element().html();
    };

    let mut html = body.html();

    if remove_overlay_elements {
        if let Ok(overlay_selector) = Selector::parse(OVERLAY_SELECTOR) {
            for overlay in body.select(&overlay_selector) {
                // Nested overlays are already gone with their parent
                html = html.replacen(&overlay.html(), "", 1);
            }
        }
    }

    html
}

/// Extracts the valid links on the page's own host
///
/// Links to other hosts are dropped here; the crawler never follows them.
fn extract_links(document: &Html, page_url: &Url) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut internal = Vec::new();

    let mut push = |absolute: Url| {
        if absolute.host_str() != page_url.host_str() {
            return;
        }
        let link = absolute.to_string();
        if seen.insert(link.clone()) {
            internal.push(link);
        }
    };

    // Extract links from <a> tags
    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            // Skip if it has the download attribute
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, page_url) {
                    push(absolute_url);
                }
            }
        }
    }

    // Extract canonical link
    if let Ok(canonical_selector) = Selector::parse("link[rel='canonical'][href]") {
        for element in document.select(&canonical_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, page_url) {
                    push(absolute_url);
                }
            }
        }
    }

    internal
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, page_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("javascript:")
        || lowered.starts_with("mailto:")
        || lowered.starts_with("tel:")
        || lowered.starts_with("data:")
    {
        return None;
    }

    let absolute_url = page_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url)
    } else {
        None
    }
}
