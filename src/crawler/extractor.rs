//! HTML extraction
//!
//! Turns a fetched document into a detached [`PageRecord`]: title, assets
//! in per-category document order, same-host links as shell child pages,
//! and off-host links as HTML assets.

use scraper::{Html, Selector};
use url::Url;

use crate::page::{Asset, AssetKind, PageRecord};
use crate::url::{classify_link, LinkClass};
use crate::SiteTreeError;

/// Extracts a detached page record from an HTML document
///
/// # Extraction Rules
///
/// - **Title**: text of the first `<title>` element, empty when absent.
/// - **Anchors** (`<a href>`): classified against `origin`. Same-host links
///   become shell child pages carrying the resolved, fragment-stripped URL;
///   off-host links become `HtmlPage` assets carrying the href as written;
///   self-references and `javascript:` links are dropped.
/// - **Scripts** (`<script src type>`): script assets, only when the `type`
///   attribute ends with `javascript` or `ecmascript`. Scripts without a
///   `type` attribute are skipped.
/// - **Stylesheets** (`<link rel="stylesheet" href>`): stylesheet assets.
/// - **Images** (`<img src>`): image assets.
///
/// Asset URLs are stored as written; nothing is deduplicated within a page.
/// Extraction is deterministic: running it twice on the same document
/// produces equal records.
///
/// # Arguments
///
/// * `html` - The document body
/// * `page_url` - Canonical URL the document was fetched from
/// * `origin` - The crawl seed, which defines the origin host
pub fn extract_page(
    html: &str,
    page_url: &Url,
    origin: &Url,
) -> Result<PageRecord, SiteTreeError> {
    let document = Html::parse_document(html);
    let mut record = PageRecord::new(page_url.clone());

    record.title = extract_title(&document);
    extract_anchors(&document, &mut record, origin)?;
    extract_scripts(&document, &mut record)?;
    extract_stylesheets(&document, &mut record)?;
    extract_images(&document, &mut record)?;

    Ok(record)
}

/// Extracts the text of the first `<title>` element
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect())
        .unwrap_or_default()
}

fn extract_anchors(
    document: &Html,
    record: &mut PageRecord,
    origin: &Url,
) -> Result<(), SiteTreeError> {
    let selector = parse_selector("a", &record.url)?;

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        match classify_link(origin, &record.url, href) {
            LinkClass::SameOrigin(url) => {
                tracing::trace!(page = %record.url, child = %url, "found local page");
                record.add_local_page(PageRecord::shell(url));
            }
            LinkClass::Remote(href) => {
                tracing::trace!(page = %record.url, remote = %href, "found remote page");
                record.add_remote_page(Asset::new(href, AssetKind::HtmlPage));
            }
            LinkClass::SelfReference | LinkClass::NonHttpScheme => {}
        }
    }

    Ok(())
}

fn extract_scripts(document: &Html, record: &mut PageRecord) -> Result<(), SiteTreeError> {
    let selector = parse_selector("script", &record.url)?;

    for element in document.select(&selector) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };

        // Scripts without a type attribute are skipped.
        let Some(kind) = element.value().attr("type") else {
            continue;
        };

        if kind.ends_with("javascript") || kind.ends_with("ecmascript") {
            record.add_asset(Asset::new(src, AssetKind::Script));
        }
    }

    Ok(())
}

fn extract_stylesheets(document: &Html, record: &mut PageRecord) -> Result<(), SiteTreeError> {
    let selector = parse_selector("link", &record.url)?;

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        if element.value().attr("rel") == Some("stylesheet") {
            record.add_asset(Asset::new(href, AssetKind::Stylesheet));
        }
    }

    Ok(())
}

fn extract_images(document: &Html, record: &mut PageRecord) -> Result<(), SiteTreeError> {
    let selector = parse_selector("img", &record.url)?;

    for element in document.select(&selector) {
        if let Some(src) = element.value().attr("src") {
            record.add_asset(Asset::new(src, AssetKind::Image));
        }
    }

    Ok(())
}

fn parse_selector(expression: &str, page_url: &Url) -> Result<Selector, SiteTreeError> {
    Selector::parse(expression).map_err(|e| SiteTreeError::Extract {
        url: page_url.to_string(),
        message: format!("invalid selector {}: {}", expression, e),
    })
}
