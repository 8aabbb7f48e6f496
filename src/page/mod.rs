//! Page graph data model
//!
//! A crawl produces a directed graph of [`PageRecord`] nodes, deduplicated
//! by canonical URL. Nodes are jointly owned by the coordinator's visited
//! map and by their parents' `local_pages` lists, so they are shared through
//! [`PageHandle`]s. The graph may contain cycles across distinct URLs;
//! traversals break them with a seen-set.

use std::sync::{Arc, RwLock};

use url::Url;

use crate::SiteTreeError;

/// The kind of an asset referenced by a page
///
/// Integer wire codes: 0 = `Script`, 1 = `HtmlPage`, 2 = `Stylesheet`,
/// 3 = `Image`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    /// A JavaScript asset
    Script,
    /// An HTML page (used for remote, never-fetched pages)
    HtmlPage,
    /// A stylesheet asset
    Stylesheet,
    /// An image asset
    Image,
}

impl AssetKind {
    /// Builds an asset kind from its integer wire code
    ///
    /// # Returns
    ///
    /// * `Ok(AssetKind)` - A known code
    /// * `Err(SiteTreeError::InvalidAssetKind)` - Code out of range
    pub fn from_code(code: u8) -> Result<Self, SiteTreeError> {
        match code {
            0 => Ok(Self::Script),
            1 => Ok(Self::HtmlPage),
            2 => Ok(Self::Stylesheet),
            3 => Ok(Self::Image),
            other => Err(SiteTreeError::InvalidAssetKind(other)),
        }
    }

    /// The label used when rendering this kind
    pub fn label(self) -> &'static str {
        match self {
            Self::Script => "JS",
            Self::HtmlPage => "HTML",
            Self::Stylesheet => "CSS",
            Self::Image => "Image",
        }
    }
}

/// A single asset referenced by a page
///
/// The URL is kept exactly as it appeared in the document; assets are never
/// canonicalized or fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    pub url: String,
    pub kind: AssetKind,
}

impl Asset {
    pub fn new(url: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            url: url.into(),
            kind,
        }
    }

    /// Builds an asset from an integer kind code, validating the code
    pub fn from_code(url: impl Into<String>, code: u8) -> Result<Self, SiteTreeError> {
        Ok(Self::new(url, AssetKind::from_code(code)?))
    }
}

/// Shared handle to a page in the crawl graph
pub type PageHandle = Arc<RwLock<PageRecord>>;

/// A page and everything found on it
///
/// Records are mutated only by the coordinator while the crawl runs and are
/// effectively frozen once the root is returned.
#[derive(Debug)]
pub struct PageRecord {
    /// Canonical absolute URL, fragment stripped
    pub url: Url,

    /// Text of the page's `<title>`; empty until the page has been fetched
    pub title: String,

    /// Always [`AssetKind::HtmlPage`]
    pub kind: AssetKind,

    /// Scripts, stylesheets and images, in per-category document order
    pub assets: Vec<Asset>,

    /// Same-host pages this page links to, in discovery order
    pub local_pages: Vec<PageHandle>,

    /// Off-host links, URL only; never fetched
    pub remote_pages: Vec<Asset>,
}

impl PageRecord {
    /// Creates an empty record for a URL that has not been fetched yet
    pub fn new(url: Url) -> Self {
        Self {
            url,
            title: String::new(),
            kind: AssetKind::HtmlPage,
            assets: Vec::new(),
            local_pages: Vec::new(),
            remote_pages: Vec::new(),
        }
    }

    /// Wraps a fresh shell record in a shareable handle
    pub fn shell(url: Url) -> PageHandle {
        Arc::new(RwLock::new(Self::new(url)))
    }

    /// Appends an asset to the page
    pub fn add_asset(&mut self, asset: Asset) {
        self.assets.push(asset);
    }

    /// Appends a same-host child page
    pub fn add_local_page(&mut self, page: PageHandle) {
        self.local_pages.push(page);
    }

    /// Appends an off-host page link
    pub fn add_remote_page(&mut self, asset: Asset) {
        self.remote_pages.push(asset);
    }

    /// Moves the fetched content of a detached record into this one
    ///
    /// `local_pages` is left untouched; linking children into the canonical
    /// graph is the coordinator's job.
    pub fn absorb(&mut self, detached: PageRecord) {
        self.title = detached.title;
        self.assets = detached.assets;
        self.remote_pages = detached.remote_pages;
    }
}
