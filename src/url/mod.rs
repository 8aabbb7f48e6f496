//! URL handling for sitetree
//!
//! This module classifies links discovered on a page against the crawl
//! origin and canonicalizes URLs for use as graph identities.

mod classify;

pub use classify::{canonicalize, classify_link, LinkClass};
