use url::Url;

/// How a link discovered on a page relates to the page and the crawl origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkClass {
    /// The link points back at the containing page, or could not be parsed
    SelfReference,

    /// The link uses a scheme the crawler never follows (`javascript:`)
    NonHttpScheme,

    /// The link stays on the origin host; carries the canonical resolved URL
    SameOrigin(Url),

    /// The link leaves the origin host; carries the href as written
    Remote(String),
}

/// Strips the fragment from a URL, yielding its canonical form
pub fn canonicalize(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_fragment(None);
    canonical
}

/// Classifies a link found on `current` against the crawl `origin`
///
/// Classification proceeds in order:
///
/// 1. `javascript:` hrefs (scheme matched case-insensitively) are never
///    followed.
/// 2. Protocol-relative hrefs (`//host/path`) are rewritten to `https:`
///    before anything else looks at them; a remote link is recorded with
///    the rewritten string.
/// 3. The href is resolved against `current` and its fragment stripped.
///    Hrefs that fail to resolve classify as self-references, so the link
///    is dropped rather than failing the page.
/// 4. A resolved URL equal to the fragment-stripped `current` is a
///    self-reference.
/// 5. A resolved URL whose host differs from `origin`'s is remote. Absolute
///    hrefs on schemes without a host (`mailto:` and friends) land here.
/// 6. Everything else is same-origin.
///
/// The function is pure: equal inputs always produce equal classifications.
pub fn classify_link(origin: &Url, current: &Url, href: &str) -> LinkClass {
    if let Some(colon) = href.find(':') {
        if href[..colon].eq_ignore_ascii_case("javascript") {
            return LinkClass::NonHttpScheme;
        }
    }

    let href = match href.strip_prefix("//") {
        Some(rest) => format!("https://{}", rest),
        None => href.to_string(),
    };

    let resolved = match current.join(&href) {
        Ok(resolved) => canonicalize(&resolved),
        Err(_) => return LinkClass::SelfReference,
    };

    if resolved == canonicalize(current) {
        return LinkClass::SelfReference;
    }

    if resolved.host_str() != origin.host_str() {
        return LinkClass::Remote(href);
    }

    LinkClass::SameOrigin(resolved)
}
