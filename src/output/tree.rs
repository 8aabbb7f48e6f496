//! Indented text tree rendering of the page graph
//!
//! Depth-first preorder with a per-invocation seen-set: each page is printed
//! in full at most once per rendering, and a page reached again (including
//! through a cycle) is reduced to a two-line summary, so rendering
//! terminates on any graph.

use std::collections::HashSet;
use std::fmt::Write;

use crate::page::PageHandle;

/// Renders the graph rooted at `root` as an indented text tree
///
/// Per node, at indent depth N (N leading spaces):
///
/// ```text
/// Title: <title>
/// URI:   <url>
/// Assets:
///  URI: <asset_url> (<kind>)
/// Remote Pages:
///  URI: <remote_url>
/// Pages:
///  <child, or previously-visited summary>
/// ```
///
/// The assets, remote-pages and pages blocks are omitted when empty.
pub fn render(root: &PageHandle) -> String {
    let mut out = String::new();
    let mut seen = HashSet::new();
    render_page(&mut out, root, 0, &mut seen);
    out
}

fn render_page(out: &mut String, page: &PageHandle, depth: usize, seen: &mut HashSet<String>) {
    let (title, url, assets, remote_pages, local_pages) = {
        let page = page.read().expect("page lock poisoned");
        (
            page.title.clone(),
            page.url.to_string(),
            page.assets.clone(),
            page.remote_pages.clone(),
            page.local_pages.clone(),
        )
    };
    seen.insert(url.clone());

    let pad = indent(depth);
    let inner = indent(depth + 1);

    let _ = writeln!(out, "{}Title: {}", pad, title);
    let _ = writeln!(out, "{}URI:   {}", pad, url);

    if !assets.is_empty() {
        let _ = writeln!(out, "{}Assets:", pad);
        for asset in &assets {
            let _ = writeln!(out, "{}URI: {} ({})", inner, asset.url, asset.kind.label());
        }
    }

    if !remote_pages.is_empty() {
        let _ = writeln!(out, "{}Remote Pages:", pad);
        for remote in &remote_pages {
            let _ = writeln!(out, "{}URI: {}", inner, remote.url);
        }
    }

    if !local_pages.is_empty() {
        let _ = writeln!(out, "{}Pages:", pad);
        for child in &local_pages {
            let (child_title, child_url) = {
                let child = child.read().expect("page lock poisoned");
                (child.title.clone(), child.url.to_string())
            };

            if seen.contains(&child_url) {
                let _ = writeln!(out, "{}Title: {} (previously visited)", inner, child_title);
                let _ = writeln!(out, "{}URI:   {}", inner, child_url);
            } else {
                render_page(out, child, depth + 1, seen);
            }
        }
    }
}

fn indent(depth: usize) -> String {
    " ".repeat(depth)
}
