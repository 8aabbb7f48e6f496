//! End-to-end crawl tests
//!
//! These tests run the full pipeline (workers, HTTP fetcher, extractor,
//! coordinator, renderer) against a wiremock server.

use std::time::Duration;

use sitetree::config::CrawlConfig;
use sitetree::crawler::crawl;
use sitetree::output::render;
use sitetree::page::AssetKind;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> CrawlConfig {
    CrawlConfig {
        quiescence_interval: Duration::from_millis(200),
        ..CrawlConfig::default()
    }
}

async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_builds_graph() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Home</title>
            <link href="site.css" rel="stylesheet" />
            </head><body>
            <a href="{}/page1">Page 1</a>
            <a href="/page2">Page 2</a>
            <a href="http://remotelink/elsewhere">Elsewhere</a>
            <img src="logo.png"/>
            <script src="app.js" type="text/javascript"></script>
            </body></html>"#,
            base
        ),
    )
    .await;
    mount_page(
        &server,
        "/page1",
        r#"<html><head><title>Page 1</title></head><body>Content 1</body></html>"#.to_string(),
    )
    .await;
    mount_page(
        &server,
        "/page2",
        r#"<html><head><title>Page 2</title></head><body>Content 2</body></html>"#.to_string(),
    )
    .await;

    let root = crawl(&format!("{}/", base), test_config())
        .await
        .expect("crawl failed");
    let page = root.read().unwrap();

    assert_eq!(page.title, "Home");

    assert_eq!(page.assets.len(), 3);
    assert_eq!(page.assets[0].url, "app.js");
    assert_eq!(page.assets[0].kind, AssetKind::Script);
    assert_eq!(page.assets[1].url, "site.css");
    assert_eq!(page.assets[1].kind, AssetKind::Stylesheet);
    assert_eq!(page.assets[2].url, "logo.png");
    assert_eq!(page.assets[2].kind, AssetKind::Image);

    assert_eq!(page.remote_pages.len(), 1);
    assert_eq!(page.remote_pages[0].url, "http://remotelink/elsewhere");
    assert_eq!(page.remote_pages[0].kind, AssetKind::HtmlPage);

    assert_eq!(page.local_pages.len(), 2);
    assert_eq!(page.local_pages[0].read().unwrap().title, "Page 1");
    assert_eq!(page.local_pages[1].read().unwrap().title, "Page 2");

    // Every crawled page stays on the seed's host.
    let seed_host = url::Url::parse(&base).unwrap().host_str().unwrap().to_string();
    for child in &page.local_pages {
        let child = child.read().unwrap();
        assert_eq!(child.url.host_str(), Some(seed_host.as_str()));
    }
}

#[tokio::test]
async fn test_budget_limits_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Hub</title></head><body>
            <a href="{0}/a">A</a>
            <a href="{0}/b">B</a>
            <a href="{0}/c">C</a>
            </body></html>"#,
            base
        ),
    )
    .await;
    for route in ["/a", "/b", "/c"] {
        mount_page(
            &server,
            route,
            r#"<html><head><title>Leaf</title></head><body></body></html>"#.to_string(),
        )
        .await;
    }

    let config = CrawlConfig {
        page_budget: 1,
        ..test_config()
    };
    let root = crawl(&format!("{}/", base), config)
        .await
        .expect("crawl failed");
    let page = root.read().unwrap();

    // Budget 1 admits the seed plus a single child.
    assert_eq!(page.local_pages.len(), 1);
}

#[tokio::test]
async fn test_non_2xx_body_extracted_best_effort() {
    let server = MockServer::start().await;
    let base = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(
                    r#"<html><head><title>Not Found</title></head><body>gone</body></html>"#,
                )
                .insert_header("content-type", "text/html"),
        )
        .mount(&server)
        .await;

    let root = crawl(&format!("{}/", base), test_config())
        .await
        .expect("crawl failed");

    assert_eq!(root.read().unwrap().title, "Not Found");
}

#[tokio::test]
async fn test_failed_fetch_leaves_shell_and_crawl_continues() {
    let server = MockServer::start().await;
    let base = server.uri();
    let host = url::Url::parse(&base).unwrap().host_str().unwrap().to_string();

    // Same host, but a port nothing listens on: the fetch fails and the
    // page stays a shell.
    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Root</title></head><body>
            <a href="http://{}:9/dead">dead</a>
            <a href="{}/alive">alive</a>
            </body></html>"#,
            host, base
        ),
    )
    .await;
    mount_page(
        &server,
        "/alive",
        r#"<html><head><title>Alive</title></head><body></body></html>"#.to_string(),
    )
    .await;

    let root = crawl(&format!("{}/", base), test_config())
        .await
        .expect("crawl failed");
    let page = root.read().unwrap();

    assert_eq!(page.local_pages.len(), 2);

    let dead = page.local_pages[0].read().unwrap();
    assert!(dead.title.is_empty());
    assert!(dead.assets.is_empty());

    let alive = page.local_pages[1].read().unwrap();
    assert_eq!(alive.title, "Alive");
}

#[tokio::test]
async fn test_rendered_tree_matches_crawl() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <a href="{}/about">About</a>
            <a href="http://remotelink/away">Away</a>
            </body></html>"#,
            base
        ),
    )
    .await;
    mount_page(
        &server,
        "/about",
        format!(
            r#"<html><head><title>About</title></head><body>
            <a href="{}/">Back home</a>
            </body></html>"#,
            base
        ),
    )
    .await;

    let root = crawl(&format!("{}/", base), test_config())
        .await
        .expect("crawl failed");
    let rendered = render(&root);

    let expected = format!(
        "Title: Home\n\
         URI:   {0}/\n\
         Remote Pages:\n \
         URI: http://remotelink/away\n\
         Pages:\n \
         Title: About\n \
         URI:   {0}/about\n \
         Pages:\n  \
         Title: Home (previously visited)\n  \
         URI:   {0}/\n",
        base
    );
    assert_eq!(rendered, expected);
}
