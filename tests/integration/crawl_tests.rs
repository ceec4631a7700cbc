//! Integration tests for the crawler
//!
//! These tests use wiremock to serve article pages and run the full traversal
//! end-to-end through the HTTP article fetcher.

use wiki_mapper::config::{
    Config, CrawlerConfig, FetcherConfig, OutputConfig, UserAgentConfig,
};
use wiki_mapper::crawler::{crawl, FetchFailurePolicy, Termination};
use wiki_mapper::{FetchError, MapperError, NodeId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, search_first: &str) -> Config {
    Config {
        crawler: CrawlerConfig {
            seed: "Seed".to_string(),
            search_first: search_first.to_string(),
            max_items: 100,
            max_breadth: 0,
            max_depth: 0,
            silent: true,
            on_fetch_error: FetchFailurePolicy::Skip,
        },
        fetcher: FetcherConfig {
            base_url: format!("{}/wiki/", base_url),
            timeout_secs: 5,
            connect_timeout_secs: 5,
            keep_list_articles: false,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig::default(),
    }
}

/// Builds an article page whose body links to the given hrefs
fn article_page(title: &str, hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{}">{}</a></li>"#, href, href))
        .collect();

    format!(
        r#"<html><head><title>{title}</title></head><body>
        <div id="mw-navigation"><a href="/wiki/Main_Page">Main page</a></div>
        <div id="mw-content-text"><ul>{links}</ul></div>
        </body></html>"#
    )
}

/// Serves an article page, expecting it to be requested exactly once
async fn mount_article(server: &MockServer, name: &str, hrefs: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", name)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_page(name, hrefs))
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn keys(graph: &wiki_mapper::LinkGraph) -> Vec<&str> {
    graph.keys().map(NodeId::as_str).collect()
}

#[tokio::test]
async fn test_breadth_first_crawl_over_http() {
    let mock_server = MockServer::start().await;

    mount_article(
        &mock_server,
        "Seed",
        &[
            "/wiki/Alpha",
            "/wiki/Help:Contents",
            "/wiki/Beta#History",
            "/wiki/Alpha",
            "https://example.com/external",
        ],
    )
    .await;
    mount_article(&mock_server, "Alpha", &["/wiki/Seed", "/wiki/Gamma"]).await;
    mount_article(&mock_server, "Beta", &["/wiki/Gamma", "/wiki/Delta"]).await;
    mount_article(&mock_server, "Gamma", &[]).await;
    mount_article(&mock_server, "Delta", &["/wiki/Seed"]).await;

    let config = create_test_config(&mock_server.uri(), "breadth");
    let outcome = crawl(&config).await.unwrap();

    assert_eq!(outcome.termination, Termination::FrontierExhausted);
    assert_eq!(
        keys(&outcome.graph),
        vec!["Seed", "Alpha", "Beta", "Gamma", "Delta"]
    );
    assert_eq!(
        outcome.graph.links("Seed").unwrap(),
        &[NodeId::from("Alpha"), NodeId::from("Beta")]
    );
    // Alpha is the first discovery and fixes the branching limit at 2
    assert_eq!(outcome.effective_breadth, Some(2));
    assert_eq!(outcome.depths.get("Gamma"), Some(3));
    assert_eq!(outcome.depths.get("Delta"), Some(3));
    assert_eq!(outcome.items_discovered, 4);
}

#[tokio::test]
async fn test_depth_first_crawl_over_http() {
    let mock_server = MockServer::start().await;

    mount_article(&mock_server, "Seed", &["/wiki/Alpha", "/wiki/Beta"]).await;
    mount_article(&mock_server, "Alpha", &["/wiki/Gamma", "/wiki/Seed"]).await;
    mount_article(&mock_server, "Gamma", &["/wiki/Seed"]).await;
    mount_article(&mock_server, "Beta", &[]).await;

    let config = create_test_config(&mock_server.uri(), "depth");
    let outcome = crawl(&config).await.unwrap();

    assert_eq!(outcome.termination, Termination::FrontierExhausted);
    assert_eq!(keys(&outcome.graph), vec!["Seed", "Alpha", "Gamma", "Beta"]);
    assert_eq!(outcome.depths.get("Gamma"), Some(3));
    assert_eq!(outcome.depths.get("Beta"), Some(2));
}

#[tokio::test]
async fn test_item_budget_over_http() {
    let mock_server = MockServer::start().await;

    mount_article(
        &mock_server,
        "Seed",
        &["/wiki/Alpha", "/wiki/Beta", "/wiki/Gamma"],
    )
    .await;
    mount_article(&mock_server, "Alpha", &["/wiki/Delta"]).await;
    mount_article(&mock_server, "Beta", &["/wiki/Delta"]).await;

    let mut config = create_test_config(&mock_server.uri(), "breadth");
    config.crawler.max_items = 2;
    config.crawler.max_breadth = 3;

    let outcome = crawl(&config).await.unwrap();

    assert_eq!(outcome.termination, Termination::ItemBudget);
    assert_eq!(keys(&outcome.graph), vec!["Seed", "Alpha", "Beta"]);
}

#[tokio::test]
async fn test_missing_page_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_article(&mock_server, "Seed", &["/wiki/Alpha", "/wiki/Missing"]).await;
    mount_article(&mock_server, "Alpha", &[]).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), "breadth");
    let outcome = crawl(&config).await.unwrap();

    assert_eq!(keys(&outcome.graph), vec!["Seed", "Alpha", "Missing"]);
    assert_eq!(outcome.graph.links("Missing"), Some(&[][..]));
    assert_eq!(outcome.termination, Termination::FrontierExhausted);
}

#[tokio::test]
async fn test_missing_page_aborts() {
    let mock_server = MockServer::start().await;

    mount_article(&mock_server, "Seed", &["/wiki/Alpha", "/wiki/Missing"]).await;
    mount_article(&mock_server, "Alpha", &[]).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), "breadth");
    config.crawler.on_fetch_error = FetchFailurePolicy::Abort;

    let result = crawl(&config).await;
    match result {
        Err(MapperError::Fetch(FetchError::Status { node, status })) => {
            assert_eq!(node, "Missing");
            assert_eq!(status, 404);
        }
        other => panic!("expected a 404 fetch error, got {:?}", other.map(|o| o.graph)),
    }
}

#[tokio::test]
async fn test_page_without_content_aborts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/wiki/Seed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><p>Nothing here</p></body></html>")
                .insert_header("content-type", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), "breadth");
    config.crawler.on_fetch_error = FetchFailurePolicy::Abort;

    let result = crawl(&config).await;
    assert!(matches!(
        result,
        Err(MapperError::Fetch(FetchError::MissingContent { .. }))
    ));
}

#[tokio::test]
async fn test_list_articles_are_opt_in() {
    let mock_server = MockServer::start().await;

    mount_article(
        &mock_server,
        "Seed",
        &["/wiki/List_of_games", "/wiki/Alpha"],
    )
    .await;
    mount_article(&mock_server, "Alpha", &[]).await;

    let mut config = create_test_config(&mock_server.uri(), "breadth");
    config.crawler.max_depth = 2;
    let outcome = crawl(&config).await.unwrap();
    assert_eq!(keys(&outcome.graph), vec!["Seed", "Alpha"]);

    let mock_server = MockServer::start().await;
    mount_article(
        &mock_server,
        "Seed",
        &["/wiki/List_of_games", "/wiki/Alpha"],
    )
    .await;
    mount_article(&mock_server, "List_of_games", &[]).await;
    mount_article(&mock_server, "Alpha", &[]).await;

    let mut config = create_test_config(&mock_server.uri(), "breadth");
    config.crawler.max_depth = 2;
    config.fetcher.keep_list_articles = true;
    let outcome = crawl(&config).await.unwrap();
    assert_eq!(keys(&outcome.graph), vec!["Seed", "List_of_games", "Alpha"]);
}
