//! Integration tests for the crawler
//!
//! These tests use wiremock to stand in for the help-center API and run the
//! full walk → convert → write → index cycle end-to-end.

use helpcenter_scraper::config::{
    Config, CrawlerConfig, OutputConfig, SourceConfig, UserAgentConfig,
};
use helpcenter_scraper::convert::frontmatter_value;
use helpcenter_scraper::crawler::crawl;
use serde_json::{json, Value};
use std::path::Path;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API: &str = "/api/v2/help_center/en-us";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, output_dir: &Path, max_articles: Option<usize>) -> Config {
    Config {
        source: SourceConfig {
            base_url: base_url.to_string(),
            locale: "en-us".to_string(),
        },
        crawler: CrawlerConfig {
            max_articles,
            article_delay_ms: 0,
            request_timeout_secs: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
        output: OutputConfig {
            directory: output_dir.to_path_buf(),
            manifest_path: None,
        },
    }
}

fn article_json(id: u64, title: &str, section_id: u64, body: &str) -> Value {
    json!({
        "article": {
            "id": id,
            "title": title,
            "body": body,
            "html_url": format!("https://support.example.com/hc/en-us/articles/{}", id),
            "author_id": 100,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-06-01T00:00:00Z",
            "draft": false,
            "promoted": false,
            "position": 0,
            "vote_sum": 0,
            "vote_count": 0,
            "section_id": section_id,
            "label_names": ["guide"]
        }
    })
}

async fn mount_json(server: &MockServer, endpoint: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(format!("{}{}", API, endpoint)))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Mounts an endpoint that must never be requested
async fn mount_untouched(server: &MockServer, endpoint: &str) {
    Mock::given(method("GET"))
        .and(path(format!("{}{}", API, endpoint)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_writes_documents_and_index() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "Getting Started"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [
            {"id": 10, "name": "Basics", "category_id": 1},
            {"id": 11, "name": "Advanced", "category_id": 1}
        ]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/sections/10/articles.json",
        json!({"articles": [{"id": 100, "title": "Welcome"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/sections/11/articles.json",
        json!({"articles": [{"id": 101, "title": "Add a YouTube video"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/articles/100.json",
        article_json(
            100,
            "Welcome",
            10,
            &format!(
                r#"<h1>Welcome</h1><p>See <a href="{}/hc/en-us/articles/101">videos</a>.</p>"#,
                base_url
            ),
        ),
    )
    .await;
    mount_json(
        &mock_server,
        "/articles/101.json",
        article_json(101, "Add a YouTube video", 11, "<p>Paste the <b>link</b>.</p>"),
    )
    .await;

    let config = create_test_config(&base_url, output.path(), None);
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.results[0].filename, "welcome.md");
    assert_eq!(report.results[1].filename, "add-a-youtube-video.md");
    assert_eq!(report.stats.categories, 1);
    assert_eq!(report.stats.sections, 2);
    assert_eq!(report.stats.summaries, 2);
    assert_eq!(report.stats.saved, 2);
    assert!(!report.stats.cap_reached);

    let welcome = std::fs::read_to_string(output.path().join("welcome.md")).unwrap();
    assert_eq!(frontmatter_value(&welcome, "title").as_deref(), Some("Welcome"));
    assert_eq!(frontmatter_value(&welcome, "category").as_deref(), Some("Getting Started"));
    assert_eq!(frontmatter_value(&welcome, "section").as_deref(), Some("Basics"));
    assert_eq!(frontmatter_value(&welcome, "section_id").as_deref(), Some("10"));
    assert_eq!(frontmatter_value(&welcome, "category_id").as_deref(), Some("1"));
    assert_eq!(frontmatter_value(&welcome, "tags").as_deref(), Some(r#"["guide"]"#));
    assert!(welcome.ends_with("---\n\n# Welcome\n\nSee [videos](/hc/en-us/articles/101).\n"));

    let video = std::fs::read_to_string(output.path().join("add-a-youtube-video.md")).unwrap();
    assert!(video.contains("Paste the **link**."));

    let index = std::fs::read_to_string(output.path().join("README.md")).unwrap();
    let first = index.find("- [Add a YouTube video](add-a-youtube-video.md)").unwrap();
    let second = index.find("- [Welcome](welcome.md)").unwrap();
    assert!(first < second);
    assert!(index.contains(&format!("Source: {}", base_url)));
    assert!(index.contains("Total articles: 2"));
}

#[tokio::test]
async fn test_cap_stops_every_level() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "First"}, {"id": 2, "name": "Second"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [
            {"id": 10, "name": "A", "category_id": 1},
            {"id": 11, "name": "B", "category_id": 1}
        ]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/sections/10/articles.json",
        json!({"articles": [
            {"id": 100, "title": "One"},
            {"id": 101, "title": "Two"},
            {"id": 102, "title": "Three"}
        ]}),
    )
    .await;
    mount_json(&mock_server, "/articles/100.json", article_json(100, "One", 10, "<p>1</p>")).await;
    mount_json(&mock_server, "/articles/101.json", article_json(101, "Two", 10, "<p>2</p>")).await;

    // Nothing past the second article may be requested.
    mount_untouched(&mock_server, "/articles/102.json").await;
    mount_untouched(&mock_server, "/sections/11/articles.json").await;
    mount_untouched(&mock_server, "/categories/2/sections.json").await;

    let config = create_test_config(&mock_server.uri(), output.path(), Some(2));
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.results.len(), 2);
    assert_eq!(report.stats.articles_requested, 2);
    assert!(report.stats.cap_reached);
    assert!(!output.path().join("three.md").exists());
}

#[tokio::test]
async fn test_cap_reached_at_section_boundary_skips_later_listings() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "First"}, {"id": 2, "name": "Second"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [{"id": 10, "name": "A", "category_id": 1}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/sections/10/articles.json",
        json!({"articles": [{"id": 100, "title": "Only"}]}),
    )
    .await;
    mount_json(&mock_server, "/articles/100.json", article_json(100, "Only", 10, "<p>x</p>")).await;
    mount_untouched(&mock_server, "/categories/2/sections.json").await;

    let config = create_test_config(&mock_server.uri(), output.path(), Some(1));
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.results.len(), 1);
    assert!(report.stats.cap_reached);
}

#[tokio::test]
async fn test_section_listing_failure_is_isolated() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "Docs"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [
            {"id": 10, "name": "Broken", "category_id": 1},
            {"id": 11, "name": "Healthy", "category_id": 1}
        ]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/sections/10/articles.json", API)))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_json(
        &mock_server,
        "/sections/11/articles.json",
        json!({"articles": [{"id": 200, "title": "Still here"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/articles/200.json",
        article_json(200, "Still here", 11, "<p>ok</p>"),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), output.path(), None);
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].title, "Still here");
    assert_eq!(report.stats.sections, 2);
    assert_eq!(report.stats.summaries, 1);
}

#[tokio::test]
async fn test_missing_article_detail_is_skipped() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "Docs"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [{"id": 10, "name": "A", "category_id": 1}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/sections/10/articles.json",
        json!({"articles": [{"id": 300, "title": "Gone"}, {"id": 301, "title": "Present"}]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/articles/300.json", API)))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_json(
        &mock_server,
        "/articles/301.json",
        article_json(301, "Present", 10, "<p>here</p>"),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), output.path(), None);
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].article_id, 301);
    assert_eq!(report.stats.articles_requested, 2);
    assert_eq!(report.stats.articles_missing, 1);
    assert!(!output.path().join("gone.md").exists());
}

#[tokio::test]
async fn test_empty_category_listing_finishes_with_empty_index() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(&mock_server, "/categories.json", json!({"categories": []})).await;

    let config = create_test_config(&mock_server.uri(), output.path(), None);
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.results.is_empty());
    assert_eq!(report.stats.categories, 0);
    let index = std::fs::read_to_string(output.path().join("README.md")).unwrap();
    assert!(index.contains("Total articles: 0"));
}

#[tokio::test]
async fn test_category_listing_failure_is_not_fatal() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    Mock::given(method("GET"))
        .and(path(format!("{}/categories.json", API)))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&mock_server.uri(), output.path(), None);
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.results.is_empty());
}

#[tokio::test]
async fn test_zero_cap_makes_no_requests() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_untouched(&mock_server, "/categories.json").await;

    let config = create_test_config(&mock_server.uri(), output.path(), Some(0));
    let report = crawl(&config).await.expect("Crawl failed");

    assert!(report.results.is_empty());
    assert!(report.stats.cap_reached);
    assert_eq!(report.stats.categories, 0);
    let index = std::fs::read_to_string(output.path().join("README.md")).unwrap();
    assert!(index.contains("Total articles: 0"));
}

#[tokio::test]
async fn test_undecodable_responses_are_absorbed() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "Docs"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [
            {"id": 10, "name": "Garbled", "category_id": 1},
            {"id": 11, "name": "Healthy", "category_id": 1}
        ]}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path(format!("{}/sections/10/articles.json", API)))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;
    mount_json(
        &mock_server,
        "/sections/11/articles.json",
        json!({"articles": [
            {"id": 400, "title": "Malformed"},
            {"id": 401, "title": "Well formed"}
        ]}),
    )
    .await;
    mount_json(&mock_server, "/articles/400.json", json!({"article": {"title": 1}})).await;
    mount_json(
        &mock_server,
        "/articles/401.json",
        article_json(401, "Well formed", 11, "<p>fine</p>"),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), output.path(), None);
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.results[0].article_id, 401);
    assert_eq!(report.stats.sections, 2);
    assert_eq!(report.stats.summaries, 2);
    assert_eq!(report.stats.articles_requested, 2);
    assert_eq!(report.stats.articles_missing, 1);
    assert!(output.path().join("well-formed.md").exists());
    assert!(!output.path().join("malformed.md").exists());
}

#[tokio::test]
async fn test_duplicate_slugs_overwrite_each_other() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "Docs"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [{"id": 10, "name": "A", "category_id": 1}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/sections/10/articles.json",
        json!({"articles": [{"id": 1, "title": "Set up: screens"}, {"id": 2, "title": "Set-up screens"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/articles/1.json",
        article_json(1, "Set up: screens", 10, "<p>first</p>"),
    )
    .await;
    mount_json(
        &mock_server,
        "/articles/2.json",
        article_json(2, "Set-up screens", 10, "<p>second</p>"),
    )
    .await;

    let config = create_test_config(&mock_server.uri(), output.path(), None);
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.results.len(), 2);
    let written = std::fs::read_to_string(output.path().join("set-up-screens.md")).unwrap();
    assert!(written.contains("second"));
    assert!(!written.contains("first"));
}

#[tokio::test]
async fn test_article_delay_is_applied_per_detail_fetch() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "Docs"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [{"id": 10, "name": "A", "category_id": 1}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/sections/10/articles.json",
        json!({"articles": [{"id": 1, "title": "One"}, {"id": 2, "title": "Two"}]}),
    )
    .await;
    mount_json(&mock_server, "/articles/1.json", article_json(1, "One", 10, "<p>1</p>")).await;
    mount_json(&mock_server, "/articles/2.json", article_json(2, "Two", 10, "<p>2</p>")).await;

    let mut config = create_test_config(&mock_server.uri(), output.path(), None);
    config.crawler.article_delay_ms = 100;

    let start = Instant::now();
    let report = crawl(&config).await.expect("Crawl failed");

    assert_eq!(report.results.len(), 2);
    assert!(start.elapsed() >= Duration::from_millis(200));
}

#[tokio::test]
async fn test_manifest_lists_saved_documents() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");

    mount_json(
        &mock_server,
        "/categories.json",
        json!({"categories": [{"id": 1, "name": "Docs"}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/categories/1/sections.json",
        json!({"sections": [{"id": 10, "name": "A", "category_id": 1}]}),
    )
    .await;
    mount_json(
        &mock_server,
        "/sections/10/articles.json",
        json!({"articles": [{"id": 7, "title": "Pairing"}]}),
    )
    .await;
    mount_json(&mock_server, "/articles/7.json", article_json(7, "Pairing", 10, "<p>x</p>")).await;

    let manifest_path = output.path().join("manifest.json");
    let mut config = create_test_config(&mock_server.uri(), output.path(), None);
    config.output.manifest_path = Some(manifest_path.clone());

    crawl(&config).await.expect("Crawl failed");

    let manifest: Value =
        serde_json::from_str(&std::fs::read_to_string(manifest_path).unwrap()).unwrap();
    assert_eq!(manifest["stats"]["saved"], 1);
    assert_eq!(manifest["articles"][0]["filename"], "pairing.md");
    assert_eq!(manifest["articles"][0]["updated_at"], "2024-06-01T00:00:00Z");
}

#[tokio::test]
async fn test_output_directory_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    let output = TempDir::new().expect("Failed to create temp dir");
    let blocked = output.path().join("not-a-dir");
    std::fs::write(&blocked, "file").unwrap();

    mount_untouched(&mock_server, "/categories.json").await;

    let config = create_test_config(&mock_server.uri(), &blocked, None);
    assert!(crawl(&config).await.is_err());
}
