//! Integration tests using mock HTTP server
//!
//! Tests the full flow: listings API → page source → fetcher → CLI output

use bulvds_feed::cli::{Cli, Runner};
use bulvds_feed::http::{HttpClient, HttpClientConfig};
use bulvds_feed::pagination::{
    FetchError, FetcherConfig, HttpPageSource, MemorySink, PagedFetcher,
};
use clap::Parser;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LISTINGS_PATH: &str = "/guest/property";

fn page_body(ids: &[u32], page_count: Option<u32>) -> Value {
    let data: Vec<Value> = ids.iter().map(|id| json!({ "id": id })).collect();
    match page_count {
        Some(count) => json!({ "status": true, "data": data, "meta": { "pageCount": count } }),
        None => json!({ "status": true, "data": data }),
    }
}

async fn mount_page(server: &MockServer, page: u32, response: ResponseTemplate, expect: u64) {
    Mock::given(method("GET"))
        .and(path(LISTINGS_PATH))
        .and(query_param("page", page.to_string()))
        .respond_with(response)
        .expect(expect)
        .mount(server)
        .await;
}

fn fetcher_for(server: &MockServer) -> PagedFetcher<HttpPageSource> {
    let config = HttpClientConfig::builder()
        .base_url(server.uri())
        .timeout(Duration::from_secs(5))
        .build();
    let client = HttpClient::with_config(config).unwrap();
    PagedFetcher::new(HttpPageSource::new(client, LISTINGS_PATH))
}

fn ids(items: &[Value]) -> Vec<u64> {
    items.iter().map(|item| item["id"].as_u64().unwrap()).collect()
}

// ============================================================================
// Fetcher over HTTP
// ============================================================================

#[tokio::test]
async fn test_single_page_is_one_request() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(&[1, 2, 3], None)),
        1,
    )
    .await;

    let items = fetcher_for(&server).fetch_all(10).await.unwrap();

    assert_eq!(ids(&items), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_all_pages_merged_in_page_order() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], Some(3))),
        1,
    )
    .await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200)
            .set_body_json(page_body(&[3, 4], Some(3)))
            .set_delay(Duration::from_millis(300)),
        1,
    )
    .await;
    mount_page(
        &server,
        3,
        ResponseTemplate::new(200).set_body_json(page_body(&[5], Some(3))),
        1,
    )
    .await;

    let items = fetcher_for(&server).fetch_all(2).await.unwrap();

    assert_eq!(ids(&items), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_slow_pages_overlap() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(&[1], Some(4))),
        1,
    )
    .await;
    for page in 2..=4 {
        mount_page(
            &server,
            page,
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[page], Some(4)))
                .set_delay(Duration::from_millis(400)),
            1,
        )
        .await;
    }

    let started = std::time::Instant::now();
    let items = fetcher_for(&server).fetch_all(1).await.unwrap();

    assert_eq!(ids(&items), vec![1, 2, 3, 4]);
    // Three sequential 400ms pages would take at least 1200ms
    assert!(started.elapsed() < Duration::from_millis(1_100));
}

#[tokio::test]
async fn test_first_page_500_stops_everything() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(500), 1).await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(page_body(&[9], Some(2))),
        0,
    )
    .await;

    let sink = Arc::new(MemorySink::new());
    let err = fetcher_for(&server)
        .with_sink(sink.clone())
        .fetch_all(10)
        .await
        .unwrap_err();

    assert_eq!(err, FetchError::Transport { status: 500 });
    assert_eq!(sink.failed_pages(), vec![1]);
}

#[tokio::test]
async fn test_middle_page_failure_keeps_others() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(&[1], Some(3))),
        1,
    )
    .await;
    mount_page(&server, 2, ResponseTemplate::new(503), 1).await;
    mount_page(
        &server,
        3,
        ResponseTemplate::new(200).set_body_json(page_body(&[3], Some(3))),
        1,
    )
    .await;

    let report = fetcher_for(&server).fetch_all_report(10).await.unwrap();

    assert_eq!(ids(&report.items), vec![1, 3]);
    assert_eq!(report.failed_page_numbers(), vec![2]);
    assert_eq!(
        report.failed_pages[&2],
        FetchError::Transport { status: 503 }
    );
}

#[tokio::test]
async fn test_status_false_on_first_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "status": false, "message": "quota exceeded" })),
        2,
    )
    .await;

    // one request from fetch_page, one from fetch_all
    let fetcher = fetcher_for(&server);
    let page_err = fetcher.fetch_page(1, 10).await.unwrap_err();
    let all_err = fetcher.fetch_all(10).await.unwrap_err();

    let expected = FetchError::Application {
        message: "quota exceeded".to_string(),
    };
    assert_eq!(page_err, expected);
    assert_eq!(all_err, expected);
}

#[tokio::test]
async fn test_falsy_page_count_is_single_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "data": [{ "id": 1 }, { "id": 2 }],
            "meta": { "pageCount": false }
        })),
        1,
    )
    .await;

    let items = fetcher_for(&server).fetch_all(10).await.unwrap();

    assert_eq!(ids(&items), vec![1, 2]);
}

#[tokio::test]
async fn test_unchanged_backend_gives_identical_results() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], Some(2))),
        2,
    )
    .await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(page_body(&[3], Some(2))),
        2,
    )
    .await;

    let fetcher = fetcher_for(&server);
    let first = fetcher.fetch_all(2).await.unwrap();
    let second = fetcher.fetch_all(2).await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_deadline_cuts_slow_page() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(&[1], Some(2))),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path(LISTINGS_PATH))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page_body(&[2], Some(2)))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let report = fetcher_for(&server)
        .with_config(FetcherConfig::new().with_deadline(Duration::from_millis(500)))
        .fetch_all_report(10)
        .await
        .unwrap();

    assert_eq!(ids(&report.items), vec![1]);
    assert!(report.timed_out);
    assert!(report.failed_pages[&2].is_deadline());
}

// ============================================================================
// CLI Runner
// ============================================================================

#[tokio::test]
async fn test_cli_listings_json_lines() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(&[1], Some(2))),
        1,
    )
    .await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(page_body(&[2], Some(2))),
        1,
    )
    .await;

    let url = format!("{}{LISTINGS_PATH}", server.uri());
    let cli = Cli::parse_from(["bulvds-feed", "listings", "--url", &url, "--per-page", "15"]);
    let mut out = Vec::new();
    Runner::new(cli).execute(&mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, vec![r#"{"id":1}"#, r#"{"id":2}"#]);
}

#[tokio::test]
async fn test_cli_listings_report() {
    let server = MockServer::start().await;
    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(page_body(&[1], Some(2))),
        1,
    )
    .await;
    mount_page(&server, 2, ResponseTemplate::new(404), 1).await;

    let url = format!("{}{LISTINGS_PATH}", server.uri());
    let cli = Cli::parse_from(["bulvds-feed", "listings", "--url", &url, "--report"]);
    let mut out = Vec::new();
    Runner::new(cli).execute(&mut out).await.unwrap();

    let report: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["items"], json!([{ "id": 1 }]));
    assert_eq!(report["failed_pages"]["2"]["kind"], "transport");
    assert_eq!(report["timed_out"], false);
    assert_eq!(report["skipped_pages"], Value::Null);
    assert_eq!(report["stats"]["pages_requested"], 2);
    assert_eq!(report["stats"]["pages_fetched"], 1);
}

#[tokio::test]
async fn test_cli_listings_report_page_cap() {
    let server = MockServer::start().await;
    for page in 1..=2 {
        mount_page(
            &server,
            page,
            ResponseTemplate::new(200).set_body_json(page_body(&[page], Some(500))),
            1,
        )
        .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("feed.yaml");
    std::fs::write(
        &config_path,
        format!("listings_url: \"{}{LISTINGS_PATH}\"\nmax_pages: 2\n", server.uri()),
    )
    .unwrap();

    let cli = Cli::parse_from([
        "bulvds-feed",
        "-C",
        config_path.to_str().unwrap(),
        "listings",
        "--report",
    ]);
    let mut out = Vec::new();
    Runner::new(cli).execute(&mut out).await.unwrap();

    let report: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["items"], json!([{ "id": 1 }, { "id": 2 }]));
    assert_eq!(report["skipped_pages"], json!({ "from": 3, "to": 500 }));
    assert_eq!(report["stats"]["pages_reported"], 500);
    assert_eq!(report["stats"]["pages_requested"], 2);
}

#[tokio::test]
async fn test_cli_listings_first_page_failure_is_error() {
    let server = MockServer::start().await;
    mount_page(&server, 1, ResponseTemplate::new(500), 1).await;

    let url = format!("{}{LISTINGS_PATH}", server.uri());
    let cli = Cli::parse_from(["bulvds-feed", "listings", "--url", &url]);
    let mut out = Vec::new();
    let err = Runner::new(cli).execute(&mut out).await.unwrap_err();

    assert_eq!(err.to_string(), "Page fetch failed: HTTP status 500");
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_cli_content_faq_pretty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data/faq.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "question": "Is it free?", "answer": "Yes." },
            { "id": 2, "question": "Where?", "answer": "Lagos." }
        ])))
        .mount(&server)
        .await;

    let cli = Cli::parse_from([
        "bulvds-feed",
        "--format",
        "pretty",
        "content",
        "faq",
        "--site-url",
        &server.uri(),
    ]);
    let mut out = Vec::new();
    Runner::new(cli).execute(&mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("01 Is it free?"));
    assert!(text.contains("02 Where?"));
}

#[tokio::test]
async fn test_cli_content_requires_site_url() {
    let cli = Cli::parse_from(["bulvds-feed", "content", "footer"]);
    let mut out = Vec::new();
    let err = Runner::new(cli).execute(&mut out).await.unwrap_err();

    assert_eq!(err.to_string(), "Missing required config field: site_url");
}

#[tokio::test]
async fn test_cli_config_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feed.yaml");
    std::fs::write(&path, "per_page: 15\ndeadline_ms: 750\n").unwrap();

    let cli = Cli::parse_from(["bulvds-feed", "-C", path.to_str().unwrap(), "config"]);
    let mut out = Vec::new();
    Runner::new(cli).execute(&mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("per_page: 15"));
    assert!(text.contains("deadline_ms: 750"));
    assert!(text.contains("https://api.bulvds.com/guest/property"));
}

#[tokio::test]
async fn test_cli_stamp_json() {
    let cli = Cli::parse_from(["bulvds-feed", "stamp"]);
    let mut out = Vec::new();
    Runner::new(cli).execute(&mut out).await.unwrap();

    let stamp: Value = serde_json::from_slice(&out).unwrap();
    assert!(stamp["time"].as_str().unwrap().contains("-Time{"));
    assert_eq!(stamp["date"].as_str().unwrap().len(), 10);
    assert_eq!(stamp["year"].as_str().unwrap().len(), 4);
}
