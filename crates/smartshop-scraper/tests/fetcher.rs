//! Integration tests for `Fetcher::fetch` outcome classification.
//!
//! Every test stands up its own `wiremock` server; no real storefront is
//! contacted.

use std::time::{Duration, Instant};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use smartshop_core::Platform;
use smartshop_scraper::{EmptyCause, Fetcher, FetcherConfig};

fn test_fetcher(timeout_secs: u64, throttle_delay_ms: u64) -> Fetcher {
    Fetcher::new(&FetcherConfig {
        timeout_secs,
        pool_max_idle_per_host: 1,
        throttle_delay_ms,
    })
    .expect("failed to build test Fetcher")
}

async fn server_responding(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

async fn fetch_status(status: u16) -> Result<String, EmptyCause> {
    let server = server_responding(ResponseTemplate::new(status)).await;
    test_fetcher(5, 0)
        .fetch(Platform::Flipkart, &format!("{}/search?q=milk", server.uri()))
        .await
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ok_response_returns_body() {
    let server = server_responding(
        ResponseTemplate::new(200).set_body_raw("<html><body>results</body></html>", "text/html"),
    )
    .await;

    let body = test_fetcher(5, 0)
        .fetch(Platform::Amazon, &format!("{}/search?q=milk", server.uri()))
        .await
        .expect("expected body on 200");

    assert!(body.contains("results"));
}

#[tokio::test]
async fn forbidden_is_blocked() {
    assert_eq!(fetch_status(403).await, Err(EmptyCause::Blocked));
}

#[tokio::test]
async fn too_many_requests_is_rate_limited() {
    assert_eq!(fetch_status(429).await, Err(EmptyCause::RateLimited));
}

#[tokio::test]
async fn other_statuses_are_failed_with_code() {
    assert_eq!(
        fetch_status(500).await,
        Err(EmptyCause::Failed { status: 500 })
    );
    assert_eq!(
        fetch_status(404).await,
        Err(EmptyCause::Failed { status: 404 })
    );
}

// ---------------------------------------------------------------------------
// Transport failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn slow_response_is_timeout() {
    let server =
        server_responding(ResponseTemplate::new(200).set_delay(Duration::from_secs(3))).await;

    let result = test_fetcher(1, 0)
        .fetch(Platform::Flipkart, &format!("{}/search?q=milk", server.uri()))
        .await;

    assert_eq!(result, Err(EmptyCause::Timeout));
}

// ---------------------------------------------------------------------------
// Throttling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn meesho_requests_wait_for_throttle_delay() {
    let server = server_responding(ResponseTemplate::new(200).set_body_string("ok")).await;
    let fetcher = test_fetcher(5, 300);

    let started = Instant::now();
    let result = fetcher
        .fetch(Platform::Meesho, &format!("{}/search?q=milk", server.uri()))
        .await;
    let elapsed = started.elapsed();

    assert_eq!(result, Ok("ok".to_owned()));
    assert!(
        elapsed >= Duration::from_millis(300),
        "meesho request was not delayed: {elapsed:?}"
    );
}

#[tokio::test]
async fn unthrottled_sites_skip_the_delay() {
    let server = server_responding(ResponseTemplate::new(200).set_body_string("ok")).await;
    let fetcher = test_fetcher(5, 2_000);

    let started = Instant::now();
    let result = fetcher
        .fetch(Platform::Flipkart, &format!("{}/search?q=milk", server.uri()))
        .await;
    let elapsed = started.elapsed();

    assert_eq!(result, Ok("ok".to_owned()));
    assert!(
        elapsed < Duration::from_millis(1_500),
        "flipkart request waited for the throttle: {elapsed:?}"
    );
}
