//! Integration tests for robots.txt admission
//!
//! These tests use wiremock to serve robots.txt documents and check the
//! allow/deny decisions, the fail-open behavior and policy caching.

use sumi_scrape::config::ScraperConfig;
use sumi_scrape::crawler::build_http_client;
use sumi_scrape::RobotsGate;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "TestBot/1.0";

fn create_gate() -> RobotsGate {
    let config = ScraperConfig {
        user_agent: USER_AGENT.to_string(),
        timeout_secs: 2,
        ..ScraperConfig::default()
    };
    RobotsGate::new(build_http_client(&config).expect("Failed to build client"))
}

async fn serve_robots(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;
    mock_server
}

#[tokio::test]
async fn test_allows_permitted_paths() {
    let mock_server = serve_robots(200, "User-agent: *\nDisallow: /admin").await;
    let gate = create_gate();

    let base_url = mock_server.uri();
    assert!(gate.can_fetch(&format!("{}/", base_url), USER_AGENT).await);
    assert!(gate.can_fetch(&format!("{}/articles/1", base_url), USER_AGENT).await);
}

#[tokio::test]
async fn test_denies_disallowed_paths() {
    let mock_server = serve_robots(200, "User-agent: *\nDisallow: /admin").await;
    let gate = create_gate();

    let base_url = mock_server.uri();
    assert!(!gate.can_fetch(&format!("{}/admin", base_url), USER_AGENT).await);
    assert!(!gate.can_fetch(&format!("{}/admin/users", base_url), USER_AGENT).await);
}

#[tokio::test]
async fn test_agent_specific_group() {
    let mock_server = serve_robots(
        200,
        "User-agent: TestBot\nDisallow: /\n\nUser-agent: *\nAllow: /",
    )
    .await;
    let gate = create_gate();

    let url = format!("{}/page", mock_server.uri());
    assert!(!gate.can_fetch(&url, USER_AGENT).await);
    assert!(gate.can_fetch(&url, "OtherBot/2.0").await);
}

#[tokio::test]
async fn test_fails_open_on_server_error() {
    let mock_server = serve_robots(500, "").await;
    let gate = create_gate();

    assert!(gate.can_fetch(&format!("{}/page", mock_server.uri()), USER_AGENT).await);
}

#[tokio::test]
async fn test_fails_open_when_unreachable() {
    let gate = create_gate();

    // Nothing listens on port 1
    assert!(gate.can_fetch("http://127.0.0.1:1/page", USER_AGENT).await);
}

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let mock_server = serve_robots(404, "Not Found").await;
    let gate = create_gate();

    assert!(gate.can_fetch(&format!("{}/anything", mock_server.uri()), USER_AGENT).await);
}

#[tokio::test]
async fn test_forbidden_robots_denies_everything() {
    let mock_server = serve_robots(403, "Forbidden").await;
    let gate = create_gate();

    assert!(!gate.can_fetch(&format!("{}/anything", mock_server.uri()), USER_AGENT).await);
}

#[tokio::test]
async fn test_malformed_robots_allows() {
    let mock_server = serve_robots(200, "{{{ this is not robots.txt }}}").await;
    let gate = create_gate();

    assert!(gate.can_fetch(&format!("{}/page", mock_server.uri()), USER_AGENT).await);
}

#[tokio::test]
async fn test_policy_is_cached_per_site() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /x"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let gate = create_gate();
    let base_url = mock_server.uri();

    assert!(gate.can_fetch(&format!("{}/a", base_url), USER_AGENT).await);
    assert!(gate.can_fetch(&format!("{}/b", base_url), USER_AGENT).await);
    assert!(!gate.can_fetch(&format!("{}/x", base_url), USER_AGENT).await);
    assert_eq!(gate.cached_policies().await, 1);
}

#[tokio::test]
async fn test_failed_lookup_is_not_cached() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&mock_server)
        .await;

    let gate = create_gate();
    let url = format!("{}/page", mock_server.uri());

    assert!(gate.can_fetch(&url, USER_AGENT).await);
    assert!(gate.can_fetch(&url, USER_AGENT).await);
    assert_eq!(gate.cached_policies().await, 0);
}

#[tokio::test]
async fn test_invalid_url_fails_open() {
    let gate = create_gate();
    assert!(gate.can_fetch("not a url", USER_AGENT).await);
}
