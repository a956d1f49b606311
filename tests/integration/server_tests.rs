//! HTTP trigger tests driven through the router

use crate::common::{link_file, test_source};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use subgist::{Orchestrator, Server};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn get(router: axum::Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Router failed");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, String::from_utf8_lossy(&bytes).into_owned())
}

#[tokio::test]
async fn test_index_page() {
    let server = MockServer::start().await;
    let orchestrator = Orchestrator::new(test_source(&server, "/nonexistent/links.txt"))
        .expect("Failed to build orchestrator");
    let router = Server::router(Arc::new(orchestrator), Some("30 2 * * *".to_string()));

    let (status, body) = get(router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("href=\"/run\""));
    assert!(body.contains("<code>30 2 * * *</code>"));
}

#[tokio::test]
async fn test_run_success_returns_200_with_log() {
    let server = MockServer::start().await;
    let file = link_file("vmess://abc\nvless://def\n");

    Mock::given(method("GET"))
        .and(path("/sub"))
        .respond_with(ResponseTemplate::new(200).set_body_string("merged"))
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(test_source(&server, &file.path().to_string_lossy()))
        .expect("Failed to build orchestrator");
    let router = Server::router(Arc::new(orchestrator), None);

    let (status, body) = get(router, "/run").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Success"));
    assert!(body.contains("Links: 2 (local source)"));
    assert!(body.contains("Received merged document"));
}

#[tokio::test]
async fn test_run_failure_returns_500_with_message() {
    let server = MockServer::start().await;
    let orchestrator = Orchestrator::new(test_source(&server, "/nonexistent/subgist/links.txt"))
        .expect("Failed to build orchestrator");
    let router = Server::router(Arc::new(orchestrator), None);

    let (status, body) = get(router, "/run").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Failed"));
    assert!(body.contains("source not found"));
}

#[tokio::test]
async fn test_concurrent_runs_keep_separate_logs() {
    let server = MockServer::start().await;
    let file = link_file("vmess://abc\n");

    // Slow enough that both runs are in flight at once
    Mock::given(method("GET"))
        .and(path("/sub"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("merged")
                .set_delay(Duration::from_millis(300)),
        )
        .expect(2)
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(test_source(&server, &file.path().to_string_lossy()))
        .expect("Failed to build orchestrator");
    let router = Server::router(Arc::new(orchestrator), None);

    let ((first_status, first_body), (second_status, second_body)) = tokio::join!(
        get(router.clone(), "/run"),
        get(router.clone(), "/run")
    );

    assert_eq!(first_status, StatusCode::OK);
    assert_eq!(second_status, StatusCode::OK);
    for body in [&first_body, &second_body] {
        assert_eq!(body.matches("Starting run").count(), 1, "{}", body);
        assert_eq!(body.matches("Received merged document").count(), 1, "{}", body);
        assert_eq!(body.matches("Run finished").count(), 1, "{}", body);
    }
}

#[tokio::test]
async fn test_concurrent_orchestrator_runs_capture_own_log() {
    let server = MockServer::start().await;
    let file = link_file("vmess://abc\n");

    Mock::given(method("GET"))
        .and(path("/sub"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("merged")
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;

    let orchestrator = Orchestrator::new(test_source(&server, &file.path().to_string_lossy()))
        .expect("Failed to build orchestrator");

    let (first, second) = tokio::join!(orchestrator.run(), orchestrator.run());

    assert!(first.success && second.success);
    for outcome in [&first, &second] {
        assert_eq!(outcome.log.matches("Starting run").count(), 1);
        assert_eq!(outcome.log.matches("Run finished").count(), 1);
    }
}

#[tokio::test]
async fn test_invalid_cron_leaves_http_trigger_running() {
    let server = MockServer::start().await;
    let orchestrator = Orchestrator::new(test_source(&server, "/nonexistent/links.txt"))
        .expect("Failed to build orchestrator");

    let app = Server::new(Arc::new(orchestrator), 0, Some("every tuesday"));

    assert!(app.cron_job().is_none());
    assert_eq!(app.addr().port(), 0);
}
