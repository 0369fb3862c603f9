//! Health endpoints and cross-cutting response headers.

use reqwest::StatusCode;

use tinycart_integration_tests::TestServer;

#[tokio::test]
async fn test_health() {
    let server = TestServer::start().await;

    let resp = server.client().get(server.url("/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");
}

#[tokio::test]
async fn test_readiness_checks_database() {
    let server = TestServer::start().await;

    let resp = server
        .client()
        .get(server.url("/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await;

    let resp = server
        .client()
        .get(server.url("/health"))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.headers()["x-request-id"], "trace-me-123");

    let resp = server.client().get(server.url("/health")).send().await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}
