//! E2E tests for the unauthenticated operational endpoints.

use reqwest::StatusCode;
use ta_test_utils::server_harness::TestServer;

/// Test that the health endpoint responds without authentication.
#[tokio::test]
async fn test_health_endpoint() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = reqwest::get(format!("{}/health", server.url())).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await?, "OK");

    Ok(())
}

/// Test that the metrics endpoint renders without authentication.
#[tokio::test]
async fn test_metrics_endpoint() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = reqwest::get(format!("{}/metrics", server.url())).await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}
