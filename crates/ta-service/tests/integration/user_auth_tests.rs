//! E2E tests for the login flow.
//!
//! Tests credential verification and token issuance through the real HTTP
//! surface.
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use reqwest::StatusCode;
use serde_json::json;
use ta_test_utils::assertions::TokenAssertions;
use ta_test_utils::server_harness::TestServer;

/// Test that the provisioned account can log in and gets a 24h token.
#[tokio::test]
async fn test_login_happy_path() -> Result<(), anyhow::Error> {
    // Arrange
    let server = TestServer::spawn().await?;

    // Act
    let response = server.login("admin", "password").await?;

    // Assert
    assert_eq!(response.status(), StatusCode::OK, "Login should succeed");

    let body: serde_json::Value = response.json().await?;
    assert_eq!(
        body["expires_in"].as_u64(),
        Some(86_400),
        "Default token lifetime should be 24 hours"
    );

    let token = body["token"]
        .as_str()
        .expect("Response should include token")
        .to_string();

    token
        .assert_valid_jwt()
        .assert_for_subject("1")
        .assert_for_username("admin")
        .assert_issued_by("ta-service")
        .assert_expires_within(86_400);

    Ok(())
}

/// Test that a freshly issued token is immediately accepted by the
/// protected endpoint and attributes the call to the right identity.
#[tokio::test]
async fn test_login_token_grants_access() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let token = server.obtain_token().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/analyze", server.url()))
        .bearer_auth(&token)
        .json(&json!({"sentence": "Hello world"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

/// Test that a wrong password is rejected with the generic error.
#[tokio::test]
async fn test_login_wrong_password_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = server.login("admin", "wrong").await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("AUTHENTICATION_FAILED"));

    Ok(())
}

/// Test that an unknown username fails with a response byte-identical to
/// the wrong-password case, so the error surface cannot be used for
/// username enumeration.
#[tokio::test]
async fn test_login_unknown_user_indistinguishable() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let unknown = server.login("ghost", "anything").await?;
    let unknown_status = unknown.status();
    let unknown_body: serde_json::Value = unknown.json().await?;

    let mismatch = server.login("admin", "wrong").await?;
    let mismatch_status = mismatch.status();
    let mismatch_body: serde_json::Value = mismatch.json().await?;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(mismatch_status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        unknown_body, mismatch_body,
        "Unknown-user and wrong-password responses must be identical"
    );

    Ok(())
}

/// Test that neither failure response leaks stored hashes or internals.
#[tokio::test]
async fn test_login_failure_leaks_no_internals() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = server.login("admin", "wrong").await?;
    let text = response.text().await?;

    assert!(!text.contains("$2"), "Response must not contain bcrypt hashes");
    assert!(!text.contains("not found"), "Response must not name the cause");
    assert!(!text.contains("mismatch"), "Response must not name the cause");

    Ok(())
}

/// Test that a structurally invalid request body is rejected before the
/// engine runs.
#[tokio::test]
async fn test_login_malformed_body_rejected() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/auth/login", server.url()))
        .json(&json!({"username": "admin"})) // password missing
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    Ok(())
}

/// Test that two logins issue independently verifiable tokens.
#[tokio::test]
async fn test_login_repeatable() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let first = server.obtain_token().await?;
    let second = server.obtain_token().await?;

    first.assert_valid_jwt().assert_for_subject("1");
    second.assert_valid_jwt().assert_for_subject("1");

    Ok(())
}
