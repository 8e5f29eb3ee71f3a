//! E2E tests for the token-gated analysis endpoint.
//!
//! Covers the access gate (bearer extraction and rejection of absent,
//! malformed, forged, and expired tokens) and the analysis results
//! themselves.

use reqwest::StatusCode;
use serde_json::json;
use ta_test_utils::server_harness::TestServer;

async fn analyze(
    server: &TestServer,
    token: Option<&str>,
    sentence: &str,
) -> Result<reqwest::Response, anyhow::Error> {
    let mut request = server
        .client()
        .post(format!("{}/api/v1/analyze", server.url()))
        .json(&json!({"sentence": sentence}));

    if let Some(token) = token {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    Ok(request.send().await?)
}

/// Test the documented example: "Hello world" has 2 words, 3 vowels, and
/// 7 consonants.
#[tokio::test]
async fn test_analyze_happy_path() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let token = server.obtain_token().await?;

    let response = analyze(&server, Some(&token), "Hello world").await?;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["sentence"].as_str(), Some("Hello world"));
    assert_eq!(body["word_count"].as_u64(), Some(2));
    assert_eq!(body["vowel_count"].as_u64(), Some(3));
    assert_eq!(body["consonant_count"].as_u64(), Some(7));

    Ok(())
}

/// Test that the gate rejects requests with no Authorization header.
#[tokio::test]
async fn test_analyze_missing_token_unauthorized() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;

    let response = analyze(&server, None, "Hello world").await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("INVALID_TOKEN"));

    Ok(())
}

/// Test that a bare token without the Bearer prefix is accepted.
#[tokio::test]
async fn test_analyze_accepts_bare_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let token = server.obtain_token().await?;

    let response = server
        .client()
        .post(format!("{}/api/v1/analyze", server.url()))
        .header("Authorization", &token)
        .json(&json!({"sentence": "Hello"}))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

/// Test that an expired token is rejected even though its signature is
/// correct.
#[tokio::test]
async fn test_analyze_rejects_expired_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let expired = server.issue_expired_token(3600);

    let response = analyze(&server, Some(&expired), "Hello world").await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Test that a token signed under a different secret is rejected.
#[tokio::test]
async fn test_analyze_rejects_foreign_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let foreign = server.issue_foreign_token();

    let response = analyze(&server, Some(&foreign), "Hello world").await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Test that a token with a flipped signature bit is rejected.
#[tokio::test]
async fn test_analyze_rejects_tampered_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let token = server.obtain_token().await?;

    let mut tampered = token.clone();
    let last = tampered.pop().expect("token is non-empty");
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let response = analyze(&server, Some(&tampered), "Hello world").await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Test that truncated tokens are rejected.
#[tokio::test]
async fn test_analyze_rejects_truncated_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let token = server.obtain_token().await?;
    let truncated = token
        .get(..token.len() / 2)
        .expect("half of the token is a char boundary");

    let response = analyze(&server, Some(truncated), "Hello world").await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Test that oversized tokens are rejected.
#[tokio::test]
async fn test_analyze_rejects_oversized_token() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let oversized = "a".repeat(8192);

    let response = analyze(&server, Some(&oversized), "Hello world").await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Test that the same token keeps working across calls: validation is
/// idempotent and has no side effect on the token.
#[tokio::test]
async fn test_analyze_token_is_reusable() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let token = server.obtain_token().await?;

    for _ in 0..2 {
        let response = analyze(&server, Some(&token), "Hello world").await?;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await?;
        assert_eq!(body["word_count"].as_u64(), Some(2));
    }

    Ok(())
}

/// Test that an empty sentence is rejected with a validation error.
#[tokio::test]
async fn test_analyze_empty_sentence_rejected() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let token = server.obtain_token().await?;

    let response = analyze(&server, Some(&token), "").await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"].as_str(), Some("VALIDATION_ERROR"));

    Ok(())
}

/// Test that punctuation and digits affect neither vowels nor consonants.
#[tokio::test]
async fn test_analyze_mixed_content() -> Result<(), anyhow::Error> {
    let server = TestServer::spawn().await?;
    let token = server.obtain_token().await?;

    let response = analyze(&server, Some(&token), "Hello 123 world!").await?;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["word_count"].as_u64(), Some(3));
    assert_eq!(body["vowel_count"].as_u64(), Some(3));
    assert_eq!(body["consonant_count"].as_u64(), Some(7));

    Ok(())
}
