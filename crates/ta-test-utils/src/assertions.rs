//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for token validation.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::Utc;
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// JWT claims structure
#[derive(Debug, Deserialize)]
struct JwtClaims {
    pub sub: String,
    pub username: String,
    pub exp: i64,
    #[expect(dead_code)] // Used for JWT structure validation but not accessed
    pub iat: i64,
    pub iss: String,
}

/// Custom assertions for token responses
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_subject("1")
///     .assert_for_username("admin");
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a valid HS256 JWT format
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token is for the specified subject
    fn assert_for_subject(&self, subject: &str) -> &Self;

    /// Assert that the token carries the specified username
    fn assert_for_username(&self, username: &str) -> &Self;

    /// Assert that the token names the specified issuer
    fn assert_issued_by(&self, issuer: &str) -> &Self;

    /// Assert that the token expires within the specified seconds from now
    fn assert_expires_within(&self, seconds: i64) -> &Self;
}

fn decode_claims(token: &str) -> JwtClaims {
    let parts: Vec<_> = token.split('.').collect();
    assert_eq!(
        parts.len(),
        3,
        "JWT must have 3 parts (header.payload.signature), got {}",
        parts.len()
    );

    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .expect("JWT payload should base64 decode");

    serde_json::from_slice(&payload).expect("JWT claims should parse as JSON")
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts: Vec<_> = self.split('.').collect();
        assert_eq!(
            parts.len(),
            3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts.len()
        );

        // Decode and validate header
        let header_bytes = URL_SAFE_NO_PAD
            .decode(parts[0])
            .expect("JWT header should base64 decode");
        let header: JwtHeader =
            serde_json::from_slice(&header_bytes).expect("JWT header should parse as JSON");

        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        // Decode and validate payload
        decode_claims(self);

        self
    }

    fn assert_for_subject(&self, subject: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.sub, subject,
            "Expected token subject '{}', got '{}'",
            subject, claims.sub
        );
        self
    }

    fn assert_for_username(&self, username: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.username, username,
            "Expected token username '{}', got '{}'",
            username, claims.username
        );
        self
    }

    fn assert_issued_by(&self, issuer: &str) -> &Self {
        let claims = decode_claims(self);
        assert_eq!(
            claims.iss, issuer,
            "Expected token issuer '{}', got '{}'",
            issuer, claims.iss
        );
        self
    }

    fn assert_expires_within(&self, seconds: i64) -> &Self {
        let claims = decode_claims(self);
        let now = Utc::now().timestamp();

        assert!(
            claims.exp > now,
            "Token already expired ({} <= {})",
            claims.exp,
            now
        );
        assert!(
            claims.exp <= now + seconds,
            "Token expires too far in the future ({} > {})",
            claims.exp,
            now + seconds
        );
        self
    }
}
