//! Builder patterns for test data construction
//!
//! Provides a fluent API for forging signed test tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;

#[derive(Serialize)]
struct TestClaims {
    sub: String,
    username: String,
    iat: i64,
    exp: i64,
    iss: String,
}

/// Builder for creating signed test JWTs
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_user("1", "admin")
///     .expires_in(3600)
///     .sign("some-secret");
/// ```
pub struct TestTokenBuilder {
    sub: String,
    username: String,
    iss: String,
    iat: i64,
    exp: i64,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults matching the provisioned
    /// test account
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            sub: "1".to_string(),
            username: "admin".to_string(),
            iss: "ta-service".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(3600)).timestamp(),
        }
    }

    /// Set the subject and username
    pub fn for_user(mut self, id: &str, username: &str) -> Self {
        self.sub = id.to_string();
        self.username = username.to_string();
        self
    }

    /// Set the issuer
    pub fn issuer(mut self, issuer: &str) -> Self {
        self.iss = issuer.to_string();
        self
    }

    /// Set expiration in seconds from now
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    /// Make the token already expired, with its issue time an hour before
    /// the expiry
    pub fn expired_seconds_ago(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() - Duration::seconds(seconds)).timestamp();
        self.iat = self.exp - 3600;
        self
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Sign the claims with HS256 under the given secret
    pub fn sign(self, secret: &str) -> String {
        let claims = TestClaims {
            sub: self.sub,
            username: self.username,
            iat: self.iat,
            exp: self.exp,
            iss: self.iss,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("signing a test token should not fail")
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
