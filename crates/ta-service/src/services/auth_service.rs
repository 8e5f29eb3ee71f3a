//! Authentication service: credential verification, token issuance, and
//! token validation.
//!
//! Built once at startup from explicit configuration and shared across
//! requests; holds no per-call state.

use crate::config::Config;
use crate::crypto::{self, Claims, DUMMY_PASSWORD_HASH};
use crate::errors::TaError;
use crate::models::{AuthenticatedUser, LoginResponse};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_bcrypt_duration;
use crate::repositories::users::UserDirectory;
use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

pub struct AuthService {
    users: Arc<UserDirectory>,
    jwt_secret: SecretString,
    token_ttl_seconds: i64,
    token_issuer: String,
    jwt_clock_skew_seconds: i64,
}

impl AuthService {
    /// Build the service from configuration and the provisioned directory.
    pub fn new(config: &Config, users: Arc<UserDirectory>) -> Self {
        Self {
            users,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_seconds: config.token_ttl_seconds,
            token_issuer: config.token_issuer.clone(),
            jwt_clock_skew_seconds: config.jwt_clock_skew_seconds,
        }
    }

    /// Verify credentials and issue a signed token.
    ///
    /// # Security
    ///
    /// - Unknown usernames are verified against a dummy bcrypt hash so the
    ///   call costs the same as a password mismatch (no username
    ///   enumeration via timing)
    /// - Both failure modes return the same `InvalidCredentials` error;
    ///   only debug-level logs distinguish them, and usernames appear
    ///   there as correlation hashes
    #[instrument(skip_all)]
    pub fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, TaError> {
        let user = self.users.get_by_username(username);

        // Always run bcrypt, even when the username is unknown
        let hash_to_verify = match user {
            Some(u) => u.password_hash.as_str(),
            None => DUMMY_PASSWORD_HASH,
        };

        let verify_start = Instant::now();
        let password_matches = crypto::verify_password(password.expose_secret(), hash_to_verify)?;
        record_bcrypt_duration("verify", verify_start.elapsed());

        let user = match user {
            Some(u) => u,
            None => {
                tracing::debug!(
                    target: "ta.auth",
                    username_hash = %hash_for_correlation(username),
                    "Login failed: unknown username"
                );
                return Err(TaError::InvalidCredentials);
            }
        };

        if !password_matches {
            tracing::debug!(
                target: "ta.auth",
                username_hash = %hash_for_correlation(username),
                "Login failed: password mismatch"
            );
            return Err(TaError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            iat: now,
            exp: now + self.token_ttl_seconds,
            iss: self.token_issuer.clone(),
        };

        let token = crypto::sign_token(&claims, &self.jwt_secret)?;

        tracing::debug!(
            target: "ta.auth",
            username_hash = %hash_for_correlation(username),
            expires_in = self.token_ttl_seconds,
            "Login succeeded"
        );

        Ok(LoginResponse {
            token,
            expires_in: self.token_ttl_seconds.unsigned_abs(),
        })
    }

    /// Validate a token and recover the identity it was issued to.
    ///
    /// The identity view is rebuilt purely from the claims; the directory
    /// is not consulted again, so the view is stale-tolerant for the
    /// token's remaining lifetime. Validation has no side effects and is
    /// idempotent.
    #[instrument(skip_all)]
    pub fn validate(&self, token: &str) -> Result<AuthenticatedUser, TaError> {
        let claims = crypto::verify_token(token, &self.jwt_secret, self.jwt_clock_skew_seconds)?;

        Ok(AuthenticatedUser {
            id: claims.sub,
            username: claims.username,
        })
    }
}
