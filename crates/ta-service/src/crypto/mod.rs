use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::TaError;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Maximum allowed JWT size in bytes (4KB).
///
/// This limit prevents Denial-of-Service attacks via oversized tokens.
/// JWTs larger than this size are rejected before any parsing or
/// cryptographic operations.
///
/// Rationale:
/// - Our standard token is ~300 bytes (HS256 signature, five claims)
/// - 4KB allows reasonable future expansion while preventing abuse
/// - Checked BEFORE base64 decode and signature verification
pub const MAX_JWT_SIZE_BYTES: usize = 4096;

/// Fixed bcrypt hash verified against when a username has no directory
/// entry, so lookup misses cost the same as password mismatches and login
/// timing does not reveal whether a username exists.
pub const DUMMY_PASSWORD_HASH: &str =
    "$2b$12$LQv3c1yqBWVHxkd0LHAkCOYz6TtxMQJqhN8/LewY5GyYqExt7YD3a";

/// JWT claims structure.
///
/// The `sub` and `username` fields identify the account and should not be
/// exposed in logs. A custom Debug implementation redacts both.
#[derive(Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id).
    pub sub: String,

    /// Username the token was issued to.
    pub username: String,

    /// Issued-at timestamp (Unix epoch seconds).
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds).
    pub exp: i64,

    /// Issuing service name.
    pub iss: String,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("sub", &"[REDACTED]")
            .field("username", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .field("iss", &self.iss)
            .finish()
    }
}

fn invalid_token() -> TaError {
    TaError::InvalidToken("The access token is invalid or expired".to_string())
}

/// Sign claims into a compact JWT using HS256.
///
/// Deterministic for identical claims: the header is fixed and HS256 is a
/// keyed MAC with no per-call randomness.
#[instrument(skip_all)]
pub fn sign_token(claims: &Claims, secret: &SecretString) -> Result<String, TaError> {
    let encoding_key = EncodingKey::from_secret(secret.expose_secret().as_bytes());
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &encoding_key)
        .map_err(|e| TaError::Crypto(format!("Token signing operation failed: {}", e)))
}

/// Verify a JWT and extract its claims.
///
/// # Security Checks
///
/// 1. Size check - reject tokens > 4KB before parsing
/// 2. Verify the HS256 signature (the header `alg` is not trusted: the
///    algorithm is pinned by this service, so a token claiming any other
///    scheme fails verification)
/// 3. Validate the `exp` claim with zero leeway - a token whose expiry
///    has passed is invalid even if correctly signed
/// 4. Validate the `iat` claim with clock skew tolerance
///
/// # Errors
///
/// Returns `TaError::InvalidToken` with a generic message for every
/// failure mode, so callers cannot distinguish malformed, forged, and
/// expired tokens.
#[instrument(skip_all)]
pub fn verify_token(
    token: &str,
    secret: &SecretString,
    clock_skew_seconds: i64,
) -> Result<Claims, TaError> {
    // Check token size BEFORE any parsing
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "crypto",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(invalid_token());
    }

    let decoding_key = DecodingKey::from_secret(secret.expose_secret().as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    // Tokens expire exactly at `exp`; no grace period
    validation.leeway = 0;

    // Signature comparison inside decode() is constant-time (ring's
    // verify_slices_are_equal), so mismatches do not leak prefix length.
    let token_data = decode::<Claims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(target: "crypto", error = %e, "Token verification failed");
        invalid_token()
    })?;

    // Reject iat further in the future than the allowed clock skew
    let now = chrono::Utc::now().timestamp();
    let max_iat = now + clock_skew_seconds;

    if token_data.claims.iat > max_iat {
        tracing::debug!(
            target: "crypto",
            iat = token_data.claims.iat,
            now = now,
            max_allowed = max_iat,
            "Token rejected: iat too far in the future"
        );
        return Err(invalid_token());
    }

    Ok(token_data.claims)
}

/// Hash a password with bcrypt using a configurable cost factor.
///
/// # Errors
///
/// Returns `TaError::Crypto` if the cost is outside the valid range
/// (defense-in-depth; config validates the same bounds) or hashing fails.
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, TaError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(TaError::Crypto(format!(
            "Invalid bcrypt cost: {} (must be {}-{})",
            cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
        )));
    }

    bcrypt::hash(password, cost)
        .map_err(|e| TaError::Crypto(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a bcrypt hash.
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, TaError> {
    bcrypt::verify(password, hash)
        .map_err(|e| TaError::Crypto(format!("Password verification failed: {}", e)))
}
