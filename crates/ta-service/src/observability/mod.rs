//! Observability module for the text analysis service.
//!
//! # Privacy by Default
//!
//! All handler instrumentation uses `#[instrument(skip_all)]` and explicit
//! safe field allow-listing. Fields are categorized as:
//! - **SAFE**: Can be logged in plaintext (statuses, operation types)
//! - **HASHED**: Must be hashed for correlation (usernames)
//! - **NEVER**: Must never appear in logs (passwords, tokens, the JWT secret)

pub mod metrics;

use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars).
///
/// Used for fields like `username` that need correlation across log entries
/// but should not be stored in plaintext.
///
/// # Privacy
///
/// This is NOT cryptographically secure for secrets - it's a one-way hash
/// for correlation purposes only. The truncation to 8 chars provides
/// sufficient uniqueness for debugging while limiting reversibility.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    // First 8 hex chars (32 bits): enough for correlation, limits reversibility
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Authentication failures (invalid credentials)
    Authentication,
    /// Cryptographic errors (invalid token, signing failure)
    Cryptographic,
    /// Request validation failures (malformed input)
    Validation,
    /// Internal errors
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::Cryptographic => "cryptographic",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl From<&crate::errors::TaError> for ErrorCategory {
    fn from(err: &crate::errors::TaError) -> Self {
        use crate::errors::TaError;
        match err {
            TaError::InvalidCredentials => ErrorCategory::Authentication,
            TaError::InvalidToken(_) | TaError::Crypto(_) => ErrorCategory::Cryptographic,
            TaError::Validation(_) => ErrorCategory::Validation,
            TaError::Internal => ErrorCategory::Internal,
        }
    }
}
