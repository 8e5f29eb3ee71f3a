use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Login request body.
///
/// The password is wrapped in `SecretString` so Debug output and tracing
/// show `[REDACTED]`; the plaintext is zeroized when the request is dropped.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    /// Remaining token lifetime in seconds.
    pub expires_in: u64,
}

/// Minimal identity view recovered from a validated token.
///
/// Reconstructed purely from token claims; the user directory is not
/// consulted again, so a validated identity reflects the account as it was
/// at issuance for the remainder of the token's lifetime.
#[derive(Clone, Serialize)]
pub struct AuthenticatedUser {
    pub id: String,
    pub username: String,
}

/// Custom Debug implementation that redacts account identifiers.
impl fmt::Debug for AuthenticatedUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedUser")
            .field("id", &"[REDACTED]")
            .field("username", &"[REDACTED]")
            .finish()
    }
}

/// Text analysis request body.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub sentence: String,
}

/// Text analysis result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub sentence: String,
    pub word_count: usize,
    pub vowel_count: usize,
    pub consonant_count: usize,
}
