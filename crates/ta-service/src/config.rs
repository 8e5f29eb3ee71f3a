use secrecy::SecretString;
use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Minimum accepted JWT secret length in bytes.
///
/// The secret keys every token issued by the service; a short secret makes
/// offline brute force of the HMAC practical. Startup fails closed rather
/// than running with a guessable key.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

/// Token lifetime default (24 hours).
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;

/// Bcrypt cost bounds. Cost < 10 is insecure per OWASP guidance,
/// cost > 14 causes excessive login latency.
pub const MIN_BCRYPT_COST: u32 = 10;
pub const MAX_BCRYPT_COST: u32 = 14;
pub const DEFAULT_BCRYPT_COST: u32 = 12;

/// Clock skew tolerance applied to the `iat` claim.
pub const DEFAULT_JWT_CLOCK_SKEW_SECONDS: i64 = 300;
pub const MAX_JWT_CLOCK_SKEW_SECONDS: i64 = 900;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_TOKEN_ISSUER: &str = "ta-service";
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    /// Symmetric signing key for every issued token. Wrapped in
    /// `SecretString` so Debug output and logs show `[REDACTED]`.
    pub jwt_secret: SecretString,
    pub token_ttl_seconds: i64,
    pub token_issuer: String,
    pub bcrypt_cost: u32,
    pub jwt_clock_skew_seconds: i64,
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Rejected JWT secret: {0}")]
    WeakJwtSecret(String),

    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let jwt_secret = vars
            .get("TA_JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("TA_JWT_SECRET".to_string()))?;

        if jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::WeakJwtSecret(format!(
                "Expected at least {} bytes, got {}",
                MIN_JWT_SECRET_BYTES,
                jwt_secret.len()
            )));
        }

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let token_ttl_seconds =
            parse_var(vars, "TOKEN_TTL_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?;
        if token_ttl_seconds <= 0 {
            return Err(ConfigError::InvalidValue {
                var: "TOKEN_TTL_SECONDS".to_string(),
                reason: format!("must be positive, got {}", token_ttl_seconds),
            });
        }

        let bcrypt_cost = parse_var(vars, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?;
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                var: "BCRYPT_COST".to_string(),
                reason: format!(
                    "must be {}-{}, got {}",
                    MIN_BCRYPT_COST, MAX_BCRYPT_COST, bcrypt_cost
                ),
            });
        }

        let jwt_clock_skew_seconds = parse_var(
            vars,
            "JWT_CLOCK_SKEW_SECONDS",
            DEFAULT_JWT_CLOCK_SKEW_SECONDS,
        )?;
        if !(0..=MAX_JWT_CLOCK_SKEW_SECONDS).contains(&jwt_clock_skew_seconds) {
            return Err(ConfigError::InvalidValue {
                var: "JWT_CLOCK_SKEW_SECONDS".to_string(),
                reason: format!(
                    "must be 0-{}, got {}",
                    MAX_JWT_CLOCK_SKEW_SECONDS, jwt_clock_skew_seconds
                ),
            });
        }

        let token_issuer = vars
            .get("TOKEN_ISSUER")
            .cloned()
            .unwrap_or_else(|| DEFAULT_TOKEN_ISSUER.to_string());

        let request_timeout_seconds = parse_var(
            vars,
            "REQUEST_TIMEOUT_SECONDS",
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
        )?;

        Ok(Config {
            bind_address,
            jwt_secret: SecretString::from(jwt_secret.clone()),
            token_ttl_seconds,
            token_issuer,
            bcrypt_cost,
            jwt_clock_skew_seconds,
            request_timeout_seconds,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    vars: &HashMap<String, String>,
    var: &str,
    default: T,
) -> Result<T, ConfigError> {
    match vars.get(var) {
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            reason: format!("failed to parse '{}'", raw),
        }),
        None => Ok(default),
    }
}
