//! Metrics definitions for the text analysis service.
//!
//! All metrics follow Prometheus naming conventions:
//! - `ta_` prefix for the service
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! Labels are bounded to prevent cardinality explosion:
//! - `status`: 2 values (success, error)
//! - `error_category`: 4 values (authentication, cryptographic, validation,
//!   internal) plus "none"

use metrics::{counter, histogram};
use std::time::Duration;

/// Record a login attempt's duration and outcome.
///
/// Metric: `ta_login_duration_seconds`, `ta_login_total`
/// Labels: `status`
///
/// Failed and successful logins land in the same histogram; the dummy-hash
/// verification keeps their durations comparable by construction.
pub fn record_login(status: &str, duration: Duration) {
    histogram!("ta_login_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("ta_login_total", "status" => status.to_string()).increment(1);
}

/// Record a token validation result.
///
/// Metric: `ta_token_validations_total`
/// Labels: `status`, `error_category`
pub fn record_token_validation(status: &str, error_category: Option<&str>) {
    let category = error_category.unwrap_or("none");
    counter!("ta_token_validations_total", "status" => status.to_string(), "error_category" => category.to_string())
        .increment(1);
}

/// Record a text analysis request's duration and outcome.
///
/// Metric: `ta_analysis_duration_seconds`, `ta_analysis_total`
/// Labels: `status`
pub fn record_analysis(status: &str, duration: Duration) {
    histogram!("ta_analysis_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("ta_analysis_total", "status" => status.to_string()).increment(1);
}

/// Record bcrypt operation duration.
///
/// Metric: `ta_bcrypt_duration_seconds`
/// Labels: `operation` (hash, verify)
pub fn record_bcrypt_duration(operation: &str, duration: Duration) {
    histogram!("ta_bcrypt_duration_seconds", "operation" => operation.to_string())
        .record(duration.as_secs_f64());
}
