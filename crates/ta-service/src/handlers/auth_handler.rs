use crate::config::Config;
use crate::errors::TaError;
use crate::models::{LoginRequest, LoginResponse};
use crate::observability::metrics::record_login;
use crate::services::auth_service::AuthService;
use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub config: Config,
}

/// Handle login request.
///
/// POST /auth/login
///
/// Verifies the submitted credentials and returns a signed token with its
/// remaining lifetime in seconds. Failures surface as a single generic
/// 401 regardless of cause.
///
/// Instrumented with skip_all so credentials never reach logs.
#[instrument(name = "ta.auth.login", skip_all, fields(status))]
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, TaError> {
    let start = Instant::now();

    let result = state.auth.login(&payload.username, &payload.password);

    let status = if result.is_ok() { "success" } else { "error" };
    tracing::Span::current().record("status", status);
    record_login(status, start.elapsed());

    Ok(Json(result?))
}
