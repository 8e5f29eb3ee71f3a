use crate::handlers::auth_handler::{self, AppState};
use crate::handlers::analysis_handler;
use crate::middleware;
use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Install the Prometheus metrics recorder and return its render handle.
///
/// Must run once per process, before the first request; installing twice
/// fails, which the test harness handles by building a standalone recorder.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let request_timeout = Duration::from_secs(state.config.request_timeout_seconds);

    // Token-gated routes: the auth middleware rejects requests before the
    // handler runs
    let protected = Router::new()
        .route("/api/v1/analyze", post(analysis_handler::handle_analyze))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        // Authentication endpoint
        .route("/auth/login", post(auth_handler::handle_login))
        .merge(protected)
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route(
            "/metrics",
            get(move || async move { metrics_handle.render() }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::new(request_timeout)),
        )
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
