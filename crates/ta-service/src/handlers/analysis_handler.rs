use crate::errors::TaError;
use crate::handlers::auth_handler::AppState;
use crate::models::{AnalysisResponse, AnalyzeRequest, AuthenticatedUser};
use crate::observability::hash_for_correlation;
use crate::observability::metrics::record_analysis;
use crate::services::analysis_service;
use axum::{extract::State, Extension, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;

/// Handle text analysis request.
///
/// POST /api/v1/analyze
///
/// Protected route: the access gate middleware has already validated the
/// bearer token and injected the recovered identity into request
/// extensions.
#[instrument(name = "ta.analysis.analyze", skip_all, fields(status))]
pub async fn handle_analyze(
    State(_state): State<Arc<AppState>>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, TaError> {
    let start = Instant::now();

    if payload.sentence.is_empty() {
        tracing::Span::current().record("status", "error");
        record_analysis("error", start.elapsed());
        return Err(TaError::Validation("Sentence cannot be empty".to_string()));
    }

    let result = analysis_service::analyze(&payload.sentence);

    tracing::debug!(
        target: "ta.analysis",
        user_hash = %hash_for_correlation(&user.username),
        word_count = result.word_count,
        vowel_count = result.vowel_count,
        consonant_count = result.consonant_count,
        "Text analysis completed"
    );

    tracing::Span::current().record("status", "success");
    record_analysis("success", start.elapsed());

    Ok(Json(result))
}
