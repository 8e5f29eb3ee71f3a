use crate::errors::TaError;
use crate::handlers::auth_handler::AppState;
use crate::observability::metrics::record_token_validation;
use crate::observability::ErrorCategory;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::IntoResponse,
};
use std::sync::Arc;

/// Authentication middleware that validates bearer tokens.
///
/// Extracts the token from the Authorization header, validates it, and
/// injects the recovered identity into request extensions so protected
/// handlers receive it as an explicit `Extension` parameter. Requests with
/// a missing, malformed, or invalid token are rejected here before they
/// reach protected logic.
///
/// Accepts both `Bearer <token>` and a bare token value in the header.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<impl IntoResponse, TaError> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok());

    let auth_header = match auth_header {
        Some(value) => value,
        None => {
            let err = TaError::InvalidToken("Missing Authorization header".to_string());
            record_token_validation("error", Some(ErrorCategory::from(&err).as_str()));
            return Err(err);
        }
    };

    // Accept both "Bearer <token>" and a bare token
    let token = auth_header.strip_prefix("Bearer ").unwrap_or(auth_header);

    let user = match state.auth.validate(token) {
        Ok(user) => user,
        Err(e) => {
            record_token_validation("error", Some(ErrorCategory::from(&e).as_str()));
            return Err(e);
        }
    };

    record_token_validation("success", None);

    // Hand the identity to downstream handlers explicitly
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
