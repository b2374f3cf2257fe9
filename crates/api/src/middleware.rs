use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use quillpress_identity::PrincipalResolver;

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub resolver: Arc<PrincipalResolver>,
}

/// Resolve the acting principal for every protected request.
///
/// The resolved [`quillpress_auth::Principal`] is inserted as a request
/// extension; handlers take it as an explicit argument from there. A banned
/// account gets its distinct 403, everything else token-related is a plain
/// 401.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers())?.to_string();

    let principal = state
        .resolver
        .authenticate(&token, Utc::now())
        .await
        .map_err(errors::auth_error_to_response)?;

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, Response> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(unauthenticated)?;

    let header = header.to_str().map_err(|_| unauthenticated())?;

    let header = header.strip_prefix("Bearer ").ok_or_else(unauthenticated)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(unauthenticated());
    }

    Ok(token)
}

fn unauthenticated() -> Response {
    errors::json_error(
        StatusCode::UNAUTHORIZED,
        "unauthenticated",
        "missing or invalid bearer token",
    )
}
