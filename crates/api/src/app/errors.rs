use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use quillpress_auth::{AuthorizationError, ValidationError};
use quillpress_blog::BlogError;
use quillpress_core::DomainError;
use quillpress_identity::AuthError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::DuplicateUsername => {
            json_error(StatusCode::CONFLICT, "duplicate_username", err.to_string())
        }
        AuthError::DuplicateEmail => {
            json_error(StatusCode::CONFLICT, "duplicate_email", err.to_string())
        }
        AuthError::InvalidCredentials => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            err.to_string(),
        ),
        AuthError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", err.to_string())
        }
        AuthError::Banned => json_error(StatusCode::FORBIDDEN, "banned", err.to_string()),
        AuthError::Internal(msg) => {
            tracing::error!(error = %msg, "auth internal failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}

pub fn blog_error_to_response(err: BlogError) -> axum::response::Response {
    match err {
        BlogError::Domain(DomainError::NotFound(resource)) => json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("{resource} not found"),
        ),
        BlogError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        BlogError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
        BlogError::Forbidden(AuthorizationError::Forbidden) => {
            json_error(StatusCode::FORBIDDEN, "forbidden", "forbidden")
        }
        BlogError::Validation(ValidationError::InvalidRole(role)) => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_role",
            format!("invalid role: {role}"),
        ),
        BlogError::Store(e) => {
            tracing::error!(error = %e, "store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}

/// Parse a path segment into a typed id, mapping failures to a 400.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: core::str::FromStr<Err = DomainError>,
{
    raw.parse()
        .map_err(|e: DomainError| json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}
