//! Registration and login.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use chrono::Utc;

use quillpress_identity::Registration;

use crate::app::dto::{AuthResponse, LoginRequest, RegisterRequest};
use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// POST /auth/register - Create an account (does not log in)
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<RegisterRequest>,
) -> axum::response::Response {
    // Field-shape validation stays at this edge; the core assumes it.
    if body.username.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty()
    {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "username, email and password are required",
        );
    }

    let registration = Registration {
        username: body.username.trim().to_string(),
        email: body.email.trim().to_string(),
        password: body.password,
    };

    match services.authenticator.register(registration).await {
        Ok(identity) => {
            (StatusCode::CREATED, Json(AuthResponse::registered(identity))).into_response()
        }
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// POST /auth/login - Check credentials and issue a token
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    match services
        .authenticator
        .login(&body.username, &body.password, Utc::now())
        .await
    {
        Ok((token, identity)) => {
            (StatusCode::OK, Json(AuthResponse::logged_in(token, identity))).into_response()
        }
        Err(e) => errors::auth_error_to_response(e),
    }
}
