//! Comment routes. Listing is public; everything else needs a principal.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use quillpress_auth::Principal;
use quillpress_core::{CommentId, PostId};

use crate::app::dto::{CommentRequest, CommentResponse};
use crate::app::{errors, services::AppServices};

pub fn public_router() -> Router {
    Router::new().route("/posts/:id/comments", get(list_for_post))
}

pub fn protected_router() -> Router {
    Router::new()
        .route("/posts/:id/comments", post(add_comment))
        .route("/comments/:id", put(update_comment).delete(delete_comment))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /posts/:id/comments - Comments on a post, newest first
pub async fn list_for_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let post_id: PostId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.comments.list_for_post(post_id).await {
        Ok(comments) => {
            let body: Vec<CommentResponse> =
                comments.into_iter().map(CommentResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// POST /posts/:id/comments - Comment on a post
pub async fn add_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> axum::response::Response {
    let post_id: PostId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.comments.add(&principal, post_id, body.content).await {
        Ok(comment) => {
            (StatusCode::CREATED, Json(CommentResponse::from(comment))).into_response()
        }
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// PUT /comments/:id - Edit a comment (owner or admin)
pub async fn update_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<CommentRequest>,
) -> axum::response::Response {
    let id: CommentId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.comments.update(&principal, id, body.content).await {
        Ok(comment) => (StatusCode::OK, Json(CommentResponse::from(comment))).into_response(),
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// DELETE /comments/:id - Remove a comment (owner or admin)
pub async fn delete_comment(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CommentId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.comments.delete(&principal, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::blog_error_to_response(e),
    }
}
