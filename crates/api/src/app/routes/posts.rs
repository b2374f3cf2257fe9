//! Post routes. Reads are public; mutations sit behind the auth middleware.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use quillpress_auth::Principal;
use quillpress_blog::{NewPost, PostUpdate};
use quillpress_core::{PostId, UserId};

use crate::app::dto::{PostRequest, PostResponse};
use crate::app::{errors, services::AppServices};

pub fn public_router() -> Router {
    Router::new()
        .route("/posts", get(list_published))
        .route("/posts/:id", get(get_post))
        .route("/posts/author/:author_id", get(list_by_author))
}

pub fn protected_router() -> Router {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/:id", put(update_post).delete(delete_post))
        .route("/posts/:id/publish", post(publish_post))
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// GET /posts - All published posts, newest first
pub async fn list_published(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.posts.list_published().await {
        Ok(posts) => {
            let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// GET /posts/:id - One post by id
pub async fn get_post(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PostId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.posts.get(id).await {
        Ok(post) => (StatusCode::OK, Json(PostResponse::from(post))).into_response(),
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// GET /posts/author/:author_id - All posts by one author, newest first
pub async fn list_by_author(
    Extension(services): Extension<Arc<AppServices>>,
    Path(author_id): Path<String>,
) -> axum::response::Response {
    let author_id: UserId = match errors::parse_id(&author_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.posts.list_by_author(author_id).await {
        Ok(posts) => {
            let body: Vec<PostResponse> = posts.into_iter().map(PostResponse::from).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// POST /posts - Author a new post (draft unless `published` is set)
pub async fn create_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<PostRequest>,
) -> axum::response::Response {
    let new_post = NewPost {
        title: body.title,
        content: body.content,
        published: body.published,
    };

    match services.posts.create(&principal, new_post).await {
        Ok(post) => (StatusCode::CREATED, Json(PostResponse::from(post))).into_response(),
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// PUT /posts/:id - Update a post (owner or admin)
pub async fn update_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(body): Json<PostRequest>,
) -> axum::response::Response {
    let id: PostId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let update = PostUpdate {
        title: body.title,
        content: body.content,
        published: body.published,
    };

    match services.posts.update(&principal, id, update).await {
        Ok(post) => (StatusCode::OK, Json(PostResponse::from(post))).into_response(),
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// DELETE /posts/:id - Delete a post (owner or admin)
pub async fn delete_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PostId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.posts.delete(&principal, id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::blog_error_to_response(e),
    }
}

/// POST /posts/:id/publish - Publish a draft (owner only)
pub async fn publish_post(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: PostId = match errors::parse_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.posts.publish(&principal, id).await {
        Ok(post) => (StatusCode::OK, Json(PostResponse::from(post))).into_response(),
        Err(e) => errors::blog_error_to_response(e),
    }
}
