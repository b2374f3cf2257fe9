use axum::Router;

pub mod admin;
pub mod auth;
pub mod comments;
pub mod posts;
pub mod system;

/// Routes reachable without a token: auth endpoints and public reads.
pub fn public_router() -> Router {
    auth::router()
        .merge(posts::public_router())
        .merge(comments::public_router())
}

/// Routes behind the bearer-token middleware.
pub fn protected_router() -> Router {
    posts::protected_router()
        .merge(comments::protected_router())
        .merge(admin::router())
}
