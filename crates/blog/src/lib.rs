//! `quillpress-blog` — posts, comments, and moderation.
//!
//! Services here own the business rules and extract ownership facts; every
//! mutating operation takes the resolved [`quillpress_auth::Principal`]
//! explicitly and consults the pure policy before touching a store.

pub mod admin;
pub mod comment;
pub mod error;
pub mod post;
pub mod store;

#[cfg(test)]
mod testing;

pub use admin::AdminService;
pub use comment::{Comment, CommentService};
pub use error::BlogError;
pub use post::{NewPost, Post, PostService, PostUpdate};
pub use store::{CommentStore, PostStore};
