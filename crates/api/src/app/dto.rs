use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quillpress_blog::{Comment, Post};
use quillpress_core::{CommentId, PostId, UserId};
use quillpress_identity::{Identity, UserRecord};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct PostRequest {
    pub title: String,
    pub content: String,
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangeRoleRequest {
    pub role: String,
}

// -------------------------
// Response DTOs
// -------------------------

/// Register/login response. `token` is absent after registration —
/// registering does not log the user in.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: Option<String>,
    pub username: String,
    pub email: String,
    pub role: String,
}

impl AuthResponse {
    pub fn registered(identity: Identity) -> Self {
        Self {
            token: None,
            username: identity.username,
            email: identity.email,
            role: identity.role.to_string(),
        }
    }

    pub fn logged_in(token: String, identity: Identity) -> Self {
        Self {
            token: Some(token),
            username: identity.username,
            email: identity.email,
            role: identity.role.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthorResponse {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author: AuthorResponse,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            author: AuthorResponse {
                id: post.author_id,
                username: post.author_username,
            },
            published: post.published,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub content: String,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            author: AuthorResponse {
                id: comment.author_id,
                username: comment.author_username,
            },
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Admin directory view of an account. The password hash never leaves the
/// store layer.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username,
            email: record.email,
            role: record.role.to_string(),
            banned: record.banned,
            created_at: record.created_at,
        }
    }
}
