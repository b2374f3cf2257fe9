//! Comment entity and service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quillpress_auth::{Action, Ownership, Principal, ResourceKind, authorize};
use quillpress_core::{CommentId, DomainError, PostId, UserId};

use crate::error::BlogError;
use crate::store::{CommentStore, PostStore};

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author_username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn ownership(&self) -> Ownership {
        Ownership::of(self.author_id)
    }
}

fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.trim().is_empty() {
        return Err(DomainError::validation("content is required"));
    }
    Ok(())
}

/// Comment operations. Listing is public; add/update/delete consult the
/// policy, with update and delete gated on the comment's ownership fact.
pub struct CommentService {
    comments: Arc<dyn CommentStore>,
    posts: Arc<dyn PostStore>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { comments, posts }
    }

    pub async fn add(
        &self,
        principal: &Principal,
        post_id: PostId,
        content: String,
    ) -> Result<Comment, BlogError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("post").into());
        }
        authorize(principal, Action::Create, ResourceKind::Comment, None)?;
        validate_content(&content)?;

        let now = Utc::now();
        let comment = Comment {
            id: CommentId::new(),
            post_id,
            author_id: principal.id,
            author_username: principal.username.clone(),
            content,
            created_at: now,
            updated_at: now,
        };

        Ok(self.comments.save(comment).await?)
    }

    pub async fn list_for_post(&self, post_id: PostId) -> Result<Vec<Comment>, BlogError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("post").into());
        }
        Ok(self.comments.list_by_post(post_id).await?)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: CommentId,
        content: String,
    ) -> Result<Comment, BlogError> {
        let mut comment = self.require(id).await?;
        authorize(
            principal,
            Action::Update,
            ResourceKind::Comment,
            Some(&comment.ownership()),
        )?;
        validate_content(&content)?;

        comment.content = content;
        comment.updated_at = Utc::now();
        Ok(self.comments.save(comment).await?)
    }

    pub async fn delete(&self, principal: &Principal, id: CommentId) -> Result<(), BlogError> {
        let comment = self.require(id).await?;
        authorize(
            principal,
            Action::Delete,
            ResourceKind::Comment,
            Some(&comment.ownership()),
        )?;

        self.comments.delete(id).await?;
        tracing::debug!(comment = %id, actor = %principal.username, "comment deleted");
        Ok(())
    }

    async fn require(&self, id: CommentId) -> Result<Comment, BlogError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("comment").into())
    }
}
