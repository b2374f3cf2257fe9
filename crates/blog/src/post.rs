//! Post entity and service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use quillpress_auth::{Action, Ownership, Principal, ResourceKind, authorize};
use quillpress_core::{DomainError, PostId, UserId};

use crate::error::BlogError;
use crate::store::PostStore;

pub const MAX_TITLE_LEN: usize = 255;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author_username: String,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn ownership(&self) -> Ownership {
        Ownership::of(self.author_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    /// Defaults to a draft when absent.
    pub published: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
    /// Left unchanged when absent.
    pub published: Option<bool>,
}

fn validate_title_and_content(title: &str, content: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("title is required"));
    }
    if title.len() > MAX_TITLE_LEN {
        return Err(DomainError::validation("title cannot exceed 255 characters"));
    }
    if content.trim().is_empty() {
        return Err(DomainError::validation("content is required"));
    }
    Ok(())
}

/// Post operations. Reads are public; every mutation consults the policy
/// with the ownership fact of the target post.
pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    pub async fn list_published(&self) -> Result<Vec<Post>, BlogError> {
        Ok(self.posts.list_published().await?)
    }

    pub async fn get(&self, id: PostId) -> Result<Post, BlogError> {
        self.require(id).await
    }

    pub async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Post>, BlogError> {
        Ok(self.posts.list_by_author(author_id).await?)
    }

    pub async fn create(
        &self,
        principal: &Principal,
        new_post: NewPost,
    ) -> Result<Post, BlogError> {
        authorize(principal, Action::Create, ResourceKind::Post, None)?;
        validate_title_and_content(&new_post.title, &new_post.content)?;

        let now = Utc::now();
        let post = Post {
            id: PostId::new(),
            title: new_post.title.trim().to_string(),
            content: new_post.content,
            author_id: principal.id,
            author_username: principal.username.clone(),
            published: new_post.published.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };

        tracing::debug!(post = %post.id, author = %principal.username, "post created");
        Ok(self.posts.save(post).await?)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: PostId,
        update: PostUpdate,
    ) -> Result<Post, BlogError> {
        let mut post = self.require(id).await?;
        authorize(
            principal,
            Action::Update,
            ResourceKind::Post,
            Some(&post.ownership()),
        )?;
        validate_title_and_content(&update.title, &update.content)?;

        post.title = update.title.trim().to_string();
        post.content = update.content;
        if let Some(published) = update.published {
            post.published = published;
        }
        post.updated_at = Utc::now();

        Ok(self.posts.save(post).await?)
    }

    pub async fn delete(&self, principal: &Principal, id: PostId) -> Result<(), BlogError> {
        let post = self.require(id).await?;
        authorize(
            principal,
            Action::Delete,
            ResourceKind::Post,
            Some(&post.ownership()),
        )?;

        self.posts.delete(id).await?;
        tracing::debug!(post = %id, actor = %principal.username, "post deleted");
        Ok(())
    }

    /// Publishing is owner-only; an admin cannot publish on a user's behalf.
    pub async fn publish(&self, principal: &Principal, id: PostId) -> Result<Post, BlogError> {
        let mut post = self.require(id).await?;
        authorize(
            principal,
            Action::Publish,
            ResourceKind::Post,
            Some(&post.ownership()),
        )?;

        post.published = true;
        post.updated_at = Utc::now();
        Ok(self.posts.save(post).await?)
    }

    async fn require(&self, id: PostId) -> Result<Post, BlogError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("post").into())
    }
}
