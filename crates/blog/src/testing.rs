//! In-crate fakes for unit tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use quillpress_auth::{Principal, Role};
use quillpress_core::{CommentId, PostId, UserId};
use quillpress_identity::{CredentialStore, StoreError, UserRecord};

use crate::comment::Comment;
use crate::post::Post;
use crate::store::{CommentStore, PostStore};

pub fn user(username: &str) -> Principal {
    Principal {
        id: UserId::new(),
        username: username.to_string(),
        role: Role::User,
        banned: false,
    }
}

pub fn admin(username: &str) -> Principal {
    Principal {
        id: UserId::new(),
        username: username.to_string(),
        role: Role::Admin,
        banned: false,
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPosts {
    inner: RwLock<HashMap<PostId, Post>>,
}

#[async_trait]
impl PostStore for InMemoryPosts {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(self.inner.read().unwrap().get(&id).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<_> = self
            .inner
            .read()
            .unwrap()
            .values()
            .filter(|p| p.published)
            .cloned()
            .collect();
        posts.sort_by(|a, b| (b.created_at, b.id.as_uuid()).cmp(&(a.created_at, a.id.as_uuid())));
        Ok(posts)
    }

    async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<_> = self
            .inner
            .read()
            .unwrap()
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        posts.sort_by(|a, b| (b.created_at, b.id.as_uuid()).cmp(&(a.created_at, a.id.as_uuid())));
        Ok(posts)
    }

    async fn save(&self, post: Post) -> Result<Post, StoreError> {
        self.inner.write().unwrap().insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        self.inner.write().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryComments {
    inner: RwLock<HashMap<CommentId, Comment>>,
}

#[async_trait]
impl CommentStore for InMemoryComments {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(self.inner.read().unwrap().get(&id).cloned())
    }

    async fn list_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError> {
        let mut comments: Vec<_> = self
            .inner
            .read()
            .unwrap()
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments
            .sort_by(|a, b| (b.created_at, b.id.as_uuid()).cmp(&(a.created_at, a.id.as_uuid())));
        Ok(comments)
    }

    async fn save(&self, comment: Comment) -> Result<Comment, StoreError> {
        self.inner
            .write()
            .unwrap()
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: CommentId) -> Result<(), StoreError> {
        self.inner.write().unwrap().remove(&id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUsers {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

#[async_trait]
impl CredentialStore for InMemoryUsers {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let map = self.inner.read().unwrap();
        Ok(map.values().find(|r| r.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.inner.read().unwrap().get(&id).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let map = self.inner.read().unwrap();
        Ok(map.values().any(|r| r.email == email))
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, StoreError> {
        self.inner
            .write()
            .unwrap()
            .insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        self.inner.write().unwrap().remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.inner.read().unwrap().values().cloned().collect())
    }
}
