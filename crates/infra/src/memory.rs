//! In-memory stores for tests and development.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use quillpress_blog::{Comment, CommentStore, Post, PostStore};
use quillpress_core::{CommentId, PostId, UserId};
use quillpress_identity::{CredentialStore, StoreError, UserRecord};

fn read<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, StoreError> {
    lock.read().map_err(|_| StoreError::backend("lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, StoreError> {
    lock.write().map_err(|_| StoreError::backend("lock poisoned"))
}

fn newest_first<T, K: Ord>(items: &mut [T], key: impl Fn(&T) -> K) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let map = read(&self.inner)?;
        Ok(map.values().find(|r| r.username == username).cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(read(&self.inner)?.get(&id).cloned())
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let map = read(&self.inner)?;
        Ok(map.values().any(|r| r.email == email))
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, StoreError> {
        write(&self.inner)?.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        write(&self.inner)?.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let mut users: Vec<_> = read(&self.inner)?.values().cloned().collect();
        newest_first(&mut users, |r| (r.created_at, *r.id.as_uuid()));
        Ok(users)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryPostStore {
    inner: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        Ok(read(&self.inner)?.get(&id).cloned())
    }

    async fn list_published(&self) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<_> = read(&self.inner)?
            .values()
            .filter(|p| p.published)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, *p.id.as_uuid()));
        Ok(posts)
    }

    async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Post>, StoreError> {
        let mut posts: Vec<_> = read(&self.inner)?
            .values()
            .filter(|p| p.author_id == author_id)
            .cloned()
            .collect();
        newest_first(&mut posts, |p| (p.created_at, *p.id.as_uuid()));
        Ok(posts)
    }

    async fn save(&self, post: Post) -> Result<Post, StoreError> {
        write(&self.inner)?.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        write(&self.inner)?.remove(&id);
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct InMemoryCommentStore {
    inner: RwLock<HashMap<CommentId, Comment>>,
}

impl InMemoryCommentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        Ok(read(&self.inner)?.get(&id).cloned())
    }

    async fn list_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError> {
        let mut comments: Vec<_> = read(&self.inner)?
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        newest_first(&mut comments, |c| (c.created_at, *c.id.as_uuid()));
        Ok(comments)
    }

    async fn save(&self, comment: Comment) -> Result<Comment, StoreError> {
        write(&self.inner)?.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn delete(&self, id: CommentId) -> Result<(), StoreError> {
        write(&self.inner)?.remove(&id);
        Ok(())
    }
}
