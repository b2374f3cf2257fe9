//! Abstract content stores. Implementations live in `quillpress-infra`.

use async_trait::async_trait;

use quillpress_core::{CommentId, PostId, UserId};
use quillpress_identity::StoreError;

use crate::comment::Comment;
use crate::post::Post;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError>;

    /// Published posts, newest first.
    async fn list_published(&self) -> Result<Vec<Post>, StoreError>;

    /// All posts by one author (published or not), newest first.
    async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Post>, StoreError>;

    async fn save(&self, post: Post) -> Result<Post, StoreError>;

    async fn delete(&self, id: PostId) -> Result<(), StoreError>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, StoreError>;

    /// Comments on one post, newest first.
    async fn list_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError>;

    async fn save(&self, comment: Comment) -> Result<Comment, StoreError>;

    async fn delete(&self, id: CommentId) -> Result<(), StoreError>;
}
