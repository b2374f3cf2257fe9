//! Postgres-backed stores.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE users (
//!     id            UUID PRIMARY KEY,
//!     username      TEXT NOT NULL UNIQUE,
//!     email         TEXT NOT NULL UNIQUE,
//!     password_hash TEXT NOT NULL,
//!     role          TEXT NOT NULL,
//!     banned        BOOLEAN NOT NULL,
//!     created_at    TIMESTAMPTZ NOT NULL
//! );
//!
//! CREATE TABLE posts (
//!     id              UUID PRIMARY KEY,
//!     title           TEXT NOT NULL,
//!     content         TEXT NOT NULL,
//!     author_id       UUID NOT NULL,
//!     author_username TEXT NOT NULL,
//!     published       BOOLEAN NOT NULL,
//!     created_at      TIMESTAMPTZ NOT NULL,
//!     updated_at      TIMESTAMPTZ NOT NULL
//! );
//!
//! CREATE TABLE comments (
//!     id              UUID PRIMARY KEY,
//!     post_id         UUID NOT NULL,
//!     author_id       UUID NOT NULL,
//!     author_username TEXT NOT NULL,
//!     content         TEXT NOT NULL,
//!     created_at      TIMESTAMPTZ NOT NULL,
//!     updated_at      TIMESTAMPTZ NOT NULL
//! );
//! ```
//!
//! Role and ban updates go through single-row upserts, so the per-row
//! transactional guarantees of Postgres are the store's concurrency control.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use quillpress_auth::Role;
use quillpress_blog::{Comment, CommentStore, Post, PostStore};
use quillpress_core::{CommentId, PostId, UserId};
use quillpress_identity::{CredentialStore, StoreError, UserRecord};

fn backend(err: sqlx::Error) -> StoreError {
    StoreError::backend(err.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Credential store
// ─────────────────────────────────────────────────────────────────────────────

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    password_hash: String,
    role: String,
    banned: bool,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> Result<UserRecord, StoreError> {
        let role = self
            .role
            .parse::<Role>()
            .map_err(|_| StoreError::backend(format!("corrupt role value: {}", self.role)))?;
        Ok(UserRecord {
            id: UserId::from_uuid(self.id),
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role,
            banned: self.banned,
            created_at: self.created_at,
        })
    }
}

const USER_COLUMNS: &str = "id, username, email, password_hash, role, banned, created_at";

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(UserRow::into_record).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(UserRow::into_record).transpose()
    }

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map_err(backend)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(backend)
    }

    async fn save(&self, record: UserRecord) -> Result<UserRecord, StoreError> {
        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, role, banned, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
                username = EXCLUDED.username, \
                email = EXCLUDED.email, \
                password_hash = EXCLUDED.password_hash, \
                role = EXCLUDED.role, \
                banned = EXCLUDED.banned",
        )
        .bind(*record.id.as_uuid())
        .bind(&record.username)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(record.role.as_str())
        .bind(record.banned)
        .bind(record.created_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(record)
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(UserRow::into_record).collect()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Post store
// ─────────────────────────────────────────────────────────────────────────────

pub struct PostgresPostStore {
    pool: PgPool,
}

impl PostgresPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    author_username: String,
    published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::from_uuid(row.id),
            title: row.title,
            content: row.content,
            author_id: UserId::from_uuid(row.author_id),
            author_username: row.author_username,
            published: row.published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const POST_COLUMNS: &str =
    "id, title, content, author_id, author_username, published, created_at, updated_at";

#[async_trait]
impl PostStore for PostgresPostStore {
    async fn find_by_id(&self, id: PostId) -> Result<Option<Post>, StoreError> {
        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(Post::from))
    }

    async fn list_published(&self) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE published \
             ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn list_by_author(&self, author_id: UserId) -> Result<Vec<Post>, StoreError> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE author_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(*author_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn save(&self, post: Post) -> Result<Post, StoreError> {
        sqlx::query(
            "INSERT INTO posts \
                (id, title, content, author_id, author_username, published, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             ON CONFLICT (id) DO UPDATE SET \
                title = EXCLUDED.title, \
                content = EXCLUDED.content, \
                published = EXCLUDED.published, \
                updated_at = EXCLUDED.updated_at",
        )
        .bind(*post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.content)
        .bind(*post.author_id.as_uuid())
        .bind(&post.author_username)
        .bind(post.published)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(post)
    }

    async fn delete(&self, id: PostId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Comment store
// ─────────────────────────────────────────────────────────────────────────────

pub struct PostgresCommentStore {
    pool: PgPool,
}

impl PostgresCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    author_username: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: CommentId::from_uuid(row.id),
            post_id: PostId::from_uuid(row.post_id),
            author_id: UserId::from_uuid(row.author_id),
            author_username: row.author_username,
            content: row.content,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const COMMENT_COLUMNS: &str =
    "id, post_id, author_id, author_username, content, created_at, updated_at";

#[async_trait]
impl CommentStore for PostgresCommentStore {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>, StoreError> {
        let row = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(Comment::from))
    }

    async fn list_by_post(&self, post_id: PostId) -> Result<Vec<Comment>, StoreError> {
        let rows = sqlx::query_as::<_, CommentRow>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 \
             ORDER BY created_at DESC, id DESC"
        ))
        .bind(*post_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn save(&self, comment: Comment) -> Result<Comment, StoreError> {
        sqlx::query(
            "INSERT INTO comments \
                (id, post_id, author_id, author_username, content, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (id) DO UPDATE SET \
                content = EXCLUDED.content, \
                updated_at = EXCLUDED.updated_at",
        )
        .bind(*comment.id.as_uuid())
        .bind(*comment.post_id.as_uuid())
        .bind(*comment.author_id.as_uuid())
        .bind(&comment.author_username)
        .bind(&comment.content)
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(comment)
    }

    async fn delete(&self, id: CommentId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(*id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(backend)?;
        Ok(())
    }
}
