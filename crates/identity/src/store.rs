//! Abstract credential store.
//!
//! The core only ever calls the store; it never owns persistence. The store
//! is responsible for its own concurrency control (per-row transactional
//! updates for role/ban changes).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use quillpress_auth::Role;
use quillpress_core::UserId;

/// A persisted user account, as the credential store sees it. Deliberately
/// not serializable: the password hash stays between the store and the
/// authenticator, and API-facing views are built from the other fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub username: String,
    pub email: String,

    /// One-way hash produced by a [`crate::PasswordHasher`]. Never reversed,
    /// never logged.
    pub password_hash: String,

    pub role: Role,
    pub banned: bool,
    pub created_at: DateTime<Utc>,
}

/// Failure inside a storage backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Store holding user records, keyed by id with unique username and email.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;

    async fn exists_by_username(&self, username: &str) -> Result<bool, StoreError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Insert or update a record, returning the persisted value.
    async fn save(&self, record: UserRecord) -> Result<UserRecord, StoreError>;

    async fn delete(&self, id: UserId) -> Result<(), StoreError>;

    /// All accounts, for the admin directory.
    async fn list(&self) -> Result<Vec<UserRecord>, StoreError>;
}
