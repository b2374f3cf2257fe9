//! Credential validation and token issuance.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use quillpress_auth::{Role, TokenCodec};
use quillpress_core::UserId;

use crate::error::AuthError;
use crate::hasher::PasswordHasher;
use crate::store::{CredentialStore, UserRecord};

/// A registration request as the core sees it. Field-shape validation
/// (lengths, blanks) happens at the transport edge.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Public summary of an account — what register/login hand back. Carries no
/// credential material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&UserRecord> for Identity {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
            email: record.email.clone(),
            role: record.role,
        }
    }
}

/// Validates submitted credentials against the store and issues tokens.
pub struct Authenticator {
    store: Arc<dyn CredentialStore>,
    hasher: Arc<dyn PasswordHasher>,
    codec: Arc<dyn TokenCodec>,
}

impl Authenticator {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        hasher: Arc<dyn PasswordHasher>,
        codec: Arc<dyn TokenCodec>,
    ) -> Self {
        Self {
            store,
            hasher,
            codec,
        }
    }

    /// Create a new account with role USER, not banned.
    ///
    /// Registration does not imply login: no token is issued.
    pub async fn register(&self, registration: Registration) -> Result<Identity, AuthError> {
        if self
            .store
            .exists_by_username(&registration.username)
            .await?
        {
            return Err(AuthError::DuplicateUsername);
        }
        if self.store.exists_by_email(&registration.email).await? {
            return Err(AuthError::DuplicateEmail);
        }

        let password_hash = self.hasher.hash(&registration.password)?;
        let record = UserRecord {
            id: UserId::new(),
            username: registration.username,
            email: registration.email,
            password_hash,
            role: Role::User,
            banned: false,
            created_at: Utc::now(),
        };

        let saved = self.store.save(record).await?;
        tracing::info!(username = %saved.username, "account registered");
        Ok(Identity::from(&saved))
    }

    /// Check credentials and issue a token with subject = username.
    ///
    /// Unknown username and wrong password return the same error kind.
    ///
    /// The ban flag is deliberately not consulted here: a banned user can
    /// still obtain a token and is rejected on every request at resolution
    /// time instead. The check is two-stage by design; do not unify it.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<(String, Identity), AuthError> {
        let Some(record) = self.store.find_by_username(username).await? else {
            return Err(AuthError::InvalidCredentials);
        };

        if !self.hasher.verify(password, &record.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self
            .codec
            .issue(&record.username, now)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::debug!(username = %record.username, "login succeeded");
        Ok((token, Identity::from(&record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeHasher, FakeStore};
    use chrono::Duration;
    use quillpress_auth::Hs256TokenCodec;

    fn authenticator(store: Arc<FakeStore>) -> Authenticator {
        Authenticator::new(
            store,
            Arc::new(FakeHasher),
            Arc::new(Hs256TokenCodec::new(b"secret", Duration::hours(1))),
        )
    }

    fn registration(username: &str, email: &str) -> Registration {
        Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
        }
    }

    #[tokio::test]
    async fn register_stores_unbanned_user_role() {
        let store = Arc::new(FakeStore::default());
        let auth = authenticator(store.clone());

        let identity = auth.register(registration("alice", "a@example.com")).await.unwrap();
        assert_eq!(identity.role, Role::User);

        let record = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(record.role, Role::User);
        assert!(!record.banned);
        // The password is stored hashed, not in the clear.
        assert_ne!(record.password_hash, "hunter2");
    }

    #[tokio::test]
    async fn register_rejects_duplicate_username() {
        let store = Arc::new(FakeStore::default());
        let auth = authenticator(store);

        auth.register(registration("alice", "a@example.com")).await.unwrap();
        let err = auth
            .register(registration("alice", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateUsername);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email() {
        let store = Arc::new(FakeStore::default());
        let auth = authenticator(store);

        auth.register(registration("alice", "a@example.com")).await.unwrap();
        let err = auth
            .register(registration("bob", "a@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err, AuthError::DuplicateEmail);
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_are_indistinguishable() {
        let store = Arc::new(FakeStore::default());
        let auth = authenticator(store);
        auth.register(registration("alice", "a@example.com")).await.unwrap();

        let now = Utc::now();
        let unknown = auth.login("nobody", "hunter2", now).await.unwrap_err();
        let wrong = auth.login("alice", "wrong", now).await.unwrap_err();
        assert_eq!(unknown, AuthError::InvalidCredentials);
        assert_eq!(wrong, AuthError::InvalidCredentials);
    }

    #[tokio::test]
    async fn login_returns_token_and_identity() {
        let store = Arc::new(FakeStore::default());
        let auth = authenticator(store);
        auth.register(registration("alice", "a@example.com")).await.unwrap();

        let (token, identity) = auth.login("alice", "hunter2", Utc::now()).await.unwrap();
        assert!(!token.is_empty());
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.role, Role::User);
    }

    #[tokio::test]
    async fn banned_user_can_still_log_in() {
        let store = Arc::new(FakeStore::default());
        let auth = authenticator(store.clone());
        auth.register(registration("alice", "a@example.com")).await.unwrap();

        let mut record = store.find_by_username("alice").await.unwrap().unwrap();
        record.banned = true;
        store.save(record).await.unwrap();

        // Enforcement is deferred to resolution time.
        assert!(auth.login("alice", "hunter2", Utc::now()).await.is_ok());
    }
}
