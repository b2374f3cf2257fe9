//! In-crate fakes for unit tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use quillpress_core::UserId;

use crate::hasher::{HashError, PasswordHasher};
use crate::store::{CredentialStore, StoreError, UserRecord};

/// HashMap-backed credential store.
#[derive(Debug, Default)]
pub struct FakeStore {
    inner: RwLock<HashMap<UserId, UserRecord>>,
}

#[async_trait]
impl CredentialStore for FakeStore {
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

/// Reversible "hash" so tests can assert the plaintext is not stored.
pub struct FakeHasher;

impl PasswordHasher for FakeHasher {
    fn hash(&self, password: &str) -> Result<String, HashError> {
        Ok(format!("fake${password}"))
    }

    fn verify(&self, password: &str, password_hash: &str) -> bool {
        password_hash == format!("fake${password}")
    }
}
