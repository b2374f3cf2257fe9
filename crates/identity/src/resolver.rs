//! Per-request principal resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use quillpress_auth::{Principal, TokenCodec};

use crate::error::AuthError;
use crate::store::CredentialStore;

/// Turns a raw token string into a live [`Principal`].
///
/// Every request independently re-derives the principal from the token plus
/// current store contents; nothing is cached across requests. Because role
/// and ban state come from the store and not the token, an admin's ban or
/// role change takes effect on the target's next request without any token
/// reissue — this is the second stage of the two-stage ban check.
pub struct PrincipalResolver {
    codec: Arc<dyn TokenCodec>,
    store: Arc<dyn CredentialStore>,
}

impl PrincipalResolver {
    pub fn new(codec: Arc<dyn TokenCodec>, store: Arc<dyn CredentialStore>) -> Self {
        Self { codec, store }
    }

    /// Verify `raw_token` and resolve the acting principal.
    ///
    /// All token failures collapse into [`AuthError::Unauthenticated`]; so
    /// does a subject that no longer exists, which keeps a deleted account
    /// indistinguishable from a bad token. A banned account fails with the
    /// distinct, terminal [`AuthError::Banned`].
    pub async fn authenticate(
        &self,
        raw_token: &str,
        now: DateTime<Utc>,
    ) -> Result<Principal, AuthError> {
        let subject = self.codec.verify(raw_token, now).map_err(|e| {
            tracing::debug!(reason = %e, "token rejected");
            AuthError::Unauthenticated
        })?;

        let Some(record) = self.store.find_by_username(&subject).await? else {
            return Err(AuthError::Unauthenticated);
        };

        if record.banned {
            tracing::info!(username = %record.username, "banned account rejected");
            return Err(AuthError::Banned);
        }

        Ok(Principal {
            id: record.id,
            username: record.username,
            role: record.role,
            banned: record.banned,
        })
    }
}
