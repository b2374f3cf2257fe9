use thiserror::Error;

use crate::hasher::HashError;
use crate::store::StoreError;

/// Authentication failures, as surfaced to callers.
///
/// Unknown username and wrong password deliberately share
/// [`AuthError::InvalidCredentials`] so the response never reveals which
/// field was wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("username already exists")]
    DuplicateUsername,

    #[error("email already exists")]
    DuplicateEmail,

    #[error("invalid username or password")]
    InvalidCredentials,

    /// The presented token did not resolve to a live account. All token
    /// failures (bad signature, expiry, unknown subject) collapse here.
    #[error("not authenticated")]
    Unauthenticated,

    /// The account exists and the token is valid, but the account is banned.
    /// Distinct from [`AuthError::Unauthenticated`] so clients can show an
    /// explicit rejection; never retried.
    #[error("account is banned")]
    Banned,

    /// A collaborator (store, hasher, codec) failed.
    #[error("internal failure: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<HashError> for AuthError {
    fn from(err: HashError) -> Self {
        Self::Internal(err.to_string())
    }
}
