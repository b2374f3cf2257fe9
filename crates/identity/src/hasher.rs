use thiserror::Error;

/// Opaque one-way password hashing function.
///
/// The authentication core stores whatever [`PasswordHasher::hash`] returns
/// and asks [`PasswordHasher::verify`] at login time. It never inspects the
/// hash format and never logs either side.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, HashError>;

    fn verify(&self, password: &str, password_hash: &str) -> bool;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("password hashing failed")]
pub struct HashError;
