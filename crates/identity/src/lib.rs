//! `quillpress-identity` — credential checking and per-request principal
//! resolution.
//!
//! This crate knows how to turn submitted credentials into tokens
//! ([`Authenticator`]) and tokens back into live principals
//! ([`PrincipalResolver`]). Storage and hashing stay behind traits; the
//! concrete backends live in `quillpress-infra`.

pub mod authenticator;
pub mod error;
pub mod hasher;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod testing;

pub use authenticator::{Authenticator, Identity, Registration};
pub use error::AuthError;
pub use hasher::{HashError, PasswordHasher};
pub use resolver::PrincipalResolver;
pub use store::{CredentialStore, StoreError, UserRecord};
