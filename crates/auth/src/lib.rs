//! `quillpress-auth` — pure authentication/authorization core.
//!
//! This crate is intentionally decoupled from HTTP and storage: the token
//! codec signs and verifies identity tokens, the policy decides what a
//! resolved principal may do. Looking principals up is the caller's job.

pub mod policy;
pub mod principal;
pub mod role;
pub mod token;

pub use policy::{Action, AuthorizationError, Ownership, ResourceKind, authorize, can};
pub use principal::Principal;
pub use role::{Role, ValidationError};
pub use token::{Hs256TokenCodec, TokenCodec, TokenError};
