//! `quillpress-infra` — concrete backends for the store and hasher traits.
//!
//! In-memory stores serve tests and development; the Postgres stores are the
//! persistent backend. Both sit behind the traits defined in
//! `quillpress-identity` and `quillpress-blog`, so nothing above this crate
//! knows which one it is talking to.

pub mod argon;
pub mod memory;
pub mod postgres;

pub use argon::Argon2PasswordHasher;
pub use memory::{InMemoryCommentStore, InMemoryCredentialStore, InMemoryPostStore};
pub use postgres::{PostgresCommentStore, PostgresCredentialStore, PostgresPostStore};
