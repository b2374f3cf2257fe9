use thiserror::Error;

use quillpress_auth::{AuthorizationError, ValidationError};
use quillpress_core::DomainError;
use quillpress_identity::StoreError;

/// Blog service error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlogError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Forbidden(#[from] AuthorizationError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Store(#[from] StoreError),
}
