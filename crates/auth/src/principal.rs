use quillpress_core::UserId;

use crate::Role;

/// A fully resolved principal for authorization decisions.
///
/// Built fresh from the credential store on every request and discarded when
/// the request completes. Role and ban state reflect the latest persisted
/// values, never anything embedded in the token, so role and ban changes take
/// effect without reissuing tokens.
///
/// Every core operation takes the principal as an explicit parameter; there
/// is no ambient "current user" context anywhere in the workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub banned: bool,
}

impl Principal {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
