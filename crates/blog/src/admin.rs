//! Account and content moderation.

use std::sync::Arc;

use quillpress_auth::{Action, Principal, ResourceKind, Role, authorize};
use quillpress_core::{DomainError, PostId, UserId};
use quillpress_identity::{CredentialStore, UserRecord};

use crate::error::BlogError;
use crate::store::PostStore;

/// Admin-only operations. Every method authorizes `AdminOverride` before
/// touching any store, so a non-admin principal fails closed on the policy
/// alone.
pub struct AdminService {
    users: Arc<dyn CredentialStore>,
    posts: Arc<dyn PostStore>,
}

impl AdminService {
    pub fn new(users: Arc<dyn CredentialStore>, posts: Arc<dyn PostStore>) -> Self {
        Self { users, posts }
    }

    pub async fn list_users(&self, principal: &Principal) -> Result<Vec<UserRecord>, BlogError> {
        authorize(principal, Action::AdminOverride, ResourceKind::User, None)?;
        Ok(self.users.list().await?)
    }

    pub async fn delete_user(
        &self,
        principal: &Principal,
        user_id: UserId,
    ) -> Result<(), BlogError> {
        authorize(principal, Action::AdminOverride, ResourceKind::User, None)?;
        self.require_user(user_id).await?;

        self.users.delete(user_id).await?;
        tracing::info!(user = %user_id, actor = %principal.username, "user deleted");
        Ok(())
    }

    /// Ban takes effect on the target's next request; tokens already issued
    /// are not revoked (there is no revocation list).
    pub async fn ban_user(&self, principal: &Principal, user_id: UserId) -> Result<(), BlogError> {
        self.set_banned(principal, user_id, true).await
    }

    pub async fn unban_user(
        &self,
        principal: &Principal,
        user_id: UserId,
    ) -> Result<(), BlogError> {
        self.set_banned(principal, user_id, false).await
    }

    /// Moderation delete: removes any post regardless of ownership.
    pub async fn delete_any_post(
        &self,
        principal: &Principal,
        post_id: PostId,
    ) -> Result<(), BlogError> {
        authorize(principal, Action::AdminOverride, ResourceKind::AnyPost, None)?;
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::not_found("post").into());
        }

        self.posts.delete(post_id).await?;
        tracing::info!(post = %post_id, actor = %principal.username, "post removed by moderator");
        Ok(())
    }

    /// Change a user's role. Authorization comes first; only then is the
    /// requested role parsed, so an unknown role from a non-admin still
    /// reads as `Forbidden` rather than a validation failure.
    pub async fn change_role(
        &self,
        principal: &Principal,
        user_id: UserId,
        role: &str,
    ) -> Result<UserRecord, BlogError> {
        authorize(principal, Action::AdminOverride, ResourceKind::User, None)?;
        let role: Role = role.parse()?;

        let mut record = self.require_user(user_id).await?;
        record.role = role;
        let saved = self.users.save(record).await?;
        tracing::info!(user = %user_id, role = %role, actor = %principal.username, "role changed");
        Ok(saved)
    }

    async fn set_banned(
        &self,
        principal: &Principal,
        user_id: UserId,
        banned: bool,
    ) -> Result<(), BlogError> {
        authorize(principal, Action::AdminOverride, ResourceKind::User, None)?;

        let mut record = self.require_user(user_id).await?;
        record.banned = banned;
        self.users.save(record).await?;
        tracing::info!(user = %user_id, banned, actor = %principal.username, "ban flag updated");
        Ok(())
    }

    async fn require_user(&self, user_id: UserId) -> Result<UserRecord, BlogError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user").into())
    }
}
