//! Pure authorization policy.
//!
//! - No IO
//! - No panics
//! - No business logic (callers fetch resources and extract ownership facts)

use thiserror::Error;

use quillpress_core::UserId;

use crate::{Principal, Role};

/// What a principal is trying to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    Publish,
    AdminOverride,
}

/// The kind of resource an action targets.
///
/// `AnyPost` is the moderation view of posts: deleting *someone else's* post
/// through the admin surface, as opposed to a `Post` the caller has an
/// ownership fact for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ResourceKind {
    Post,
    Comment,
    User,
    AnyPost,
}

/// Ownership fact for a resource, extracted by the caller before the policy
/// is consulted. The policy never fetches resources itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Ownership {
    pub owner_id: UserId,
}

impl Ownership {
    pub fn of(owner_id: UserId) -> Self {
        Self { owner_id }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// Every denial collapses into this one variant. The caller is never
    /// told whether ownership or role was the problem.
    #[error("forbidden")]
    Forbidden,
}

/// Decide whether `principal` may perform `action` on a resource of `kind`.
///
/// `ownership` carries the owner of the concrete target resource where one
/// exists; actions without a concrete target (create, moderation listings)
/// pass `None`.
pub fn can(
    principal: &Principal,
    action: Action,
    kind: ResourceKind,
    ownership: Option<&Ownership>,
) -> bool {
    // A banned principal is rejected at resolution time; nothing is ever
    // authorized for one that slips through.
    if principal.banned {
        return false;
    }

    match (action, kind) {
        // Published posts and comment lists are public.
        (Action::Read, _) => true,

        (Action::AdminOverride, _) => principal.role == Role::Admin,

        // Any resolved principal may author content.
        (Action::Create, ResourceKind::Post | ResourceKind::Comment) => true,

        // Publish is owner-only. Admins moderate, they do not publish on a
        // user's behalf.
        (Action::Publish, ResourceKind::Post) => {
            ownership.is_some_and(|o| o.owner_id == principal.id)
        }

        (Action::Update | Action::Delete, ResourceKind::Post | ResourceKind::Comment) => {
            ownership.is_some_and(|o| o.owner_id == principal.id) || principal.role == Role::Admin
        }

        // Account moderation and moderation-wide post deletion.
        (_, ResourceKind::User | ResourceKind::AnyPost) => principal.role == Role::Admin,

        _ => false,
    }
}

/// [`can`], with every denial reported as [`AuthorizationError::Forbidden`].
pub fn authorize(
    principal: &Principal,
    action: Action,
    kind: ResourceKind,
    ownership: Option<&Ownership>,
) -> Result<(), AuthorizationError> {
    if can(principal, action, kind, ownership) {
        Ok(())
    } else {
        Err(AuthorizationError::Forbidden)
    }
}
