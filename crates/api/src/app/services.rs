//! Service wiring: stores, hasher, codec, and the services on top of them.

use std::sync::Arc;

use chrono::Utc;

use quillpress_auth::{Hs256TokenCodec, Role, TokenCodec};
use quillpress_blog::{AdminService, CommentService, CommentStore, PostService, PostStore};
use quillpress_identity::{
    Authenticator, CredentialStore, PasswordHasher, PrincipalResolver, UserRecord,
};
use quillpress_infra::{
    Argon2PasswordHasher, InMemoryCommentStore, InMemoryCredentialStore, InMemoryPostStore,
};
use quillpress_core::UserId;

use crate::app::AppConfig;
use crate::middleware::AuthState;

/// Service graph shared by all handlers.
pub struct AppServices {
    pub authenticator: Authenticator,
    pub posts: PostService,
    pub comments: CommentService,
    pub admin: AdminService,
}

/// Build the service graph on in-memory stores.
///
/// The Postgres stores in `quillpress-infra` implement the same traits and
/// can be swapped in here without touching anything above this function.
pub async fn build_services(config: &AppConfig) -> anyhow::Result<(Arc<AppServices>, AuthState)> {
    let users: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
    let posts: Arc<dyn PostStore> = Arc::new(InMemoryPostStore::new());
    let comments: Arc<dyn CommentStore> = Arc::new(InMemoryCommentStore::new());

    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher);
    let codec: Arc<dyn TokenCodec> = Arc::new(Hs256TokenCodec::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl,
    ));

    if let Some(password) = &config.admin_password {
        seed_admin(&users, &hasher, password).await?;
    }

    let services = AppServices {
        authenticator: Authenticator::new(users.clone(), hasher.clone(), codec.clone()),
        posts: PostService::new(posts.clone()),
        comments: CommentService::new(comments, posts.clone()),
        admin: AdminService::new(users.clone(), posts),
    };

    let auth_state = AuthState {
        resolver: Arc::new(PrincipalResolver::new(codec, users)),
    };

    Ok((Arc::new(services), auth_state))
}

async fn seed_admin(
    users: &Arc<dyn CredentialStore>,
    hasher: &Arc<dyn PasswordHasher>,
    password: &str,
) -> anyhow::Result<()> {
    if users.exists_by_username("admin").await? {
        return Ok(());
    }

    let record = UserRecord {
        id: UserId::new(),
        username: "admin".to_string(),
        email: "admin@localhost".to_string(),
        password_hash: hasher.hash(password)?,
        role: Role::Admin,
        banned: false,
        created_at: Utc::now(),
    };
    users.save(record).await?;
    tracing::info!("bootstrap admin account seeded");
    Ok(())
}
