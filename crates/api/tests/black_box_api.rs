use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

use quillpress_api::app::{AppConfig, build_app};

const JWT_SECRET: &str = "test-secret";
const ADMIN_PASSWORD: &str = "admin-pw";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod (fresh in-memory stores per test), bound to an
        // ephemeral port.
        let config = AppConfig {
            jwt_secret: JWT_SECRET.to_string(),
            token_ttl: chrono::Duration::hours(24),
            admin_password: Some(ADMIN_PASSWORD.to_string()),
        };
        let app = build_app(config).await.expect("failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn register(client: &reqwest::Client, base: &str, username: &str) -> reqwest::Response {
    client
        .post(format!("{base}/auth/register"))
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": format!("{username}-password"),
        }))
        .send()
        .await
        .unwrap()
}

async fn login(client: &reqwest::Client, base: &str, username: &str, password: &str) -> String {
    let res = client
        .post(format!("{base}/auth/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await.unwrap();
    body["token"].as_str().expect("login returns a token").to_string()
}

async fn signup_and_login(client: &reqwest::Client, base: &str, username: &str) -> String {
    let res = register(client, base, username).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    login(client, base, username, &format!("{username}-password")).await
}

async fn create_post(
    client: &reqwest::Client,
    base: &str,
    token: &str,
    title: &str,
    published: bool,
) -> Value {
    let res = client
        .post(format!("{base}/posts"))
        .bearer_auth(token)
        .json(&json!({ "title": title, "content": "some content", "published": published }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

async fn find_user_id(client: &reqwest::Client, base: &str, admin_token: &str, username: &str) -> String {
    let res = client
        .get(format!("{base}/admin/users"))
        .bearer_auth(admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let users: Vec<Value> = res.json().await.unwrap();
    users
        .iter()
        .find(|u| u["username"] == username)
        .unwrap_or_else(|| panic!("user {username} not in directory"))["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn mutations_require_a_token() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/posts", srv.base_url))
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Public reads stay open.
    let res = client
        .get(format!("{}/posts", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_duplicates() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    assert_eq!(
        register(&client, &srv.base_url, "alice").await.status(),
        StatusCode::CREATED
    );

    // Same username, different email.
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({
            "username": "alice",
            "email": "other@example.com",
            "password": "pw",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_username");

    // New username, existing email.
    let res = client
        .post(format!("{}/auth/register", srv.base_url))
        .json(&json!({
            "username": "bob",
            "email": "alice@example.com",
            "password": "pw",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate_email");
}

#[tokio::test]
async fn registration_does_not_log_in() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = register(&client, &srv.base_url, "alice").await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert!(body["token"].is_null());
    assert_eq!(body["role"], "USER");
}

#[tokio::test]
async fn bad_credentials_are_indistinguishable() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv.base_url, "alice").await;

    let mut bodies = Vec::new();
    for (username, password) in [("alice", "wrong"), ("nobody", "alice-password")] {
        let res = client
            .post(format!("{}/auth/login", srv.base_url))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        bodies.push(res.json::<Value>().await.unwrap());
    }
    // Same error body for wrong-password and unknown-username.
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["error"], "invalid_credentials");
}

#[tokio::test]
async fn owner_authors_publishes_and_deletes() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = signup_and_login(&client, &srv.base_url, "alice").await;

    let post = create_post(&client, &srv.base_url, &token, "Draft", false).await;
    let post_id = post["id"].as_str().unwrap();

    // Drafts are not listed publicly.
    let listed: Vec<Value> = client
        .get(format!("{}/posts", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(listed.is_empty());

    let res = client
        .post(format!("{}/posts/{post_id}/publish", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let listed: Vec<Value> = client
        .get(format!("{}/posts", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["author"]["username"], "alice");

    let res = client
        .delete(format!("{}/posts/{post_id}", srv.base_url))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn admin_moderates_but_cannot_publish_for_others() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let alice = signup_and_login(&client, &srv.base_url, "alice").await;
    let bob = signup_and_login(&client, &srv.base_url, "bob").await;
    let admin = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;

    let post = create_post(&client, &srv.base_url, &alice, "Alice's draft", false).await;
    let post_id = post["id"].as_str().unwrap();

    // Another user can neither update nor publish.
    let res = client
        .put(format!("{}/posts/{post_id}", srv.base_url))
        .bearer_auth(&bob)
        .json(&json!({ "title": "Hijacked", "content": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "forbidden");

    // The admin may update...
    let res = client
        .put(format!("{}/posts/{post_id}", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "title": "Moderated title", "content": "cleaned up" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // ...but publishing someone else's post is owner-only.
    let res = client
        .post(format!("{}/posts/{post_id}/publish", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Moderation delete through the admin surface.
    let res = client
        .delete(format!("{}/admin/posts/{post_id}", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn admin_surface_is_forbidden_for_users() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let alice = signup_and_login(&client, &srv.base_url, "alice").await;

    let res = client
        .get(format!("{}/admin/users", srv.base_url))
        .bearer_auth(&alice)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ban_takes_effect_at_use_time_not_login_time() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let alice = signup_and_login(&client, &srv.base_url, "alice").await;
    let admin = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;
    let alice_id = find_user_id(&client, &srv.base_url, &admin, "alice").await;

    let res = client
        .post(format!("{}/admin/users/{alice_id}/ban", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    // The previously issued, cryptographically valid token is now rejected
    // with the distinct banned signal.
    let res = client
        .post(format!("{}/posts", srv.base_url))
        .bearer_auth(&alice)
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "banned");

    // Login still succeeds for a banned account (enforcement is at use
    // time), but the fresh token is rejected all the same.
    let fresh = login(&client, &srv.base_url, "alice", "alice-password").await;
    let res = client
        .post(format!("{}/posts", srv.base_url))
        .bearer_auth(&fresh)
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Unban: the same token works again without reissue.
    let res = client
        .post(format!("{}/admin/users/{alice_id}/unban", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = client
        .post(format!("{}/posts", srv.base_url))
        .bearer_auth(&alice)
        .json(&json!({ "title": "t", "content": "c" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn role_change_applies_to_existing_tokens() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let bob = signup_and_login(&client, &srv.base_url, "bob").await;
    let admin = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;
    let bob_id = find_user_id(&client, &srv.base_url, &admin, "bob").await;

    // Unknown roles are a validation failure, not an authorization one.
    let res = client
        .put(format!("{}/admin/users/{bob_id}/role", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "role": "emperor" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_role");

    let res = client
        .put(format!("{}/admin/users/{bob_id}/role", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "role": "admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["role"], "ADMIN");

    // Principals are resolved fresh per request: bob's old token now carries
    // admin rights.
    let res = client
        .get(format!("{}/admin/users", srv.base_url))
        .bearer_auth(&bob)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn forged_and_expired_tokens_are_rejected() {
    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        iat: i64,
        exp: i64,
    }

    fn mint(secret: &str, sub: &str, iat: i64, exp: i64) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                sub: sub.to_string(),
                iat,
                exp,
            },
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    register(&client, &srv.base_url, "alice").await;

    let now = Utc::now().timestamp();
    let cases = [
        // Signed with the wrong secret.
        mint("wrong-secret", "alice", now, now + 3600),
        // Correct secret, already expired.
        mint(JWT_SECRET, "alice", now - 7200, now - 3600),
        // Valid signature for an account that does not exist.
        mint(JWT_SECRET, "ghost", now, now + 3600),
    ];

    for token in cases {
        let res = client
            .post(format!("{}/posts", srv.base_url))
            .bearer_auth(&token)
            .json(&json!({ "title": "t", "content": "c" }))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], "unauthenticated");
    }
}

#[tokio::test]
async fn comment_lifecycle_with_moderation() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let alice = signup_and_login(&client, &srv.base_url, "alice").await;
    let bob = signup_and_login(&client, &srv.base_url, "bob").await;
    let mallory = signup_and_login(&client, &srv.base_url, "mallory").await;
    let admin = login(&client, &srv.base_url, "admin", ADMIN_PASSWORD).await;

    let post = create_post(&client, &srv.base_url, &alice, "Hello", true).await;
    let post_id = post["id"].as_str().unwrap();

    let res = client
        .post(format!("{}/posts/{post_id}/comments", srv.base_url))
        .bearer_auth(&bob)
        .json(&json!({ "content": "nice post" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let comment: Value = res.json().await.unwrap();
    let comment_id = comment["id"].as_str().unwrap();

    // Anyone may read the comment list, no token required.
    let listed: Vec<Value> = client
        .get(format!("{}/posts/{post_id}/comments", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);

    // A third user may not edit or delete someone else's comment.
    let res = client
        .delete(format!("{}/comments/{comment_id}", srv.base_url))
        .bearer_auth(&mallory)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The admin may.
    let res = client
        .delete(format!("{}/comments/{comment_id}", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
}
