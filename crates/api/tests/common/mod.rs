#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use glavtrub_api::auth::jwt::{generate_access_token, JwtConfig};
use glavtrub_api::auth::password::hash_password;
use glavtrub_api::config::ServerConfig;
use glavtrub_api::router::build_app_router;
use glavtrub_api::state::AppState;
use glavtrub_core::roles::Role;
use glavtrub_core::seo::SiteInfo;
use glavtrub_db::models::user::{CreateUser, User};
use glavtrub_db::repositories::UserRepo;
use glavtrub_events::EventBus;

pub const TEST_PASSWORD: &str = "test_password_123";

/// Build a test `ServerConfig` with safe defaults rooted at `static_dir`.
pub fn test_config(static_dir: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
        site: SiteInfo::new("ГлавТрубТорг", "https://glavtrubtorg.ru"),
        static_dir: static_dir.to_path_buf(),
        upload_dir: static_dir.join("uploads"),
        max_upload_bytes: 4 * 1024 * 1024,
        captcha_secret: "integration-captcha-secret".to_string(),
    }
}

/// A router over `pool` plus everything a test may need to inspect.
pub struct TestApp {
    pub router: Router,
    pub config: Arc<ServerConfig>,
    pub event_bus: Arc<EventBus>,
    /// Keeps the static directory alive for the duration of the test.
    pub static_dir: tempfile::TempDir,
}

impl TestApp {
    /// A fresh router sharing this app's state; `oneshot` consumes routers.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    pub fn token(&self, user: &User) -> String {
        generate_access_token(user.id, &user.role, &self.config.jwt)
            .expect("token generation should succeed")
    }
}

/// Build the full application with the production middleware stack.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let static_dir = tempfile::tempdir().expect("tempdir");
    let config = Arc::new(test_config(static_dir.path()));
    let event_bus = Arc::new(EventBus::default());

    let state = AppState {
        pool,
        config: Arc::clone(&config),
        event_bus: Arc::clone(&event_bus),
    };
    let router = build_app_router(state, &config);

    TestApp {
        router,
        config,
        event_bus,
        static_dir,
    }
}

pub async fn create_user(pool: &PgPool, username: &str, role: Role) -> User {
    let input = CreateUser {
        username: username.to_string(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing should succeed"),
        role,
    };
    UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed")
}

pub async fn create_admin(pool: &PgPool) -> User {
    create_user(pool, "admin", Role::Admin).await
}

pub async fn create_editor(pool: &PgPool) -> User {
    create_user(pool, "editor", Role::Editor).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request should complete")
}

fn builder(method: Method, uri: &str, token: Option<&str>) -> axum::http::request::Builder {
    let builder = Request::builder().method(method).uri(uri);
    match token {
        Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    }
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, builder(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::GET, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let request = builder(method, uri, token)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::POST, uri, None, body).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    json_request(app, Method::POST, uri, Some(token), body).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response {
    json_request(app, Method::PUT, uri, Some(token), body).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(
        app,
        builder(Method::DELETE, uri, Some(token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// Multipart body with a single `file` part plus plain text fields.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    filename: &str,
    data: &[u8],
    fields: &[(&str, &str)],
) -> Response {
    let boundary = "glavtrub-test-boundary";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = builder(Method::POST, uri, Some(token))
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

pub async fn body_text(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).expect("body should be UTF-8")
}
