#![allow(dead_code)]

use api::{
    app::build_router,
    auth::{AuthConfig, PasswordService},
    AppConfig, AppState,
};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "tennisadmin";
const BOUNDARY: &str = "tenko-test-boundary";
pub const UPLOAD_LIMIT: usize = 1024 * 1024;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub uploads: TempDir,
    _store: Option<TempDir>,
}

/// App over a fresh in-memory store and a temporary upload directory.
pub async fn setup_test_app() -> TestApp {
    let pool = infra::db::connect_in_memory()
        .await
        .expect("Failed to open in-memory database");
    build_test_app(pool, None).await
}

/// App over a SQLite file with a multi-connection pool, for tests that need
/// requests to really run side by side.
pub async fn setup_file_backed_app() -> TestApp {
    let store = tempfile::tempdir().expect("Failed to create store dir");
    let url = format!("sqlite://{}", store.path().join("tenko.sqlite").display());
    let pool = infra::db::connect(&url)
        .await
        .expect("Failed to open database file");
    build_test_app(pool, Some(store)).await
}

async fn build_test_app(pool: infra::db::Db, store: Option<TempDir>) -> TestApp {
    infra::db::init_schema(&pool)
        .await
        .expect("Failed to create schema");

    let uploads = tempfile::tempdir().expect("Failed to create upload dir");
    let config = AppConfig {
        database_url: "sqlite::memory:".into(),
        port: 0,
        upload_dir: uploads.path().to_path_buf(),
        upload_max_bytes: UPLOAD_LIMIT,
        auth: AuthConfig {
            jwt_secret: "test-secret".into(),
            jwt_expiration_hours: 1,
            admin_password_hash: PasswordService::hash_password_with_cost(ADMIN_PASSWORD, 4)
                .expect("Failed to hash admin password"),
        },
    };

    let state = AppState::new(pool, &config);
    TestApp {
        router: build_router(state.clone()),
        state,
        uploads,
        _store: store,
    }
}

/// Send a request and decode the body as JSON (plain text becomes a JSON string).
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    send_to(app.router.clone(), request).await
}

/// Same as [`send`] on an owned router, usable from spawned tasks.
pub async fn send_to(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

/// Number of files currently in the upload directory.
pub fn stored_uploads(app: &TestApp) -> usize {
    std::fs::read_dir(app.uploads.path())
        .expect("Failed to list upload dir")
        .count()
}

pub fn empty(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json(method: Method, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn multipart(
    method: Method,
    uri: &str,
    token: Option<&str>,
    fields: &[(&str, &str)],
    photo: Option<(&str, &[u8])>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, bytes)) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let mut builder = Request::builder().method(method).uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body)).unwrap()
}

pub fn club_fields<'a>(name: &'a str, courts: &'a str) -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", name),
        ("address", "1 Rue X"),
        ("surface", "clay"),
        ("court_count", courts),
        ("lat", "48.85"),
        ("lng", "2.35"),
    ]
}

/// Submit a complex through the public endpoint and return its id.
pub async fn create_complex(app: &TestApp, name: &str, courts: u32) -> i64 {
    let courts = courts.to_string();
    let (status, body) = send(
        app,
        multipart(Method::POST, "/complexes", None, &club_fields(name, &courts), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["id"].as_i64().expect("id in response")
}

pub async fn admin_token(app: &TestApp) -> String {
    let (status, body) = send(
        app,
        json(
            Method::POST,
            "/admin/login",
            None,
            serde_json::json!({ "password": ADMIN_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["token"].as_str().expect("token in response").to_string()
}

pub async fn admin_list(app: &TestApp, token: &str) -> Vec<Value> {
    let (status, body) = send(app, empty(Method::GET, "/admin/complexes", Some(token))).await;
    assert_eq!(status, StatusCode::OK, "admin list failed: {body}");
    body.as_array().cloned().unwrap_or_default()
}

pub async fn public_list(app: &TestApp) -> Vec<Value> {
    let (status, body) = send(app, empty(Method::GET, "/complexes", None)).await;
    assert_eq!(status, StatusCode::OK, "public list failed: {body}");
    body.as_array().cloned().unwrap_or_default()
}
