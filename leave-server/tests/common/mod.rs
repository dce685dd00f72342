//! Integration test harness
//!
//! Builds the full application (routes + middleware + state) against a
//! temporary work directory and drives it with oneshot requests.

// each test binary uses a subset of these helpers
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use leave_server::auth::JwtConfig;
use leave_server::{Config, ServerState, routes};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test-password";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    _work_dir: tempfile::TempDir,
}

pub fn test_app() -> TestApp {
    let work_dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        work_dir: work_dir.path().to_string_lossy().into_owned(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-signing-key-0123456789".to_string(),
            expiration_minutes: 60,
            issuer: "leave-server".to_string(),
            audience: "leave-clients".to_string(),
        },
        environment: "test".to_string(),
        seed_password: TEST_PASSWORD.to_string(),
    };

    let state = ServerState::initialize(&config).expect("initialize state");
    let app = routes::build_app(&state).with_state(state.clone());

    TestApp {
        app,
        state,
        _work_dir: work_dir,
    }
}

/// Send a JSON request and return status and parsed body
pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Log in a seeded account and return its bearer token
pub async fn login(app: &Router, username: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/login",
        None,
        Some(serde_json::json!({ "username": username, "password": TEST_PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    body["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}

/// Build a multipart/form-data body
///
/// Each part is (field name, optional file name, bytes).
pub fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, bytes) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

/// Send a multipart request and return status and parsed body
pub async fn multipart_request(
    app: &Router,
    uri: &str,
    token: &str,
    boundary: &str,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .expect("request");

    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = response.into_body().collect().await.expect("body").to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}
