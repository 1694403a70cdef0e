#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use notespace::ai::{AiClient, NoopAiClient};
use notespace::api::router;
use notespace::config::AppConfig;
use notespace::db::{self, Database, Workspace, seed};
use notespace::state::AppState;

pub const BOUNDARY: &str = "notespace-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.text).expect("response body is JSON")
    }

    /// The `name=value` pair from `Set-Cookie`, ready to send back.
    pub fn cookie(&self) -> String {
        let header = self
            .headers
            .get(SET_COOKIE)
            .expect("Set-Cookie header")
            .to_str()
            .expect("ASCII cookie");
        header.split(';').next().unwrap_or_default().to_string()
    }
}

pub fn app() -> TestApp {
    build(Workspace::default(), Arc::new(NoopAiClient))
}

pub fn seeded_app() -> TestApp {
    let mut workspace = Workspace::default();
    seed::seed_demo_data(&mut workspace);
    build(workspace, Arc::new(NoopAiClient))
}

pub fn app_with_ai(ai: Arc<dyn AiClient>) -> TestApp {
    build(Workspace::default(), ai)
}

fn build(workspace: Workspace, ai: Arc<dyn AiClient>) -> TestApp {
    let db = db::new_database(workspace);
    let state = AppState {
        db: db.clone(),
        ai,
        config: Arc::new(AppConfig::default()),
    };
    TestApp {
        router: router(state),
        db,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        TestResponse {
            status,
            headers,
            text: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(request(Method::GET, uri, None, None)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(request(Method::DELETE, uri, None, None)).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(request(Method::POST, uri, Some(body), None)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(request(Method::PUT, uri, Some(body), None)).await
    }

    pub async fn upload(&self, uri: &str, filename: &str, content: &[u8]) -> TestResponse {
        self.send(multipart(uri, filename, content, &[])).await
    }
}

pub fn request(method: Method, uri: &str, body: Option<Value>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request")
}

/// A `multipart/form-data` POST with one `file` part and extra text fields.
pub fn multipart(uri: &str, filename: &str, content: &[u8], fields: &[(&str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .expect("valid multipart request")
}
