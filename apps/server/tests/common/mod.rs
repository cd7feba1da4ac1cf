#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use moneyboard_server::{api::app_router, build_state, config::Config, AppState};
use rand::{rngs::OsRng, RngCore};
use serde_json::Value;
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub const PASSWORD: &str = "correct horse battery";

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    _dir: TempDir,
}

pub struct SignedIn {
    pub user_id: String,
    /// `mb_session=...` pair ready for a `Cookie` header.
    pub session: String,
    /// `mb_refresh=...` pair ready for a `Cookie` header.
    pub refresh: String,
}

pub async fn spawn_app() -> TestApp {
    let dir = tempdir().unwrap();
    let mut secret = [0u8; 32];
    OsRng.fill_bytes(&mut secret);

    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        static_dir: "dist".to_string(),
        secret_key: Some(BASE64.encode(secret)),
        cookie_secure: false,
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state.clone(), &config),
        state,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookies: &[&str]) -> Response {
        self.send(request(Method::GET, uri, cookies, None)).await
    }

    pub async fn post(&self, uri: &str, cookies: &[&str], body: Value) -> Response {
        self.send(request(Method::POST, uri, cookies, Some(body)))
            .await
    }

    pub async fn put(&self, uri: &str, cookies: &[&str], body: Value) -> Response {
        self.send(request(Method::PUT, uri, cookies, Some(body)))
            .await
    }

    pub async fn delete(&self, uri: &str, cookies: &[&str]) -> Response {
        self.send(request(Method::DELETE, uri, cookies, None)).await
    }

    pub async fn sign_up(&self, email: &str) -> SignedIn {
        let response = self
            .post(
                "/api/v1/auth/signup",
                &[],
                serde_json::json!({ "name": "Test User", "email": email, "password": PASSWORD }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let cookies = set_cookies(&response);
        let user = json_body(response).await;
        SignedIn {
            user_id: user["id"].as_str().unwrap().to_string(),
            session: cookie_pair(&cookies, "mb_session"),
            refresh: cookie_pair(&cookies, "mb_refresh"),
        }
    }
}

pub fn request(method: Method, uri: &str, cookies: &[&str], body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::USER_AGENT, "integration-test");
    if !cookies.is_empty() {
        builder = builder.header(header::COOKIE, cookies.join("; "));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn set_cookies(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

/// `name=value` part of the `Set-Cookie` value for `name`.
pub fn cookie_pair(set_cookies: &[String], name: &str) -> String {
    let prefix = format!("{name}=");
    set_cookies
        .iter()
        .find(|c| c.starts_with(&prefix))
        .and_then(|c| c.split(';').next())
        .unwrap_or_else(|| panic!("no {name} cookie in {set_cookies:?}"))
        .to_string()
}

pub async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
