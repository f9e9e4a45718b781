//! Shared harness for HTTP-level tests: in-memory router setup plus
//! request/response helpers driven through `tower::ServiceExt`.

// Each test binary uses a subset of these helpers.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use bridge_auth_server::config::{Config, ProviderSettings, Role};
use bridge_auth_server::create_router;
use bridge_auth_server::state::AppState;

pub const BROKER_ORIGIN: &str = "http://localhost:3002";
pub const SITE_B_ORIGIN: &str = "http://localhost:3001";

pub fn broker_config() -> Config {
    Config {
        role: Role::Broker,
        bind_address: "127.0.0.1:0".parse().unwrap(),
        public_origin: BROKER_ORIGIN.parse().unwrap(),
        allowed_origins: vec![BROKER_ORIGIN.to_string(), SITE_B_ORIGIN.to_string()],
        default_landing: "/".to_string(),
        login_failure_path: "/login".to_string(),
        session_ttl_secs: 86400,
        cookie_secure: false,
        sweep_interval_secs: 60,
        provider: Some(ProviderSettings {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
            redirect_uri: format!("{BROKER_ORIGIN}/auth/provider/callback"),
        }),
        broker_url: None,
        trusted_proxies: vec![],
    }
}

pub fn relying_config(broker_url: &str) -> Config {
    Config {
        role: Role::Relying,
        bind_address: "127.0.0.1:0".parse().unwrap(),
        public_origin: SITE_B_ORIGIN.parse().unwrap(),
        allowed_origins: vec![BROKER_ORIGIN.to_string(), SITE_B_ORIGIN.to_string()],
        default_landing: "/".to_string(),
        login_failure_path: "/login".to_string(),
        session_ttl_secs: 86400,
        cookie_secure: false,
        sweep_interval_secs: 60,
        provider: None,
        broker_url: Some(broker_url.parse().unwrap()),
        trusted_proxies: vec![],
    }
}

pub fn build_app(config: Config) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(config).unwrap());
    (create_router(Arc::clone(&state)), state)
}

pub async fn get(app: &Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: &Router, path: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, path: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json_with_cookie(
    app: &Router,
    path: &str,
    cookie: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// First cookie pair ("name=value") from the Set-Cookie header.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    Some(value.split(';').next()?.trim().to_string())
}

pub fn location(response: &Response<Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn assert_error_code(body: &serde_json::Value, expected: &str) {
    assert_eq!(
        body["error"]["code"].as_str(),
        Some(expected),
        "unexpected error body: {body}"
    );
}

pub fn assert_status(response: &Response<Body>, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
