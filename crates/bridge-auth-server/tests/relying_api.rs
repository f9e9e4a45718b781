//! Relying-role HTTP tests: the satellite property proxies redemption and
//! minting to the broker. A stub broker runs on a loopback listener so the
//! real HTTP client path (timeouts, error mapping) is exercised.

mod common;

use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use bridge_auth_identity_core::Identity;
use bridge_auth_server::session::create_session_cookie;
use serde_json::json;

use common::*;

async fn stub_verify(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    match body["token"].as_str() {
        Some("good-token") => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "user": { "id": "42", "email": "ada@example.com", "name": "Ada Lovelace" }
            })),
        ),
        Some("expired-token") => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "code": "EXPIRED_TOKEN", "message": "Token expired" } })),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "code": "INVALID_TOKEN", "message": "Invalid or unknown token" } })),
        ),
    }
}

async fn stub_generate_from_user(Json(body): Json<serde_json::Value>) -> impl IntoResponse {
    if body["user"]["email"].as_str().is_some() {
        (StatusCode::OK, Json(json!({ "token": "minted-by-stub" })))
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": { "code": "MALFORMED_IDENTITY", "message": "Invalid user data" } })),
        )
    }
}

/// Spawn the stub broker on a loopback port; returns its base URL.
async fn spawn_stub_broker() -> String {
    let app = Router::new()
        .route("/auth/sso/verify", post(stub_verify))
        .route("/auth/sso/generate-from-user", post(stub_generate_from_user));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_verify_proxies_to_broker_and_opens_session() {
    let broker_url = spawn_stub_broker().await;
    let (app, _state) = build_app(relying_config(&broker_url));

    let response = post_json(&app, "/auth/sso/verify", json!({ "token": "good-token" })).await;
    assert_status(&response, StatusCode::OK);
    let cookie = session_cookie(&response).expect("verify should set a session cookie");
    let body = json_body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["email"], "ada@example.com");

    // The session lives on this property, not on the broker.
    let response = get_with_cookie(&app, "/auth/status", &cookie).await;
    let body = json_body(response).await;
    assert_eq!(body["authenticated"], true);
    assert_eq!(body["user"]["name"], "Ada Lovelace");
}

#[tokio::test]
async fn test_verify_passes_broker_verdict_through() {
    let broker_url = spawn_stub_broker().await;
    let (app, _state) = build_app(relying_config(&broker_url));

    let response = post_json(&app, "/auth/sso/verify", json!({ "token": "bad-token" })).await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert_error_code(&json_body(response).await, "INVALID_TOKEN");

    let response = post_json(&app, "/auth/sso/verify", json!({ "token": "expired-token" })).await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert_error_code(&json_body(response).await, "EXPIRED_TOKEN");
}

#[tokio::test]
async fn test_verify_missing_token_is_local_client_error() {
    let broker_url = spawn_stub_broker().await;
    let (app, _state) = build_app(relying_config(&broker_url));

    let response = post_json(&app, "/auth/sso/verify", json!({})).await;
    assert_status(&response, StatusCode::BAD_REQUEST);
    assert_error_code(&json_body(response).await, "MISSING_INPUT");
}

#[tokio::test]
async fn test_unreachable_broker_maps_to_upstream_failure() {
    // Bind a port and drop the listener so connections are refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (app, _state) = build_app(relying_config(&format!("http://{addr}")));

    let response = post_json(&app, "/auth/sso/verify", json!({ "token": "good-token" })).await;
    assert_status(&response, StatusCode::BAD_GATEWAY);
    assert_error_code(&json_body(response).await, "UPSTREAM_FAILURE");
}

#[tokio::test]
async fn test_generate_from_session_requires_login() {
    let broker_url = spawn_stub_broker().await;
    let (app, _state) = build_app(relying_config(&broker_url));

    let response = post_json(&app, "/auth/sso/generate-from-session", json!({})).await;
    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert_error_code(&json_body(response).await, "UNAUTHENTICATED");
}

#[tokio::test]
async fn test_generate_from_session_mints_via_broker() {
    let broker_url = spawn_stub_broker().await;
    let (app, state) = build_app(relying_config(&broker_url));

    let session = state
        .sessions
        .create(Identity::new("42", "ada@example.com"))
        .await;
    let cookie = create_session_cookie(session.id, 86400, false);
    let cookie_pair = cookie.split(';').next().unwrap();

    let response =
        post_json_with_cookie(&app, "/auth/sso/generate-from-session", cookie_pair, json!({}))
            .await;
    assert_status(&response, StatusCode::OK);
    assert_eq!(json_body(response).await["token"], "minted-by-stub");
}

#[tokio::test]
async fn test_sso_login_without_token_bounces_to_broker() {
    let broker_url = spawn_stub_broker().await;
    let (app, _state) = build_app(relying_config(&broker_url));

    let response = get(&app, "/sso-login").await;
    assert_status(&response, StatusCode::SEE_OTHER);

    let target = location(&response);
    assert!(target.starts_with(&broker_url), "got {target}");
    assert!(target.contains("/sso-login"), "got {target}");
    // The broker is told to come back to this property's redemption endpoint.
    assert!(target.contains("returnUrl="), "got {target}");
    assert!(target.contains("localhost%3A3001"), "got {target}");
}

#[tokio::test]
async fn test_sso_login_with_token_redeems_and_redirects() {
    let broker_url = spawn_stub_broker().await;
    let (app, _state) = build_app(relying_config(&broker_url));

    let response = get(&app, "/sso-login?token=good-token").await;
    assert_status(&response, StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    assert!(session_cookie(&response).is_some());

    let response = get(&app, "/sso-login?token=bad-token").await;
    assert_status(&response, StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}
