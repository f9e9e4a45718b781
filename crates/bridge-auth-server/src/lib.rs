//! # bridge-auth-server
//!
//! The HTTP surface of the handoff broker. One binary serves either role
//! of the protocol, selected by configuration:
//!
//! - **broker**: authenticates users against the identity provider, mints
//!   and redeems exchange tokens, and drives the post-login handoff.
//! - **relying**: a sibling property that keeps its own sessions and talks
//!   to the broker to redeem tokens or have them minted for its users.

#![warn(clippy::all)]

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod request_context;
pub mod session;
pub mod state;

use config::Role;
use state::AppState;

/// Assemble the router for the configured role.
pub fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        // Session surface shared by both roles
        .route("/auth/status", get(api::auth::auth_status))
        .route("/auth/logout", get(api::auth::logout))
        // Token redemption
        .route("/auth/sso/verify", post(api::sso::verify))
        .route("/sso-login", get(api::sso::sso_login));

    let router = match state.config.role {
        Role::Broker => router
            .route("/auth/sso/generate", post(api::sso::generate))
            .route(
                "/auth/sso/generate-from-user",
                post(api::sso::generate_from_user),
            )
            .route("/auth/provider", get(api::provider::provider_login))
            .route(
                "/auth/provider/callback",
                get(api::provider::provider_callback),
            ),
        Role::Relying => router.route(
            "/auth/sso/generate-from-session",
            post(api::sso::generate_from_session),
        ),
    };

    router
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::request_id_middleware,
        ))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(cors_layer(&state))
        .with_state(state)
}

/// Strict allow-list CORS for credentialed requests. Only the configured
/// cooperating origins may call the JSON endpoints from a browser; there is
/// no wildcard path.
fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
