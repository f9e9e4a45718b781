use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse, Json, Redirect},
};
use axum::http::header::SET_COOKIE;
use bridge_auth_identity_core::Identity;
use serde::Serialize;
use std::sync::Arc;

use crate::extractors::MaybeSession;
use crate::session::clear_session_cookie;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Identity>,
}

/// GET /auth/status
pub async fn auth_status(MaybeSession(session): MaybeSession) -> Json<AuthStatusResponse> {
    match session {
        Some(session) => Json(AuthStatusResponse {
            authenticated: true,
            user: Some(session.identity),
        }),
        None => Json(AuthStatusResponse {
            authenticated: false,
            user: None,
        }),
    }
}

/// GET /auth/logout
///
/// Destroys the local session (if any), clears the cookie, and sends the
/// browser to the default landing page.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    MaybeSession(session): MaybeSession,
) -> impl IntoResponse {
    if let Some(session) = session {
        state.sessions.delete(session.id).await;
        tracing::info!(user = %session.identity.email, "Session destroyed");
    }

    let cookie = clear_session_cookie(state.config.cookie_secure);
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to(&state.config.default_landing),
    )
}
