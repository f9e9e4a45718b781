use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use std::sync::Arc;

use crate::session::{extract_session_cookie, Session};
use crate::{error::ApiError, state::AppState};

/// Extractor for handlers that require an authenticated local session.
///
/// Reads the session cookie and resolves it against the store; rejects
/// with `UNAUTHENTICATED` when the cookie is absent, unknown, or expired.
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session_id =
            extract_session_cookie(&parts.headers).ok_or(ApiError::Unauthenticated)?;

        let session = state
            .sessions
            .get(session_id)
            .await
            .ok_or(ApiError::Unauthenticated)?;

        Ok(CurrentSession(session))
    }
}

/// Extractor for handlers that behave differently for signed-in users but
/// never reject (status, logout, login pages).
pub struct MaybeSession(pub Option<Session>);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for MaybeSession {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let session = match extract_session_cookie(&parts.headers) {
            Some(session_id) => state.sessions.get(session_id).await,
            None => None,
        };

        Ok(MaybeSession(session))
    }
}
