use axum::http::header::SET_COOKIE;
use axum::{
    extract::{Query, State},
    response::{AppendHeaders, IntoResponse, Json, Redirect, Response},
};
use bridge_auth_identity_core::Identity;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use super::helpers::hash_for_log;
use crate::config::Role;
use crate::error::ApiError;
use crate::extractors::CurrentSession;
use crate::request_context::RequestContext;
use crate::session::create_session_cookie;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub user: Identity,
}

/// Asserted identity payload. Fields are optional so structural failures
/// surface as `MALFORMED_IDENTITY` instead of a generic body-parse error.
#[derive(Debug, Deserialize)]
pub struct AssertedUser {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateFromUserRequest {
    pub user: Option<AssertedUser>,
}

#[derive(Debug, Deserialize)]
pub struct SsoLoginQuery {
    pub token: Option<String>,
    #[serde(rename = "returnUrl")]
    pub return_url: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/sso/generate (broker)
///
/// Mints an exchange token for the caller's own authenticated session.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    CurrentSession(session): CurrentSession,
) -> Result<Json<TokenResponse>, ApiError> {
    let issued = state.issuer.issue_for_session(&session.identity).await;

    tracing::info!(
        ip = %ctx.ip_address,
        user_hash = %hash_for_log(&session.identity.email),
        token_hash = %hash_for_log(&issued.token),
        "Exchange token generated for session"
    );

    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

/// POST /auth/sso/generate-from-user (broker)
///
/// Mints an exchange token for an identity asserted by a relying property.
/// Only structural validation happens here; trust in the caller is
/// established out of band between the cooperating sites.
pub async fn generate_from_user(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(req): Json<GenerateFromUserRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let user = req
        .user
        .ok_or_else(|| ApiError::MissingInput("user".to_string()))?;

    let identity = Identity {
        id: user.id.unwrap_or_default(),
        email: user.email.unwrap_or_default(),
        name: user.name,
        picture: user.picture,
    };

    let issued = state.issuer.issue_for_asserted(identity).await.map_err(|e| {
        tracing::warn!(ip = %ctx.ip_address, error = %e, "Asserted identity rejected");
        ApiError::from(e)
    })?;

    tracing::info!(
        ip = %ctx.ip_address,
        token_hash = %hash_for_log(&issued.token),
        "Exchange token generated for asserted identity"
    );

    Ok(Json(TokenResponse {
        token: issued.token,
    }))
}

/// POST /auth/sso/generate-from-session (relying)
///
/// Asks the broker to mint a token for the identity held in this
/// property's own session, so the user can carry it to a sibling site.
pub async fn generate_from_session(
    State(state): State<Arc<AppState>>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<TokenResponse>, ApiError> {
    let broker = state
        .broker
        .as_ref()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("broker client not configured")))?;

    let token = broker.generate_from_user(&session.identity).await?;

    tracing::info!(
        user_hash = %hash_for_log(&session.identity.email),
        token_hash = %hash_for_log(&token),
        "Broker minted exchange token for local session"
    );

    Ok(Json(TokenResponse { token }))
}

/// POST /auth/sso/verify
///
/// Redeems an exchange token and opens a local session. Redemption is
/// single-use: a second call with the same token answers 401.
pub async fn verify(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Json(req): Json<VerifyRequest>,
) -> Result<Response, ApiError> {
    let token = non_empty(req.token.as_deref())
        .ok_or_else(|| ApiError::MissingInput("token".to_string()))?;

    let identity = redeem_for_role(&state, token).await.map_err(|e| {
        tracing::warn!(
            ip = %ctx.ip_address,
            token_hash = %hash_for_log(token),
            error = %e,
            "Token redemption failed"
        );
        e
    })?;

    let session = state.sessions.create(identity.clone()).await;
    let cookie = create_session_cookie(
        session.id,
        state.config.session_ttl_secs,
        state.config.cookie_secure,
    );

    tracing::info!(
        ip = %ctx.ip_address,
        user_hash = %hash_for_log(&identity.email),
        "Token redeemed, local session established"
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(VerifyResponse {
            success: true,
            user: identity,
        }),
    )
        .into_response())
}

/// GET /sso-login?token=&returnUrl=
///
/// Browser entry point of the redemption flow. With a token: redeem, set
/// the session cookie, and continue to the (same-origin) return
/// destination. Without one: route the browser into the login flow for
/// this role. Redemption failures land on the failure page rather than
/// answering a navigation with JSON.
pub async fn sso_login(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(query): Query<SsoLoginQuery>,
) -> Result<Response, ApiError> {
    let Some(token) = non_empty(query.token.as_deref()) else {
        return login_entry_redirect(&state, query.return_url.as_deref());
    };

    match redeem_for_role(&state, token).await {
        Ok(identity) => {
            let session = state.sessions.create(identity.clone()).await;
            let cookie = create_session_cookie(
                session.id,
                state.config.session_ttl_secs,
                state.config.cookie_secure,
            );

            tracing::info!(
                ip = %ctx.ip_address,
                user_hash = %hash_for_log(&identity.email),
                "SSO login completed"
            );

            let destination = local_destination(&state, query.return_url.as_deref());
            Ok((
                AppendHeaders([(SET_COOKIE, cookie)]),
                Redirect::to(&destination),
            )
                .into_response())
        }
        Err(
            err @ (ApiError::InvalidToken | ApiError::ExpiredToken | ApiError::Unauthenticated),
        ) => {
            tracing::warn!(
                ip = %ctx.ip_address,
                token_hash = %hash_for_log(token),
                error = %err,
                "SSO login failed"
            );
            Ok(Redirect::to(&state.config.login_failure_path).into_response())
        }
        Err(other) => Err(other),
    }
}

// ============================================================================
// Internals
// ============================================================================

/// Redeem against the local store (broker) or through the broker client
/// (relying).
async fn redeem_for_role(state: &AppState, token: &str) -> Result<Identity, ApiError> {
    match &state.broker {
        Some(broker) => Ok(broker.verify_token(token).await?),
        None => Ok(state.tokens.consume(token).await?),
    }
}

/// Route a token-less /sso-login visit into the login flow.
fn login_entry_redirect(state: &AppState, return_url: Option<&str>) -> Result<Response, ApiError> {
    match state.config.role {
        Role::Broker => {
            let mut url = state
                .config
                .public_origin
                .join("/auth/provider")
                .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
            if let Some(return_url) = non_empty(return_url) {
                url.query_pairs_mut().append_pair("returnUrl", return_url);
            }
            Ok(Redirect::to(url.as_str()).into_response())
        }
        Role::Relying => {
            // Bounce through the broker's login; it will hand the browser
            // back to this property's redemption endpoint with a token.
            let broker_url = state
                .config
                .broker_url
                .as_ref()
                .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("broker URL not configured")))?;
            let own_redemption = state
                .config
                .public_origin
                .join("/sso-login")
                .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;

            let mut url = broker_url
                .join("/sso-login")
                .map_err(|e| ApiError::Internal(anyhow::anyhow!(e)))?;
            url.query_pairs_mut()
                .append_pair("returnUrl", own_redemption.as_str());
            Ok(Redirect::to(url.as_str()).into_response())
        }
    }
}

/// Resolve the post-redemption destination. Only same-origin targets are
/// honored; anything else falls back to the default landing page.
fn local_destination(state: &AppState, return_url: Option<&str>) -> String {
    let Some(raw) = non_empty(return_url) else {
        return state.config.default_landing.clone();
    };

    // Relative path on this property ("/embed"), but not scheme-relative.
    if raw.starts_with('/') && !raw.starts_with("//") {
        return raw.to_string();
    }

    if let Ok(url) = Url::parse(raw) {
        if url.origin() == state.config.public_origin.origin() {
            return url.to_string();
        }
    }

    state.config.default_landing.clone()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
