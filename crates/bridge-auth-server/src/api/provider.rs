//! Identity provider login flow (broker role).
//!
//! The return destination requested by the caller rides through the
//! provider redirect as encoded state. The identity established here comes
//! exclusively from the provider's verified profile response, never from
//! anything the caller supplied.

use axum::http::header::SET_COOKIE;
use axum::{
    extract::{Query, State},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use bridge_auth_methods::handoff::{append_token, resolve_handoff, HandoffDecision};
use bridge_auth_methods::return_state;
use serde::Deserialize;
use std::sync::Arc;

use super::helpers::hash_for_log;
use crate::error::ApiError;
use crate::request_context::RequestContext;
use crate::session::create_session_cookie;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProviderLoginQuery {
    #[serde(rename = "returnUrl")]
    pub return_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProviderCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// GET /auth/provider?returnUrl=
///
/// Encodes the return destination into the state blob and sends the
/// browser to the provider's authorization endpoint.
pub async fn provider_login(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProviderLoginQuery>,
) -> Result<Redirect, ApiError> {
    let oauth_config = state
        .oauth_config
        .as_ref()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("provider not configured")))?;

    let return_url = query.return_url.unwrap_or_default();
    let state_blob = return_state::encode(&return_url);

    let auth_url = state
        .oauth_client
        .build_auth_url(oauth_config, &state_blob)
        .map_err(ApiError::from)?;

    tracing::info!(return_url = %return_url, "Provider login initiated");

    Ok(Redirect::to(&auth_url))
}

/// GET /auth/provider/callback?code=&state=
///
/// Completes the provider exchange, opens the broker-local session, and
/// drives the handoff decision: stay local, or mint a token and carry the
/// login to an allow-listed sibling property.
pub async fn provider_callback(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Query(query): Query<ProviderCallbackQuery>,
) -> Result<Response, ApiError> {
    // Consent denied or provider-side failure: no session, no token.
    if let Some(error) = query.error {
        tracing::warn!(ip = %ctx.ip_address, provider_error = %error, "Provider denied login");
        return Ok(Redirect::to(&state.config.login_failure_path).into_response());
    }

    let Some(code) = query.code.filter(|c| !c.is_empty()) else {
        tracing::warn!(ip = %ctx.ip_address, "Provider callback without code");
        return Ok(Redirect::to(&state.config.login_failure_path).into_response());
    };

    let oauth_config = state
        .oauth_config
        .as_ref()
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("provider not configured")))?;

    let token_response = state
        .oauth_client
        .exchange_code(oauth_config, &code)
        .await?;

    let profile = state
        .oauth_client
        .get_user_info(oauth_config, &token_response.access_token)
        .await?;

    let identity = profile
        .into_identity()
        .ok_or_else(|| ApiError::Upstream("provider profile has no email".to_string()))?;

    let session = state.sessions.create(identity.clone()).await;
    let cookie = create_session_cookie(
        session.id,
        state.config.session_ttl_secs,
        state.config.cookie_secure,
    );

    tracing::info!(
        ip = %ctx.ip_address,
        user_hash = %hash_for_log(&identity.email),
        "Provider login completed"
    );

    // Decode the state blob and decide where the browser goes. Decode or
    // allow-list failures degrade to the default landing page; the login
    // itself has already succeeded.
    let decoded = query.state.as_deref().and_then(return_state::decode);
    let decision = resolve_handoff(
        decoded.as_deref(),
        &state.allowlist,
        &state.config.public_origin.origin(),
    );

    let destination = match decision {
        HandoffDecision::DefaultLanding => state.config.default_landing.clone(),
        HandoffDecision::SameSite(url) => url.to_string(),
        HandoffDecision::CrossSite(url) => {
            let issued = state.issuer.issue_for_session(&identity).await;
            tracing::info!(
                target_origin = %url.origin().ascii_serialization(),
                token_hash = %hash_for_log(&issued.token),
                "Cross-site handoff"
            );
            append_token(&url, &issued.token).to_string()
        }
    };

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::to(&destination),
    )
        .into_response())
}
