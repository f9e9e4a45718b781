use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

/// Extract client IP address with proxy validation
///
/// X-Forwarded-For is only trusted when the direct connection comes from a
/// configured trusted proxy; otherwise the direct connection IP wins. This
/// keeps attacker-set forwarding headers out of the audit log.
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trusted_proxies: &[IpAddr],
) -> String {
    if let Some(direct) = direct_ip {
        if trusted_proxies.contains(&direct) {
            // Use the rightmost IP in the chain: the client as seen by our
            // trusted proxy, the hardest entry to spoof.
            if let Some(forwarded) = headers.get("X-Forwarded-For") {
                if let Ok(forwarded_str) = forwarded.to_str() {
                    if let Some(ip_str) = forwarded_str.split(',').next_back() {
                        let ip_str = ip_str.trim();
                        if ip_str.parse::<IpAddr>().is_ok() {
                            return ip_str.to_string();
                        }
                    }
                }
            }
        }

        return direct.to_string();
    }

    tracing::warn!("No direct connection IP available for request");
    "unknown".to_string()
}

fn direct_ip_from_parts(parts: &Parts) -> Option<IpAddr> {
    parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
}

/// Request context containing metadata about the current request
///
/// Used for audit logging of authentication attempts and token operations.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Client IP address (connection or validated X-Forwarded-For)
    pub ip_address: String,

    /// User-Agent string from the request headers
    pub user_agent: String,
}

impl RequestContext {
    /// Create a new request context from request parts
    pub fn from_parts(parts: &Parts, trusted_proxies: &[IpAddr]) -> Self {
        let direct_ip = direct_ip_from_parts(parts);
        let ip_address = extract_client_ip(&parts.headers, direct_ip, trusted_proxies);

        let user_agent = parts
            .headers
            .get("User-Agent")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();

        Self {
            ip_address,
            user_agent,
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for RequestContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(RequestContext::from_parts(
            parts,
            &state.config.trusted_proxies,
        ))
    }
}
