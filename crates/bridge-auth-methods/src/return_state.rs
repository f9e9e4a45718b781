//! Return-state codec.
//!
//! The post-login destination rides through the identity provider's
//! redirect as an opaque `state` query parameter: JSON wrapped in URL-safe
//! base64. The blob crosses a third party and lands in browser history, so
//! it must never carry secrets; it is merely a "where to come back to"
//! marker. Allow-list validation of the decoded URL is the caller's job,
//! never the codec's.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct ReturnState {
    #[serde(rename = "returnUrl")]
    return_url: String,
}

/// Encode a return destination for transport through the provider redirect.
pub fn encode(return_url: &str) -> String {
    let state = ReturnState {
        return_url: return_url.to_string(),
    };
    // Serializing a single-string struct cannot fail.
    let json = serde_json::to_vec(&state).unwrap_or_default();
    URL_SAFE_NO_PAD.encode(json)
}

/// Decode a state blob back into the return destination.
///
/// Providers may drop, truncate, or mangle the state parameter; any
/// malformed input decodes to `None` so the callback handler can fall back
/// to the default landing page instead of failing the login.
pub fn decode(blob: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(blob.trim()).ok()?;
    let state: ReturnState = serde_json::from_slice(&bytes).ok()?;
    Some(state.return_url)
}
