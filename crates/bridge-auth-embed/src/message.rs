//! Handshake message schema and the child-side reporter.

use serde::{Deserialize, Serialize};

/// Messages exchanged over the cross-origin channel.
///
/// Serializes to the wire shape
/// `{"type": "EMBED_AUTH_STATUS", "site": "...", "authenticated": bool}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EmbedMessage {
    /// Authentication status of the embedded document, posted after each
    /// status check.
    #[serde(rename = "EMBED_AUTH_STATUS")]
    AuthStatus { site: String, authenticated: bool },
}

impl EmbedMessage {
    /// Parse a raw message payload. Unknown shapes yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// A status message addressed to exactly one parent origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundStatus {
    pub message: EmbedMessage,
    /// The only origin the message may be delivered to. The frontend glue
    /// passes this as the `targetOrigin` argument of `postMessage`.
    pub target_origin: String,
}

/// Child-side half of the handshake.
///
/// Bound to a single named parent origin at construction; there is no
/// wildcard path. Broadcasting authentication state to an unverified
/// origin would hand it to any page that managed to embed the frame.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    site: String,
    parent_origin: String,
}

impl StatusReporter {
    pub fn new(site: impl Into<String>, parent_origin: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            parent_origin: parent_origin.into(),
        }
    }

    /// Build the status message for the current authentication check.
    pub fn status(&self, authenticated: bool) -> OutboundStatus {
        OutboundStatus {
            message: EmbedMessage::AuthStatus {
                site: self.site.clone(),
                authenticated,
            },
            target_origin: self.parent_origin.clone(),
        }
    }
}
