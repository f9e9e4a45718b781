//! Exchange token type definitions.

use bridge_auth_identity_core::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed token lifetime: five minutes from issuance.
pub const TOKEN_TTL_SECS: i64 = 5 * 60;

/// A stored exchange token binding an identity snapshot to a deadline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExchangeToken {
    /// Unguessable token value (256 bits of entropy, URL-safe base64).
    pub token: String,

    /// Identity snapshot taken at issuance. Copied by value, never shared.
    pub identity: Identity,

    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,

    /// Set exactly once, in the same locked step that removes the entry.
    pub consumed: bool,
}

impl ExchangeToken {
    /// Whether the deadline has passed at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Issuance result returned to callers of the issuer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
