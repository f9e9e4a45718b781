//! In-memory exchange token registry.
//!
//! Single-use semantics: `consume` looks up, deadline-checks, and removes
//! the entry under one lock acquisition, so two concurrent redemptions of
//! the same token yield exactly one success. Expired entries are removed
//! either at `consume` time or by [`crate::sweep::spawn_sweep_task`],
//! whichever runs first.

use std::collections::HashMap;

use bridge_auth_identity_core::Identity;
use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::errors::{Result, TokenError};
use crate::types::{ExchangeToken, IssuedToken, TOKEN_TTL_SECS};

/// Registry mapping token values to pending exchange tokens.
pub struct ExchangeTokenStore {
    entries: Mutex<HashMap<String, ExchangeToken>>,
    ttl: Duration,
}

impl ExchangeTokenStore {
    /// Create a store with the standard five-minute TTL.
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        }
    }

    /// Mint and store a token for the given identity snapshot.
    pub async fn issue(&self, identity: Identity) -> IssuedToken {
        let token = generate_token();
        let now = Utc::now();
        let entry = ExchangeToken {
            token: token.clone(),
            identity,
            issued_at: now,
            expires_at: now + self.ttl,
            consumed: false,
        };

        let issued = IssuedToken {
            token: token.clone(),
            issued_at: entry.issued_at,
            expires_at: entry.expires_at,
        };

        let mut entries = self.entries.lock().await;
        entries.insert(token, entry);
        debug!(pending = entries.len(), "Exchange token issued");

        issued
    }

    /// Redeem a token, removing it from the registry.
    ///
    /// The deadline is re-checked here regardless of the sweep task, so a
    /// delayed sweep can never extend a token's validity window. An expired
    /// entry is removed on the spot and reported as [`TokenError::Expired`];
    /// an unknown or already-consumed token is [`TokenError::NotFound`].
    pub async fn consume(&self, token: &str) -> Result<Identity> {
        let now = Utc::now();
        let mut entries = self.entries.lock().await;

        let entry = entries.get(token).ok_or(TokenError::NotFound)?;
        if entry.is_expired_at(now) {
            entries.remove(token);
            return Err(TokenError::Expired);
        }

        // Still valid: mark consumed and remove in the same locked step.
        let mut entry = entries.remove(token).ok_or(TokenError::NotFound)?;
        entry.consumed = true;
        Ok(entry.identity)
    }

    /// Remove all expired entries. Returns the number evicted.
    pub async fn sweep(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.lock().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Number of pending (unredeemed, unswept) tokens.
    pub async fn pending_count(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for ExchangeTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a token with 256 bits of entropy, URL-safe base64 encoded.
fn generate_token() -> String {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
    use rand::RngCore;

    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
impl ExchangeTokenStore {
    /// Rewrite a pending token's deadline. Test hook for expiry behavior.
    pub(crate) async fn force_expires_at(&self, token: &str, expires_at: chrono::DateTime<Utc>) {
        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get_mut(token) {
            entry.expires_at = expires_at;
        }
    }
}
