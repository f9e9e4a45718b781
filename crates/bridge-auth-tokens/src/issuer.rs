//! Token issuance paths.

use std::sync::Arc;

use bridge_auth_identity_core::Identity;
use tracing::info;

use crate::errors::Result;
use crate::store::ExchangeTokenStore;
use crate::types::IssuedToken;

/// Mints exchange tokens against the shared store.
///
/// Two issuance paths exist. `issue_for_session` is used when the broker
/// itself authenticated the user and the HTTP layer has already resolved a
/// live session. `issue_for_asserted` is used by relying properties that
/// vouch for an identity obtained from their own session; the broker
/// validates structure only. The asserted path widens the attack surface
/// relative to the session path: any caller that can reach the endpoint can
/// mint tokens for an arbitrary well-formed identity, so deployments must
/// restrict it to known relying parties at the network layer.
#[derive(Clone)]
pub struct TokenIssuer {
    store: Arc<ExchangeTokenStore>,
}

impl TokenIssuer {
    pub fn new(store: Arc<ExchangeTokenStore>) -> Self {
        Self { store }
    }

    /// Mint a token for the identity bound to the caller's own session.
    pub async fn issue_for_session(&self, identity: &Identity) -> IssuedToken {
        let issued = self.store.issue(identity.clone()).await;
        info!(user = %identity.email, "Exchange token issued for local session");
        issued
    }

    /// Mint a token for an identity asserted by a trusted relying property.
    ///
    /// Fails with [`crate::TokenError::MalformedIdentity`] when the asserted
    /// identity is structurally invalid.
    pub async fn issue_for_asserted(&self, identity: Identity) -> Result<IssuedToken> {
        identity.validate()?;
        let email = identity.email.clone();
        let issued = self.store.issue(identity).await;
        info!(user = %email, "Exchange token issued for asserted identity");
        Ok(issued)
    }
}
