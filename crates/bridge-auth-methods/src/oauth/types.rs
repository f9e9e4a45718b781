//! OAuth wire types.

use bridge_auth_identity_core::Identity;
use serde::{Deserialize, Serialize};

/// Token endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Normalized user profile from the provider's userinfo endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthUserInfo {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub picture: Option<String>,
}

impl OAuthUserInfo {
    /// Convert into an identity. The provider must have disclosed an email;
    /// a profile without one cannot participate in the handoff protocol.
    pub fn into_identity(self) -> Option<Identity> {
        let email = self.email?;
        Some(Identity {
            id: self.id,
            email,
            name: self.name,
            picture: self.picture,
        })
    }
}
