//! Generic OAuth client for provider interactions.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::errors::{AuthFlowError, Result};
use crate::oauth::config::OAuthConfig;
use crate::oauth::types::{OAuthTokenResponse, OAuthUserInfo};

/// Timeout applied to every provider round trip. A hung provider maps to a
/// retryable upstream error, never to an authenticated state.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth client for provider interactions
pub struct OAuthClient {
    http_client: Client,
}

impl OAuthClient {
    /// Create a new OAuth client
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(PROVIDER_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self { http_client }
    }

    /// Build authorization URL carrying the encoded return state.
    pub fn build_auth_url(&self, config: &OAuthConfig, state: &str) -> Result<String> {
        let mut url = Url::parse(&config.auth_url)
            .map_err(|e| AuthFlowError::ConfigInvalid(format!("Invalid auth URL: {}", e)))?;

        url.query_pairs_mut()
            .append_pair("client_id", &config.client_id)
            .append_pair("redirect_uri", &config.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", &config.scopes.join(" "))
            .append_pair("state", state);

        Ok(url.to_string())
    }

    /// Exchange authorization code for access token
    pub async fn exchange_code(
        &self,
        config: &OAuthConfig,
        code: &str,
    ) -> Result<OAuthTokenResponse> {
        let mut params = HashMap::new();
        params.insert("grant_type", "authorization_code");
        params.insert("code", code);
        params.insert("redirect_uri", &config.redirect_uri);
        params.insert("client_id", &config.client_id);
        params.insert("client_secret", &config.client_secret);

        let response = self
            .http_client
            .post(&config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AuthFlowError::ProviderUnavailable(format!("Token exchange failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthFlowError::ProviderRejected(format!(
                "Token exchange failed with status {}: {}",
                status, body
            )));
        }

        let token_response: OAuthTokenResponse = response.json().await.map_err(|e| {
            AuthFlowError::ProviderRejected(format!("Failed to parse token response: {}", e))
        })?;

        Ok(token_response)
    }

    /// Get user info from provider
    pub async fn get_user_info(
        &self,
        config: &OAuthConfig,
        access_token: &str,
    ) -> Result<OAuthUserInfo> {
        let response = self
            .http_client
            .get(&config.user_info_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| {
                AuthFlowError::ProviderUnavailable(format!("User info request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AuthFlowError::ProviderRejected(format!(
                "User info request failed with status {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            AuthFlowError::ProviderRejected(format!("Failed to parse user info: {}", e))
        })?;

        // Google answers with `id` on the v2 userinfo endpoint and `sub`
        // in OIDC-shaped responses.
        let user_info = OAuthUserInfo {
            id: json["id"]
                .as_str()
                .or_else(|| json["sub"].as_str())
                .ok_or_else(|| AuthFlowError::ProviderRejected("Missing user ID".to_string()))?
                .to_string(),
            email: json["email"].as_str().map(|s| s.to_string()),
            name: json["name"].as_str().map(|s| s.to_string()),
            picture: json["picture"].as_str().map(|s| s.to_string()),
        };

        Ok(user_info)
    }
}

impl Default for OAuthClient {
    fn default() -> Self {
        Self::new()
    }
}
