//! HTTP client a relying property uses to talk to the broker.
//!
//! Covers the two cross-process calls in the protocol: redeeming an
//! exchange token, and asking the broker to mint one for an identity the
//! relying property already trusts from its own session. Both carry a
//! finite timeout; network failure maps to a retryable error, never to an
//! authenticated state.

use std::time::Duration;

use bridge_auth_identity_core::Identity;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::errors::{AuthFlowError, Result};

/// Timeout for broker round trips.
const BROKER_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    token: &'a str,
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    user: Option<Identity>,
}

#[derive(Debug, Serialize)]
struct GenerateFromUserRequest<'a> {
    user: &'a Identity,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct BrokerErrorBody {
    error: Option<BrokerErrorDetails>,
}

#[derive(Debug, Deserialize)]
struct BrokerErrorDetails {
    code: Option<String>,
    message: Option<String>,
}

/// Client for the broker's SSO endpoints.
#[derive(Clone)]
pub struct BrokerClient {
    base_url: Url,
    http_client: Client,
}

impl BrokerClient {
    pub fn new(base_url: Url) -> Self {
        let http_client = Client::builder()
            .timeout(BROKER_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url,
            http_client,
        }
    }

    /// Redeem an exchange token at the broker.
    pub async fn verify_token(&self, token: &str) -> Result<Identity> {
        let url = self.endpoint("/auth/sso/verify")?;
        let response = self
            .http_client
            .post(url)
            .json(&VerifyRequest { token })
            .send()
            .await
            .map_err(|e| AuthFlowError::BrokerUnavailable(format!("verify failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let (code, message) = read_error_details(response).await;
            warn!(status = %status, code = %code, "Broker rejected token verification");
            return Err(AuthFlowError::BrokerRejected {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let body: VerifyResponse = response
            .json()
            .await
            .map_err(|e| AuthFlowError::BrokerUnavailable(format!("bad verify response: {}", e)))?;

        match (body.success, body.user) {
            (true, Some(user)) => Ok(user),
            _ => Err(AuthFlowError::BrokerRejected {
                status: status.as_u16(),
                code: "INVALID_RESPONSE".to_string(),
                message: "verification response missing user".to_string(),
            }),
        }
    }

    /// Ask the broker to mint a token for an identity this property trusts.
    pub async fn generate_from_user(&self, user: &Identity) -> Result<String> {
        let url = self.endpoint("/auth/sso/generate-from-user")?;
        let response = self
            .http_client
            .post(url)
            .json(&GenerateFromUserRequest { user })
            .send()
            .await
            .map_err(|e| AuthFlowError::BrokerUnavailable(format!("generate failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let (code, message) = read_error_details(response).await;
            return Err(AuthFlowError::BrokerRejected {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            AuthFlowError::BrokerUnavailable(format!("bad generate response: {}", e))
        })?;

        Ok(body.token)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| AuthFlowError::ConfigInvalid(format!("bad broker URL: {}", e)))
    }
}

async fn read_error_details(response: reqwest::Response) -> (String, String) {
    match response.json::<BrokerErrorBody>().await {
        Ok(BrokerErrorBody { error: Some(details) }) => (
            details.code.unwrap_or_else(|| "UNKNOWN".to_string()),
            details
                .message
                .unwrap_or_else(|| "unknown broker error".to_string()),
        ),
        _ => (
            "UNKNOWN".to_string(),
            "unknown broker error".to_string(),
        ),
    }
}
