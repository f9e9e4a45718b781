use std::sync::Arc;

use anyhow::Result;
use bridge_auth_methods::{BrokerClient, OAuthClient, OAuthConfig, RedirectAllowList};
use bridge_auth_tokens::{ExchangeTokenStore, TokenIssuer};

use crate::config::{Config, Role};
use crate::session::SessionStore;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub tokens: Arc<ExchangeTokenStore>,
    pub issuer: TokenIssuer,
    pub allowlist: RedirectAllowList,
    pub oauth_client: OAuthClient,
    /// Provider configuration; present in the broker role
    pub oauth_config: Option<OAuthConfig>,
    /// Broker client; present in the relying role
    pub broker: Option<BrokerClient>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let sessions = Arc::new(SessionStore::new(config.session_ttl_secs));

        let tokens = Arc::new(ExchangeTokenStore::new());
        let issuer = TokenIssuer::new(Arc::clone(&tokens));

        let allowlist = RedirectAllowList::from_origins(&config.allowed_origins);
        if allowlist.is_empty() {
            tracing::warn!("Redirect allow-list is empty; all cross-site handoffs will fall back");
        }

        let oauth_config = config.provider.as_ref().map(|p| {
            OAuthConfig::google(
                p.client_id.clone(),
                p.client_secret.clone(),
                p.redirect_uri.clone(),
            )
        });

        if config.role == Role::Broker && oauth_config.is_none() {
            anyhow::bail!("Broker role requires identity provider settings");
        }

        let broker = match (&config.role, &config.broker_url) {
            (Role::Relying, Some(url)) => Some(BrokerClient::new(url.clone())),
            (Role::Relying, None) => anyhow::bail!("Relying role requires a broker URL"),
            _ => None,
        };

        Ok(AppState {
            config,
            sessions,
            tokens,
            issuer,
            allowlist,
            oauth_client: OAuthClient::new(),
            oauth_config,
            broker,
        })
    }
}
