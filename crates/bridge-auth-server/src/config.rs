use std::net::{IpAddr, SocketAddr};

use anyhow::Result;
use url::Url;

/// Which half of the handoff protocol this instance serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The central identity broker: provider login, token mint and redeem.
    Broker,
    /// A sibling property: local sessions, broker-backed redemption.
    Relying,
}

/// Identity provider credentials (broker role only).
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub role: Role,

    /// Address to bind the server to
    pub bind_address: SocketAddr,

    /// This property's externally visible origin (scheme://host:port)
    pub public_origin: Url,

    /// Origins allowed as redirect targets and CORS callers
    pub allowed_origins: Vec<String>,

    /// Where flows land when no (valid) return destination exists
    pub default_landing: String,

    /// Where failed logins and failed redemptions land
    pub login_failure_path: String,

    /// Local session lifetime (seconds)
    pub session_ttl_secs: u64,

    /// Whether session cookies carry the Secure flag
    pub cookie_secure: bool,

    /// Token sweep interval (seconds, broker role)
    pub sweep_interval_secs: u64,

    /// Identity provider settings; required for the broker role
    pub provider: Option<ProviderSettings>,

    /// Broker base URL; required for the relying role
    pub broker_url: Option<Url>,

    /// Proxies whose X-Forwarded-For is trusted
    pub trusted_proxies: Vec<IpAddr>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let role = match std::env::var("ROLE")
            .unwrap_or_else(|_| "broker".to_string())
            .to_lowercase()
            .as_str()
        {
            "broker" => Role::Broker,
            "relying" => Role::Relying,
            other => anyhow::bail!("ROLE must be 'broker' or 'relying', got '{}'", other),
        };

        let bind_address = std::env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| "127.0.0.1:3002".to_string())
            .parse()?;

        let public_origin: Url = std::env::var("PUBLIC_ORIGIN")
            .unwrap_or_else(|_| "http://localhost:3002".to_string())
            .parse()?;

        let mut allowed_origins: Vec<String> = std::env::var("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .collect();

        // The property may always redirect back to itself.
        let own_origin = public_origin.origin().ascii_serialization();
        if !allowed_origins.contains(&own_origin) {
            allowed_origins.push(own_origin);
        }

        let default_landing =
            std::env::var("DEFAULT_LANDING").unwrap_or_else(|_| "/".to_string());

        let login_failure_path =
            std::env::var("LOGIN_FAILURE_PATH").unwrap_or_else(|_| "/login".to_string());

        let session_ttl_secs = std::env::var("SESSION_TTL_SECS")
            .unwrap_or_else(|_| "86400".to_string()) // 24 hours
            .parse()?;

        let cookie_secure = std::env::var("COOKIE_SECURE")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let sweep_interval_secs = std::env::var("TOKEN_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()?;

        let provider = match role {
            Role::Broker => {
                let client_id = std::env::var("GOOGLE_CLIENT_ID")
                    .map_err(|_| anyhow::anyhow!("GOOGLE_CLIENT_ID required for broker role"))?;
                let client_secret = std::env::var("GOOGLE_CLIENT_SECRET").map_err(|_| {
                    anyhow::anyhow!("GOOGLE_CLIENT_SECRET required for broker role")
                })?;
                let redirect_uri = std::env::var("OAUTH_CALLBACK_URL").unwrap_or_else(|_| {
                    format!(
                        "{}/auth/provider/callback",
                        public_origin.as_str().trim_end_matches('/')
                    )
                });
                Some(ProviderSettings {
                    client_id,
                    client_secret,
                    redirect_uri,
                })
            }
            Role::Relying => None,
        };

        let broker_url = match role {
            Role::Relying => {
                let raw = std::env::var("SSO_SERVICE_URL")
                    .map_err(|_| anyhow::anyhow!("SSO_SERVICE_URL required for relying role"))?;
                Some(raw.parse()?)
            }
            Role::Broker => None,
        };

        let trusted_proxies = std::env::var("TRUSTED_PROXIES")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.parse())
            .collect::<std::result::Result<Vec<IpAddr>, _>>()?;

        Ok(Config {
            role,
            bind_address,
            public_origin,
            allowed_origins,
            default_landing,
            login_failure_path,
            session_ttl_secs,
            cookie_secure,
            sweep_interval_secs,
            provider,
            broker_url,
            trusted_proxies,
        })
    }
}
