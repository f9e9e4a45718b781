//! # bridge-auth-methods
//!
//! Federated login plumbing for the handoff broker:
//! - Generic OAuth 2.0 client and provider configuration (Google)
//! - Return-state codec carrying the post-login destination through the
//!   provider redirect
//! - Redirect origin allow-list
//! - The handoff decision taken after a successful provider callback
//! - HTTP client used by relying properties to talk to the broker
//!
//! # Security Note
//! Provider access tokens are never persisted; only the profile fields
//! needed to build an [`bridge_auth_identity_core::Identity`] survive the
//! callback. The return-state blob carries no secrets: it traverses a
//! third party and lands in browser history.

#![warn(clippy::all)]

pub mod allowlist;
pub mod broker_client;
pub mod errors;
pub mod handoff;
pub mod oauth;
pub mod return_state;

pub use allowlist::RedirectAllowList;
pub use broker_client::BrokerClient;
pub use errors::{AuthFlowError, Result};
pub use handoff::{resolve_handoff, HandoffDecision, REDEMPTION_PATH};
pub use oauth::{OAuthClient, OAuthConfig, OAuthTokenResponse, OAuthUserInfo};
