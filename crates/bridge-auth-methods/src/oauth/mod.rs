//! OAuth 2.0 provider integration.
//!
//! The broker delegates user authentication to an external identity
//! provider over the standard authorization-code flow. Only the verified
//! profile survives the exchange; provider tokens are discarded.

pub mod client;
pub mod config;
pub mod types;

pub use client::OAuthClient;
pub use config::OAuthConfig;
pub use types::{OAuthTokenResponse, OAuthUserInfo};
