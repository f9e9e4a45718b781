//! Exchange token error types.

use bridge_auth_identity_core::IdentityError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    /// Token was never issued, already consumed, or already swept
    #[error("Token not found")]
    NotFound,

    /// Token exists but its deadline has passed
    #[error("Token expired")]
    Expired,

    /// Asserted identity failed structural validation
    #[error("Malformed identity: {0}")]
    MalformedIdentity(#[from] IdentityError),
}

pub type Result<T> = std::result::Result<T, TokenError>;
