//! Identity validation error types.

use thiserror::Error;

/// Errors raised by structural identity validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// Identifier is missing or empty
    #[error("Identity is missing an identifier")]
    MissingId,

    /// Email field is missing or empty
    #[error("Identity is missing an email address")]
    MissingEmail,

    /// Email field does not look like an address
    #[error("Identity email is not an email address: {0}")]
    InvalidEmail(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;
