//! Login and handoff flow error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// Provider or broker configuration is unusable
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    /// Provider could not be reached or timed out (retryable)
    #[error("Provider request failed: {0}")]
    ProviderUnavailable(String),

    /// Provider answered but refused or returned an unusable payload
    #[error("Provider rejected the request: {0}")]
    ProviderRejected(String),

    /// Broker could not be reached or timed out (retryable)
    #[error("Broker request failed: {0}")]
    BrokerUnavailable(String),

    /// Broker answered with a client-facing error
    #[error("Broker rejected the request: status {status}, code {code}: {message}")]
    BrokerRejected {
        status: u16,
        code: String,
        message: String,
    },
}

impl AuthFlowError {
    /// Whether a retry of the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AuthFlowError::ProviderUnavailable(_) | AuthFlowError::BrokerUnavailable(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, AuthFlowError>;
