use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bridge_auth_methods::AuthFlowError;
use bridge_auth_tokens::TokenError;
use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Malformed identity: {0}")]
    MalformedIdentity(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Not authenticated".to_string(),
            ),
            ApiError::MissingInput(field) => (
                StatusCode::BAD_REQUEST,
                "MISSING_INPUT",
                format!("Missing required input: {}", field),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or unknown token".to_string(),
            ),
            ApiError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "EXPIRED_TOKEN",
                "Token expired".to_string(),
            ),
            ApiError::MalformedIdentity(msg) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_IDENTITY", msg)
            }
            ApiError::Upstream(msg) => {
                tracing::warn!("Upstream failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_FAILURE",
                    "Upstream service unavailable, retry later".to_string(),
                )
            }
            ApiError::Internal(err) => {
                tracing::error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::NotFound => ApiError::InvalidToken,
            TokenError::Expired => ApiError::ExpiredToken,
            TokenError::MalformedIdentity(e) => ApiError::MalformedIdentity(e.to_string()),
        }
    }
}

impl From<AuthFlowError> for ApiError {
    fn from(error: AuthFlowError) -> Self {
        match error {
            AuthFlowError::ConfigInvalid(msg) => ApiError::Internal(anyhow::anyhow!(msg)),
            AuthFlowError::ProviderUnavailable(msg)
            | AuthFlowError::ProviderRejected(msg)
            | AuthFlowError::BrokerUnavailable(msg) => ApiError::Upstream(msg),
            // The broker already classified the failure; carry its verdict
            // through so a relying property answers like the broker would.
            AuthFlowError::BrokerRejected {
                code,
                message,
                status,
            } => match code.as_str() {
                "INVALID_TOKEN" => ApiError::InvalidToken,
                "EXPIRED_TOKEN" => ApiError::ExpiredToken,
                "MISSING_INPUT" => ApiError::MissingInput("token".to_string()),
                "MALFORMED_IDENTITY" => ApiError::MalformedIdentity(message),
                "UNAUTHENTICATED" => ApiError::Unauthenticated,
                _ => ApiError::Upstream(format!("broker answered {}: {}", status, message)),
            },
        }
    }
}
