//! Identity type definitions.

use serde::{Deserialize, Serialize};

use crate::errors::{IdentityError, Result};

/// An authenticated principal.
///
/// Produced by the identity provider on the broker, or asserted by a
/// trusted relying property. The broker validates structure only: `id`
/// must be present and `email` must be email-shaped. `name` and `picture`
/// are display metadata and may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl Identity {
    /// Build an identity from its required fields.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: None,
            picture: None,
        }
    }

    /// Structural validation: identifier plus an email-shaped address.
    ///
    /// This is deliberately shallow. The broker does not re-authenticate
    /// asserted identities; trust in the asserting caller is established
    /// out of band.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(IdentityError::MissingId);
        }
        if self.email.trim().is_empty() {
            return Err(IdentityError::MissingEmail);
        }
        if !is_email_shaped(&self.email) {
            return Err(IdentityError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

/// Minimal email shape check: one `@` with non-empty local and domain parts.
fn is_email_shaped(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
