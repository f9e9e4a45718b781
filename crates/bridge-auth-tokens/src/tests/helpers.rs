//! Shared fixtures for token subsystem tests.

use bridge_auth_identity_core::Identity;

pub fn test_identity() -> Identity {
    Identity {
        id: "108234567890".to_string(),
        email: "ada@example.com".to_string(),
        name: Some("Ada Lovelace".to_string()),
        picture: None,
    }
}
