//! Token issuer tests.

use std::sync::Arc;

use bridge_auth_identity_core::{Identity, IdentityError};

use super::helpers::test_identity;
use crate::{ExchangeTokenStore, TokenError, TokenIssuer};

fn issuer_with_store() -> (TokenIssuer, Arc<ExchangeTokenStore>) {
    let store = Arc::new(ExchangeTokenStore::new());
    (TokenIssuer::new(Arc::clone(&store)), store)
}

#[tokio::test]
async fn test_issue_for_session_mints_redeemable_token() {
    let (issuer, store) = issuer_with_store();

    let issued = issuer.issue_for_session(&test_identity()).await;
    let identity = store.consume(&issued.token).await.unwrap();
    assert_eq!(identity.id, "108234567890");
}

#[tokio::test]
async fn test_issue_for_asserted_validates_structure() {
    let (issuer, _store) = issuer_with_store();

    let result = issuer
        .issue_for_asserted(Identity::new("", "ada@example.com"))
        .await;
    assert!(matches!(
        result,
        Err(TokenError::MalformedIdentity(IdentityError::MissingId))
    ));

    let result = issuer
        .issue_for_asserted(Identity::new("42", "not-an-email"))
        .await;
    assert!(matches!(
        result,
        Err(TokenError::MalformedIdentity(IdentityError::InvalidEmail(_)))
    ));
}

#[tokio::test]
async fn test_issue_for_asserted_snapshot_round_trips() {
    let (issuer, store) = issuer_with_store();

    let asserted = Identity {
        id: "rp-user-7".to_string(),
        email: "grace@example.com".to_string(),
        name: Some("Grace Hopper".to_string()),
        picture: Some("https://example.com/grace.png".to_string()),
    };

    let issued = issuer.issue_for_asserted(asserted.clone()).await.unwrap();
    let redeemed = store.consume(&issued.token).await.unwrap();
    assert_eq!(redeemed, asserted);
}
