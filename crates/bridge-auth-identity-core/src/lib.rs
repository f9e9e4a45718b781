//! # bridge-auth-identity-core
//!
//! Identity principal types shared across the bridge-auth subsystems.
//!
//! The broker treats identities as opaque beyond structural validation:
//! an identity must carry a stable identifier and an email-shaped address
//! before it can be bound into an exchange token. Ownership stays with
//! whichever property last authenticated the user; tokens hold a snapshot
//! by value.

#![warn(clippy::all)]

pub mod errors;
pub mod types;

pub use errors::{IdentityError, Result};
pub use types::Identity;
