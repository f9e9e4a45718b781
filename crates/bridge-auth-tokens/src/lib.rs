//! # bridge-auth-tokens
//!
//! Exchange token subsystem: the in-memory single-use token registry, the
//! issuer that mints tokens for authenticated or asserted identities, and
//! the background expiry sweep.
//!
//! A token is redeemable iff it has not been consumed and its deadline has
//! not passed. Redemption and expiry are mutually exclusive terminal
//! transitions: whichever happens first removes the entry and the other
//! becomes a no-op. Expiry is enforced on every `consume`; the sweep task
//! is an eviction optimization, never a correctness mechanism.

#![warn(clippy::all)]

pub mod errors;
pub mod issuer;
pub mod store;
pub mod sweep;
pub mod types;


pub use errors::{Result, TokenError};
pub use issuer::TokenIssuer;
pub use store::ExchangeTokenStore;
pub use sweep::{spawn_sweep_task, DEFAULT_SWEEP_INTERVAL_SECS};
pub use types::{ExchangeToken, IssuedToken, TOKEN_TTL_SECS};
