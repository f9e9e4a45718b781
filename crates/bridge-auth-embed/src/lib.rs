//! # bridge-auth-embed
//!
//! The embed handshake protocol: how a parent page learns the
//! authentication state of a cross-origin frame it embeds, so it can
//! replace a stuck or unauthenticated view with a usable fallback.
//!
//! This crate is the protocol itself, free of any browser runtime: the
//! message schema the embedded document posts, and the parent-side state
//! machine that filters messages by origin, tracks the handshake timeout,
//! and emits UI actions. Frontend glue feeds `postMessage` events and timer
//! expiry into [`ParentHandshake`] and applies the returned actions.
//!
//! Trust is allow-listed in both directions: the child addresses one named
//! parent origin (never a wildcard), and the parent ignores any message
//! whose sender origin or site identifier does not match what it embedded.

#![warn(clippy::all)]

pub mod message;
pub mod parent;

pub use message::{EmbedMessage, StatusReporter};
pub use parent::{HandshakeOutcome, ParentHandshake, UiAction, HANDSHAKE_TIMEOUT};
