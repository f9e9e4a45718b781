//! Cookie-keyed local sessions.
//!
//! Each property keeps its own sessions; nothing is shared across sites,
//! which is why the exchange-token handoff exists at all. The store is
//! in-memory with lazy expiry on read; the identity inside a session is a
//! fixed-schema snapshot, validated where it enters the system, never a
//! dynamic serialize/deserialize hook.

pub mod cookie;
pub mod store;
pub mod types;

pub use cookie::{
    clear_session_cookie, create_session_cookie, extract_session_cookie, SESSION_COOKIE_NAME,
};
pub use store::SessionStore;
pub use types::{Session, SessionId};
