//! Post-login handoff decision.
//!
//! After the provider callback authenticates the user on the broker, the
//! decoded return state decides where the browser goes next: stay on the
//! broker, bounce to an allowed same-origin destination, or carry the
//! session to a sibling property through its redemption endpoint with a
//! freshly minted exchange token.

use url::{Origin, Url};

use crate::allowlist::RedirectAllowList;

/// Path every cooperating property serves its token redemption flow on.
pub const REDEMPTION_PATH: &str = "/sso-login";

/// Where the browser is sent after a successful provider callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandoffDecision {
    /// No usable destination: land on the broker's default page.
    DefaultLanding,

    /// Destination is the broker's own origin: redirect as-is, no token.
    SameSite(Url),

    /// Cross-site destination: redirect to its redemption endpoint with an
    /// exchange token appended (see [`append_token`]).
    CrossSite(Url),
}

/// Resolve the handoff for a decoded (but not yet validated) return state.
///
/// `decoded_state` is the codec output: `None` when the provider dropped or
/// mangled the state blob. Validation failures never fail the login; they
/// degrade to [`HandoffDecision::DefaultLanding`].
pub fn resolve_handoff(
    decoded_state: Option<&str>,
    allowlist: &RedirectAllowList,
    broker_origin: &Origin,
) -> HandoffDecision {
    let Some(raw) = decoded_state else {
        return HandoffDecision::DefaultLanding;
    };

    let Some(target) = allowlist.allowed_url(raw) else {
        return HandoffDecision::DefaultLanding;
    };

    if target.origin() == *broker_origin {
        return HandoffDecision::SameSite(target);
    }

    HandoffDecision::CrossSite(redemption_url(&target))
}

/// Normalize a cross-site destination onto its redemption endpoint.
///
/// A destination already pointing at `/sso-login` keeps its path and query
/// parameters; anything else collapses to `<origin>/sso-login`.
fn redemption_url(target: &Url) -> Url {
    if target.path().ends_with(REDEMPTION_PATH) {
        return target.clone();
    }

    let mut url = target.clone();
    url.set_path(REDEMPTION_PATH);
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Append the minted token as a query parameter.
pub fn append_token(url: &Url, token: &str) -> Url {
    let mut url = url.clone();
    url.query_pairs_mut().append_pair("token", token);
    url
}
