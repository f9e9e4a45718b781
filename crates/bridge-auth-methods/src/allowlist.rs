//! Redirect origin allow-list.
//!
//! A decoded return destination is only honored if it is an http(s) URL
//! whose origin is one of the configured cooperating sites. Everything else
//! is discarded and the flow lands on the default page, closing the
//! open-redirect hole an unchecked `returnUrl` would create.

use url::{Origin, Url};

/// Configured set of origins allowed as post-login redirect targets.
#[derive(Debug, Clone)]
pub struct RedirectAllowList {
    origins: Vec<Origin>,
}

impl RedirectAllowList {
    /// Build from origin strings (e.g. `http://localhost:3001`).
    /// Entries that do not parse as URLs are skipped.
    pub fn from_origins<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let origins = origins
            .into_iter()
            .filter_map(|raw| Url::parse(raw.as_ref()).ok())
            .map(|url| url.origin())
            .collect();
        Self { origins }
    }

    /// Whether the URL's origin is on the list.
    pub fn is_allowed(&self, url: &Url) -> bool {
        self.origins.contains(&url.origin())
    }

    /// Parse a raw destination and admit it only if it is an http(s) URL
    /// with an allowed origin.
    pub fn allowed_url(&self, raw: &str) -> Option<Url> {
        let url = Url::parse(raw).ok()?;
        if !matches!(url.scheme(), "http" | "https") {
            return None;
        }
        if !self.is_allowed(&url) {
            return None;
        }
        Some(url)
    }

    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist() -> RedirectAllowList {
        RedirectAllowList::from_origins(["http://localhost:3000", "https://site-b.example.com"])
    }

    #[test]
    fn test_allowed_origin_admitted() {
        let url = allowlist()
            .allowed_url("https://site-b.example.com/sso-login?x=1")
            .unwrap();
        assert_eq!(url.path(), "/sso-login");
    }

    #[test]
    fn test_unlisted_origin_rejected() {
        assert!(allowlist().allowed_url("https://evil.example.com/").is_none());
    }

    #[test]
    fn test_port_is_part_of_origin() {
        assert!(allowlist().allowed_url("http://localhost:3000/a").is_some());
        assert!(allowlist().allowed_url("http://localhost:3999/a").is_none());
    }

    #[test]
    fn test_scheme_mismatch_rejected() {
        assert!(allowlist().allowed_url("http://site-b.example.com/").is_none());
    }

    #[test]
    fn test_non_http_schemes_rejected() {
        assert!(allowlist().allowed_url("javascript:alert(1)").is_none());
        assert!(allowlist().allowed_url("file:///etc/passwd").is_none());
    }

    #[test]
    fn test_unparsable_input_rejected() {
        assert!(allowlist().allowed_url("not a url").is_none());
        assert!(allowlist().allowed_url("").is_none());
    }

    #[test]
    fn test_bad_config_entries_skipped() {
        let list = RedirectAllowList::from_origins(["%%%", "http://localhost:3000"]);
        assert!(list.allowed_url("http://localhost:3000/").is_some());
    }
}
