//! Session cookie handling.
//!
//! `HttpOnly` always; `SameSite=Lax` so the cookie survives the top-level
//! redirects the handoff protocol is built on; `Secure` when configured.

use axum::http::HeaderMap;

use super::types::SessionId;

/// Cookie name for local sessions.
pub const SESSION_COOKIE_NAME: &str = "bridge_auth_session";

/// Build the Set-Cookie value for a fresh session.
#[must_use]
pub fn create_session_cookie(session_id: SessionId, max_age_secs: u64, secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!(
        "{SESSION_COOKIE_NAME}={}; HttpOnly{secure_flag}; SameSite=Lax; Path=/; Max-Age={max_age_secs}",
        session_id.to_hex()
    )
}

/// Build the Set-Cookie value that clears the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    let secure_flag = if secure { "; Secure" } else { "" };
    format!("{SESSION_COOKIE_NAME}=; HttpOnly{secure_flag}; SameSite=Lax; Path=/; Max-Age=0")
}

/// Extract the session ID from request cookies.
pub fn extract_session_cookie(headers: &HeaderMap) -> Option<SessionId> {
    let cookie_header = headers.get(axum::http::header::COOKIE)?;
    let cookie_str = cookie_header.to_str().ok()?;

    // Cookie header format: "name1=value1; name2=value2"
    for part in cookie_str.split(';') {
        let part = part.trim();
        if let Some(value) = part.strip_prefix(&format!("{SESSION_COOKIE_NAME}=")) {
            return SessionId::from_hex(value.trim());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::COOKIE;

    #[test]
    fn test_cookie_round_trip() {
        let id = SessionId::new();
        let cookie = create_session_cookie(id, 86400, false);

        let mut headers = HeaderMap::new();
        let pair = cookie.split(';').next().unwrap().to_string();
        headers.insert(COOKIE, pair.parse().unwrap());

        assert_eq!(extract_session_cookie(&headers), Some(id));
    }

    #[test]
    fn test_extract_among_other_cookies() {
        let id = SessionId::new();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("other=1; {SESSION_COOKIE_NAME}={}; theme=dark", id.to_hex())
                .parse()
                .unwrap(),
        );

        assert_eq!(extract_session_cookie(&headers), Some(id));
    }

    #[test]
    fn test_missing_or_garbage_cookie() {
        let headers = HeaderMap::new();
        assert_eq!(extract_session_cookie(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            format!("{SESSION_COOKIE_NAME}=zzzz").parse().unwrap(),
        );
        assert_eq!(extract_session_cookie(&headers), None);
    }

    #[test]
    fn test_cookie_attributes() {
        let cookie = create_session_cookie(SessionId::new(), 3600, true);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("Max-Age=3600"));

        let cleared = clear_session_cookie(false);
        assert!(cleared.contains("Max-Age=0"));
        assert!(!cleared.contains("Secure"));
    }
}
