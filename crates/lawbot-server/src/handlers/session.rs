use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use axum::response::Response;
use tracing::warn;
use uuid::Uuid;

use crate::models::chat::SessionId;

/// Session id carried by the request cookie, if any and well-formed.
pub fn session_from_cookies(headers: &HeaderMap, cookie_name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}

/// Existing session id, or a fresh one (`true` when it still has to be sent to the browser).
pub fn resolve_session(headers: &HeaderMap, cookie_name: &str) -> (SessionId, bool) {
    match session_from_cookies(headers, cookie_name) {
        Some(session_id) => (session_id, false),
        None => (Uuid::new_v4(), true),
    }
}

pub fn session_cookie(cookie_name: &str, session_id: SessionId) -> String {
    format!("{}={}; Path=/; HttpOnly; SameSite=Lax", cookie_name, session_id)
}

pub fn with_session_cookie(
    mut response: Response,
    cookie_name: &str,
    session_id: SessionId,
) -> Response {
    match HeaderValue::from_str(&session_cookie(cookie_name, session_id)) {
        Ok(value) => {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Err(e) => warn!("Invalid session cookie for {}: {}", cookie_name, e),
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_parsing() {
        let session_id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&format!("theme=dark; lawbot_session={}; other=1", session_id))
                .unwrap(),
        );

        assert_eq!(session_from_cookies(&headers, "lawbot_session"), Some(session_id));
        assert_eq!(session_from_cookies(&headers, "missing"), None);
    }

    #[test]
    fn test_malformed_cookie_starts_new_session() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("lawbot_session=not-a-uuid"));

        let (_, is_new) = resolve_session(&headers, "lawbot_session");
        assert!(is_new);
    }

    #[test]
    fn test_cookie_round_trip() {
        let session_id = Uuid::new_v4();
        let cookie = session_cookie("lawbot_session", session_id);
        let pair = cookie.split(';').next().unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(pair).unwrap());
        assert_eq!(resolve_session(&headers, "lawbot_session"), (session_id, false));
    }
}
