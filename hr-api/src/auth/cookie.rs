//! Session cookie helpers

use http::HeaderMap;
use http::header::{COOKIE, HeaderValue, InvalidHeaderValue};

use super::session::SESSION_TTL_SECS;

pub const SESSION_COOKIE: &str = "hr_session";

/// Value of cookie `name` from the request headers
pub fn parse_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v.to_string())
}

pub fn session_token(headers: &HeaderMap) -> Option<String> {
    parse_cookie(headers, SESSION_COOKIE).filter(|t| !t.is_empty())
}

/// Absolute one-hour cookie, HTTPS only, not readable from scripts
pub fn set_session_cookie(token: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE}={token}; Max-Age={SESSION_TTL_SECS}; Path=/; HttpOnly; Secure; SameSite=Lax"
    ))
}

pub fn clear_session_cookie() -> HeaderValue {
    HeaderValue::from_static("hr_session=; Max-Age=0; Path=/; HttpOnly; Secure; SameSite=Lax")
}
