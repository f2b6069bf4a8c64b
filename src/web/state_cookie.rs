//! Binding of the authorization `state` nonce to the browser.
//!
//! When state verification is enabled the landing page sets a short-lived
//! cookie holding the nonce it embedded in the authorization URL, and the
//! callback accepts only a `state` parameter equal to that cookie.

use axum::http::{HeaderMap, HeaderValue, header};
use sha2::{Digest, Sha256};

pub const STATE_COOKIE_NAME: &str = "tokgate_oauth_state";

/// Lifetime of the cookie, long enough to finish the consent screen.
pub const STATE_COOKIE_MAX_AGE_SECS: u64 = 600;

/// `Set-Cookie` value carrying `nonce`.
pub fn set_cookie(nonce: &str) -> Option<HeaderValue> {
    let cookie = format!(
        "{STATE_COOKIE_NAME}={nonce}; Path=/callback; Max-Age={STATE_COOKIE_MAX_AGE_SECS}; HttpOnly; SameSite=Lax"
    );
    HeaderValue::from_str(&cookie).ok()
}

/// `Set-Cookie` value that removes the cookie.
pub fn clear_cookie() -> HeaderValue {
    HeaderValue::from_static("tokgate_oauth_state=; Path=/callback; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Extract the nonce from the request's `Cookie` header(s).
pub fn extract(headers: &HeaderMap) -> Option<String> {
    let prefix = format!("{STATE_COOKIE_NAME}=");
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .map(str::trim)
        .find_map(|c| c.strip_prefix(prefix.as_str()))
        .filter(|v| !v.is_empty())
        .map(String::from)
}

/// Hash before comparing so the comparison time does not depend on the
/// length of the shared prefix.
fn hash(value: &str) -> Vec<u8> {
    Sha256::digest(value.as_bytes()).to_vec()
}

/// `true` when the callback's `state` matches the cookie.
pub fn matches(expected: Option<&str>, received: Option<&str>) -> bool {
    match (expected, received) {
        (Some(e), Some(r)) if !e.is_empty() => hash(e) == hash(r),
        _ => false,
    }
}
