//! Flash messages carried across a redirect in a signed cookie.
//!
//! Messages are stored as JSON under a single cookie. Reading them removes
//! the cookie, so each message is shown once.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use greeter_app::flash::FlashMessage;
use tracing::warn;

pub const FLASH_COOKIE: &str = "_flashes";
/// Upper bound on messages kept in the cookie; the oldest are dropped first.
pub const MAX_PENDING: usize = 4;

/// Stores `messages` for the next page view. Messages already pending are kept
/// in front, up to [`MAX_PENDING`] in total.
pub fn push(
    jar: SignedCookieJar,
    messages: &[FlashMessage],
) -> Result<SignedCookieJar, serde_json::Error> {
    let (jar, mut pending) = take(jar);
    pending.extend_from_slice(messages);
    let overflow = pending.len().saturating_sub(MAX_PENDING);
    pending.drain(..overflow);

    let value = serde_json::to_string(&pending)?;
    let cookie = Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok(jar.add(cookie))
}

/// Removes and returns the pending messages.
///
/// A cookie that fails signature checks never reaches this point; one that
/// verifies but does not decode is dropped with a warning.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<FlashMessage>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, Vec::new());
    };

    let messages = match serde_json::from_str(cookie.value()) {
        Ok(messages) => messages,
        Err(err) => {
            warn!(error = %err, "Discarding undecodable flash cookie");
            Vec::new()
        }
    };

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), messages)
}
