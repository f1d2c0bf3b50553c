//! Session cookie construction.
//!
//! Local development serves the frontend from another port, so the
//! cookie is `SameSite=Lax` there; production frontends are cross-site
//! and need `SameSite=None; Secure`.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Cookie name the session token travels under.
pub const SESSION_COOKIE: &str = "token";

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, lifetime_secs: u64, production: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .path("/")
        .max_age(Duration::seconds(lifetime_secs as i64))
        .secure(production)
        .same_site(if production {
            SameSite::None
        } else {
            SameSite::Lax
        })
        .build()
}

/// Expired twin of the session cookie.
///
/// Attributes must match [`session_cookie`] for browsers to drop the
/// stored value.
pub fn clear_session_cookie(production: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .path("/")
        .max_age(Duration::ZERO)
        .secure(production)
        .same_site(if production {
            SameSite::None
        } else {
            SameSite::Lax
        })
        .build()
}
