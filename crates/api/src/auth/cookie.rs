//! Session cookie construction.
//!
//! The session token travels in an httpOnly cookie named `jwt`, scoped
//! to the API path so it is only sent where it is needed. The cookie's
//! max-age matches the token expiry. Logout overwrites it with an
//! immediately-expiring empty value -- purely client state; the signed
//! token itself is not invalidated server-side.

use tower_cookies::cookie::time::Duration;
use tower_cookies::cookie::SameSite;
use tower_cookies::Cookie;

use crate::auth::jwt::JwtConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "jwt";

/// Path the session cookie is scoped to.
const COOKIE_PATH: &str = "/api";

/// Build the session cookie carrying a freshly issued token.
pub fn build_session_cookie(token: String, config: &JwtConfig) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path(COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(config.session_expiry_days))
        .build()
}

/// Build the logout cookie: same name and path, empty value, expired.
pub fn clear_session_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path(COOKIE_PATH)
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::ZERO)
        .build()
}
