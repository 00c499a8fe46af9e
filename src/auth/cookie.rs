// Cookie handling for the HttpOnly token cookie.
//
// The cookie is always HttpOnly; Secure and SameSite follow the deployment
// environment so cross-site delivery works in both development and production.

use axum_extra::extract::cookie::{Cookie, SameSite};

use crate::config::{CookieSameSite, SecurityConfig};

/// Cookie name for the authentication token
pub const TOKEN_COOKIE_NAME: &str = "token";

fn same_site(policy: CookieSameSite) -> SameSite {
    match policy {
        CookieSameSite::Strict => SameSite::Strict,
        CookieSameSite::Lax => SameSite::Lax,
        CookieSameSite::None => SameSite::None,
    }
}

/// Build the HttpOnly cookie carrying a freshly signed token.
///
/// No Max-Age is set: the browser keeps a session cookie and the token's own
/// `exp` claim bounds its validity.
pub fn token_cookie(token: String, security: &SecurityConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .secure(security.cookie_secure)
        .same_site(same_site(security.cookie_same_site))
        .build()
}

/// Build the cookie used to clear the token on logout. The jar turns this
/// into an expired cookie; attributes must match the ones set at login.
pub fn removal_cookie(security: &SecurityConfig) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .secure(security.cookie_secure)
        .same_site(same_site(security.cookie_same_site))
        .build()
}
