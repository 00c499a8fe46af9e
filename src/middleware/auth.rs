use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{self, cookie::TOKEN_COOKIE_NAME, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated user context extracted from the token cookie
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
        }
    }
}

/// JWT authentication middleware. Reads the token from the cookie jar,
/// validates signature and expiry, and injects the decoded identity into
/// the request extensions. Identity gatekeeping only - roles are not
/// checked here.
pub async fn jwt_auth_middleware(
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = jar
        .get(TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
        .ok_or_else(|| ApiError::unauthorized("unauthorized access"))?;

    let secret = &config::config().security.jwt_secret;
    let claims = auth::decode_token(&token, secret).map_err(|err| {
        tracing::debug!("Token verification failed: {}", err);
        ApiError::unauthorized("unauthorized access")
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));
    Ok(next.run(request).await)
}
