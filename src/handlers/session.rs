use axum::response::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::{self, cookie, Claims};
use crate::config;
use crate::error::ApiError;

/// Identity payload submitted at login time. Only the email ends up in the
/// token claim; roles are never embedded.
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

/// POST /jwt - sign a token for the submitted identity and store it as an
/// HttpOnly cookie
pub async fn issue_token(
    jar: CookieJar,
    Json(payload): Json<TokenRequest>,
) -> Result<(CookieJar, Json<Value>), ApiError> {
    let security = &config::config().security;

    let claims = Claims::new(payload.email);
    let token = auth::generate_token(&claims, &security.jwt_secret).map_err(|err| {
        tracing::error!("Token generation failed: {}", err);
        ApiError::internal_server_error("Could not issue token")
    })?;

    let jar = jar.add(cookie::token_cookie(token, security));
    Ok((jar, Json(json!({ "success": true }))))
}

/// GET /logout - clear the token cookie; idempotent, succeeds whether or
/// not a token was present
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    let security = &config::config().security;
    let jar = jar.remove(cookie::removal_cookie(security));
    (jar, Json(json!({ "success": true })))
}
