use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use crate::application::usecases::authentication::validate_session_token;
use crate::config::config_loader;

pub const SESSION_COOKIE: &str = "acme_session";

/// Present on every guarded handler; constructing it proves the request
/// carried a valid session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Unauthenticated callers get sent to the login entry point, not an error
/// payload.
#[derive(Debug)]
pub struct LoginRedirect;

impl IntoResponse for LoginRedirect {
    fn into_response(self) -> Response {
        Redirect::to("/login").into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = LoginRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| bearer_token(parts));

        let token = token.ok_or(LoginRedirect)?;

        let secret = config_loader::get_session_secret().map_err(|_| LoginRedirect)?;
        let claims = validate_session_token(&token, &secret).map_err(|_| LoginRedirect)?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| LoginRedirect)?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
        })
    }
}

// Cookie is the primary carrier; a bearer header keeps scripted clients easy.
fn bearer_token(parts: &Parts) -> Option<String> {
    let header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?;
    header.strip_prefix("Bearer ").map(str::to_string)
}

#[cfg(test)]
mod tests;
