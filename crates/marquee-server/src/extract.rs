//! Session-guard extractor.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;
use marquee_auth::token;
use marquee_core::mailer::Mailer;
use marquee_core::repository::AccountRepository;
use uuid::Uuid;

use crate::cookies::SESSION_COOKIE;
use crate::error::ApiError;
use crate::state::AppState;

/// Account ID proven by a valid session token.
///
/// The session cookie is checked first, then a bearer `Authorization`
/// header. Verification is stateless; handlers that need the account
/// row fetch it themselves and handle a vanished account as not found.
#[derive(Debug, Clone, Copy)]
pub struct AuthSession {
    pub account_id: Uuid,
}

#[axum::async_trait]
impl<R, M> FromRequestParts<AppState<R, M>> for AuthSession
where
    R: AccountRepository + 'static,
    M: Mailer + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<R, M>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| bearer_token(parts));

        let Some(token) = token else {
            return Err(ApiError::unauthorized("Not authorized, login again"));
        };

        let session = token::validate_session_token(&token, state.service.config())
            .map_err(|_| ApiError::unauthorized("Invalid token, login again"))?;
        let account_id = session
            .account_id()
            .map_err(|_| ApiError::unauthorized("Invalid token, login again"))?;

        Ok(AuthSession { account_id })
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
