//! Cookie sessions.
//!
//! A session is an opaque token stored in the `sid` cookie and mapped to a
//! user id in the workspace.

use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};

use crate::db::users;
use crate::error::AppError;
use crate::models::user::User;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "sid";

/// The session token sent with the request, if any.
#[derive(Debug, Clone, Default)]
pub struct SessionToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for SessionToken {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(SessionToken(token_from_headers(&parts.headers)))
    }
}

/// The signed-in user. Rejects with `401 Not authenticated` otherwise.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = token_from_headers(&parts.headers).ok_or_else(AppError::not_authenticated)?;
        let ws = state.db.read().await;
        let user = users::session_user(&ws, &token)
            .cloned()
            .ok_or_else(AppError::not_authenticated)?;
        Ok(CurrentUser { user, token })
    }
}

pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

fn cookie_header(value: String) -> HeaderMap {
    let mut headers = HeaderMap::new();
    // Tokens are uuids, so the header is always valid ASCII.
    if let Ok(value) = HeaderValue::from_str(&value) {
        headers.insert(SET_COOKIE, value);
    }
    headers
}

pub fn set_cookie(token: &str) -> HeaderMap {
    cookie_header(format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax",
        SESSION_COOKIE, token
    ))
}

pub fn expire_cookie() -> HeaderMap {
    cookie_header(format!(
        "{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0",
        SESSION_COOKIE
    ))
}
