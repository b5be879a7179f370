//! Session authentication middleware.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, SESSION_COOKIE_NAME};
use crate::domain::Role;
use crate::errors::AppError;

/// Authenticated account extracted from the session token
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub roles: Vec<Role>,
}

impl CurrentUser {
    /// Check if the account holds the Administrator role.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Administrator)
    }
}

/// Session token from the cookie, falling back to a Bearer header
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(SESSION_COOKIE_NAME) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .map(str::to_string)
}

/// Session authentication middleware.
///
/// Verifies the session token, reloads the account it names and injects
/// the CurrentUser into the request extensions. Roles come from storage,
/// not from the token.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = session_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let account = state.auth_service.authenticate(&token).await?;

    let current_user = CurrentUser {
        id: account.id,
        username: account.username,
        roles: account.roles,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Reject callers without the Administrator role.
///
/// Must run after `auth_middleware`.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if !user.is_admin() {
        tracing::warn!(account_id = %user.id, path = %request.uri().path(), "Administrator route refused");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
