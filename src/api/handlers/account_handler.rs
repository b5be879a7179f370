//! Sign-in, sign-out and session handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Json, Redirect},
    routing::get,
    Extension, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::api::middleware::CurrentUser;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::{DEFAULT_REDIRECT_PATH, SESSION_COOKIE_NAME};
use crate::domain::LoginSummary;
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Where to go after signing in
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReturnUrlQuery {
    pub return_url: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "The Email field is required."))]
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[validate(length(min = 1, message = "The Password field is required."))]
    #[schema(example = "#Secret123")]
    pub password: String,
}

/// Login form model
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginForm {
    pub return_url: Option<String>,
}

/// Create routes open to anonymous callers
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/account/login", get(login_form).post(login))
        .route("/account/logout", get(logout).post(logout))
        .route("/account/access-denied", get(access_denied))
}

/// Create routes requiring a session
pub fn account_session_routes() -> Router<AppState> {
    Router::new().route("/account/summary", get(summary))
}

/// Only same-site paths are followed; anything else falls back to `/`
fn local_redirect(return_url: Option<&str>) -> &str {
    match return_url {
        Some(url) if url.starts_with('/') && !url.starts_with("//") && !url.starts_with("/\\") => {
            url
        }
        _ => DEFAULT_REDIRECT_PATH,
    }
}

fn expired_session() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME).path("/").build()
}

#[utoipa::path(
    get,
    path = "/account/login",
    tag = "Account",
    params(ReturnUrlQuery),
    responses((status = 200, description = "Login form model", body = LoginForm))
)]
pub async fn login_form(Query(query): Query<ReturnUrlQuery>) -> Json<LoginForm> {
    Json(LoginForm {
        return_url: query.return_url,
    })
}

/// Sign in and receive the session cookie
#[utoipa::path(
    post,
    path = "/account/login",
    tag = "Account",
    params(ReturnUrlQuery),
    request_body = LoginRequest,
    responses(
        (status = 303, description = "Signed in; redirected to the return URL"),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<ReturnUrlQuery>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<(CookieJar, Redirect)> {
    let session = state
        .auth_service
        .login(payload.email, payload.password)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE_NAME, session.token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.cookie_secure)
        .build();

    let jar = jar.remove(expired_session()).add(cookie);
    let target = local_redirect(query.return_url.as_deref());

    Ok((jar, Redirect::to(target)))
}

/// Drop the session cookie
#[utoipa::path(
    post,
    path = "/account/logout",
    tag = "Account",
    responses((status = 303, description = "Signed out; redirected to /"))
)]
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(expired_session()), Redirect::to(DEFAULT_REDIRECT_PATH))
}

#[utoipa::path(
    get,
    path = "/account/access-denied",
    tag = "Account",
    responses((status = 403, description = "Access denied", body = MessageResponse))
)]
pub async fn access_denied() -> (StatusCode, Json<MessageResponse>) {
    (
        StatusCode::FORBIDDEN,
        Json(MessageResponse::new(
            "Access denied. You do not have permission to access this resource.",
        )),
    )
}

/// Navigation-bar summary of the signed-in account
#[utoipa::path(
    get,
    path = "/account/summary",
    tag = "Account",
    responses(
        (status = 200, description = "Signed-in account", body = LoginSummary),
        (status = 401, description = "Not signed in")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn summary(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<LoginSummary>> {
    let summary = state.account_service.login_summary(current_user.id).await?;
    Ok(Json(summary))
}
