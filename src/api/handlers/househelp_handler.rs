//! Househelp registration and own-account handlers.

use axum::{
    extract::State,
    response::Json,
    routing::get,
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{AccountResponse, ProfileView};
use crate::errors::AppResult;
use crate::services::ProfileEdit;
use crate::types::{Created, MessageResponse};

/// Account creation request, shared with the admin form
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAccountRequest {
    #[validate(length(min = 1, message = "The Username field is required."))]
    #[schema(example = "jane")]
    pub username: String,
    #[validate(length(min = 1, message = "The Email field is required."))]
    #[schema(example = "jane@x.com")]
    pub email: String,
    #[validate(length(min = 1, message = "The Password field is required."))]
    #[schema(example = "Secret1!")]
    pub password: String,
    #[schema(example = "Secret1!")]
    pub confirm_password: Option<String>,
}

/// Profile edit request; blank fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EditProfileRequest {
    /// Base64 picture, optionally as a data URI
    pub picture: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub email: Option<String>,
    /// Written on every edit; omitted means false
    #[serde(default)]
    pub is_available: bool,
}

impl From<EditProfileRequest> for ProfileEdit {
    fn from(request: EditProfileRequest) -> Self {
        Self {
            picture: request.picture,
            username: request.username,
            name: request.name,
            description: request.description,
            email: request.email,
            is_available: request.is_available,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "The CurrentPassword field is required."))]
    pub current_password: String,
    #[validate(length(min = 1, message = "The NewPassword field is required."))]
    pub new_password: String,
    #[validate(length(min = 1, message = "The ConfirmNewPassword field is required."))]
    pub confirm_new_password: String,
}

/// Change-password form model
#[derive(Debug, Serialize, ToSchema)]
pub struct ChangePasswordForm {
    pub house_help_id: Uuid,
}

/// Create routes open to anonymous callers
pub fn househelp_routes() -> Router<AppState> {
    Router::new().route("/househelp/create", get(create_form).post(create))
}

/// Create routes acting on the signed-in account
pub fn househelp_owner_routes() -> Router<AppState> {
    Router::new()
        .route("/househelp", get(index))
        .route("/househelp/edit", get(edit_form).post(edit))
        .route(
            "/househelp/change-password",
            get(change_password_form).post(change_password),
        )
}

#[utoipa::path(
    get,
    path = "/househelp/create",
    tag = "Househelp",
    responses((status = 200, description = "Blank registration form", body = CreateAccountRequest))
)]
pub async fn create_form() -> Json<CreateAccountRequest> {
    Json(CreateAccountRequest::default())
}

/// Register a househelp account
#[utoipa::path(
    post,
    path = "/househelp/create",
    tag = "Househelp",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> AppResult<Created<AccountResponse>> {
    let account = state
        .account_service
        .register(
            payload.username,
            payload.email,
            payload.password,
            payload.confirm_password,
        )
        .await?;

    Ok(Created(AccountResponse::from(account), "Account created".to_string()))
}

/// Own profile with received reach-outs
#[utoipa::path(
    get,
    path = "/househelp",
    tag = "Househelp",
    responses(
        (status = 200, description = "Profile", body = ProfileView),
        (status = 401, description = "Not signed in")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn index(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileView>> {
    let profile = state.account_service.view_profile(current_user.id).await?;
    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/househelp/edit",
    tag = "Househelp",
    responses((status = 200, description = "Current profile values", body = ProfileView)),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn edit_form(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<ProfileView>> {
    index(State(state), Extension(current_user)).await
}

/// Update own profile
#[utoipa::path(
    post,
    path = "/househelp/edit",
    tag = "Househelp",
    request_body = EditProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileView),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn edit(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<EditProfileRequest>,
) -> AppResult<Json<ProfileView>> {
    let profile = state
        .account_service
        .edit_profile(current_user.id, payload.into())
        .await?;

    Ok(Json(profile))
}

#[utoipa::path(
    get,
    path = "/househelp/change-password",
    tag = "Househelp",
    responses((status = 200, description = "Form model", body = ChangePasswordForm)),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn change_password_form(
    Extension(current_user): Extension<CurrentUser>,
) -> Json<ChangePasswordForm> {
    Json(ChangePasswordForm {
        house_help_id: current_user.id,
    })
}

/// Change own password
#[utoipa::path(
    post,
    path = "/househelp/change-password",
    tag = "Househelp",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed", body = MessageResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Incorrect password.")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .account_service
        .change_password(
            current_user.id,
            payload.current_password,
            payload.new_password,
            payload.confirm_new_password,
        )
        .await?;

    Ok(Json(MessageResponse::new("Password changed")))
}
