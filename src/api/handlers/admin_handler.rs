//! Administrator dashboard handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::home_handler::SearchQuery;
use super::househelp_handler::CreateAccountRequest;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::config::MSG_ADMIN_UNPRIVILEGED;
use crate::domain::AccountResponse;
use crate::errors::{AppError, AppResult};
use crate::services::{AdminCreation, DeleteOutcome, SystemSummary};
use crate::types::{Accepted, Created, MessageResponse};

/// Account to delete
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteAccountRequest {
    pub id: Uuid,
}

/// Create routes; callers must wrap them in the admin guard
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/admin", get(index))
        .route("/admin/list-admins", get(list_admins))
        .route("/admin/list-househelps", get(list_house_helps))
        .route("/admin/create", get(create_form).post(create))
        .route("/admin/delete", post(delete))
}

/// System summary
#[utoipa::path(
    get,
    path = "/admin",
    tag = "Admin",
    responses(
        (status = 200, description = "Aggregate counts", body = SystemSummary),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Administrator role required")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn index(State(state): State<AppState>) -> AppResult<Json<SystemSummary>> {
    let summary = state.admin_service.system_summary().await?;
    Ok(Json(summary))
}

#[utoipa::path(
    get,
    path = "/admin/list-admins",
    tag = "Admin",
    responses((status = 200, description = "Administrators", body = [AccountResponse])),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_admins(State(state): State<AppState>) -> AppResult<Json<Vec<AccountResponse>>> {
    let admins = state.admin_service.list_admins().await?;
    Ok(Json(admins.into_iter().map(AccountResponse::from).collect()))
}

/// Househelp accounts, optionally filtered by username
#[utoipa::path(
    get,
    path = "/admin/list-househelps",
    tag = "Admin",
    params(SearchQuery),
    responses((status = 200, description = "Househelp accounts", body = [AccountResponse])),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn list_house_helps(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<AccountResponse>>> {
    let house_helps = state
        .admin_service
        .list_house_helps(query.search_parameter)
        .await?;

    Ok(Json(house_helps.into_iter().map(AccountResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/admin/create",
    tag = "Admin",
    responses((status = 200, description = "Blank account form", body = CreateAccountRequest)),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn create_form() -> Json<CreateAccountRequest> {
    Json(CreateAccountRequest::default())
}

/// Create an administrator account
#[utoipa::path(
    post,
    path = "/admin/create",
    tag = "Admin",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Administrator created", body = AccountResponse),
        (status = 202, description = "Account created without the Administrator role", body = AccountResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username or email already taken")
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateAccountRequest>,
) -> AppResult<Response> {
    let confirm_password = payload
        .confirm_password
        .ok_or_else(|| AppError::validation("The ConfirmPassword field is required."))?;

    let created = state
        .admin_service
        .create_admin(payload.username, payload.email, payload.password, confirm_password)
        .await?;

    Ok(match created {
        AdminCreation::Created(account) => Created(
            AccountResponse::from(account),
            "Administrator created".to_string(),
        )
        .into_response(),
        AdminCreation::Unprivileged { account, reason } => Accepted(
            AccountResponse::from(account),
            format!("{}: {}", MSG_ADMIN_UNPRIVILEGED, reason),
        )
        .into_response(),
    })
}

/// Delete any account
#[utoipa::path(
    post,
    path = "/admin/delete",
    tag = "Admin",
    request_body = DeleteAccountRequest,
    responses(
        (status = 200, description = "Account removed", body = MessageResponse),
        (status = 404, description = "User Not Found", body = MessageResponse),
        (status = 500, description = "Deletion failed", body = MessageResponse)
    ),
    security(("session_cookie" = []), ("bearer_auth" = []))
)]
pub async fn delete(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<DeleteAccountRequest>,
) -> (StatusCode, Json<MessageResponse>) {
    let outcome = state.admin_service.delete_account(payload.id).await;
    let status = match outcome {
        DeleteOutcome::Removed => StatusCode::OK,
        DeleteOutcome::NotFound => StatusCode::NOT_FOUND,
        DeleteOutcome::Failed => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(MessageResponse::new(outcome.message())))
}
