//! Public directory and reach-out handlers.

use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::AccountSummary;
use crate::errors::{AppError, AppResult};
use crate::services::ReachOutReceipt;
use crate::types::Created;

/// Directory search query
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-sensitive substring of username, name or description
    pub search_parameter: Option<String>,
}

/// Target of a reach-out request
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct HouseHelpQuery {
    pub house_help_id: Option<Uuid>,
}

/// Reach-out request body; empty when returned as a blank form
#[derive(Debug, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReachOutRequest {
    /// Target account; the `houseHelpId` query parameter is used when absent
    pub house_help_id: Option<Uuid>,
    #[validate(length(min = 1, message = "The Name field is required."))]
    #[schema(example = "Bob")]
    pub name: String,
    #[validate(length(min = 1, message = "The Phone field is required."))]
    #[schema(example = "0712345678")]
    pub phone: String,
    #[validate(length(min = 1, message = "The Description field is required."))]
    #[schema(example = "Need cleaner")]
    pub description: String,
}

/// Create public routes
pub fn home_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/reach-out", get(reach_out_form).post(reach_out))
}

/// List available househelp
#[utoipa::path(
    get,
    path = "/",
    tag = "Directory",
    params(SearchQuery),
    responses(
        (status = 200, description = "Available househelp", body = [AccountSummary])
    )
)]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<AccountSummary>>> {
    let listed = state
        .directory_service
        .list_available(query.search_parameter)
        .await?;

    Ok(Json(listed))
}

/// Blank reach-out form addressed to a househelp
#[utoipa::path(
    get,
    path = "/reach-out",
    tag = "Directory",
    params(HouseHelpQuery),
    responses(
        (status = 200, description = "Form model", body = ReachOutRequest)
    )
)]
pub async fn reach_out_form(Query(query): Query<HouseHelpQuery>) -> Json<ReachOutRequest> {
    Json(ReachOutRequest {
        house_help_id: query.house_help_id,
        ..ReachOutRequest::default()
    })
}

/// Send a reach-out request to a househelp
#[utoipa::path(
    post,
    path = "/reach-out",
    tag = "Directory",
    params(HouseHelpQuery),
    request_body = ReachOutRequest,
    responses(
        (status = 201, description = "Request stored", body = ReachOutReceipt),
        (status = 400, description = "Validation error"),
        (status = 404, description = "User Not Found")
    )
)]
pub async fn reach_out(
    State(state): State<AppState>,
    Query(query): Query<HouseHelpQuery>,
    ValidatedJson(payload): ValidatedJson<ReachOutRequest>,
) -> AppResult<Created<ReachOutReceipt>> {
    let target = payload
        .house_help_id
        .or(query.house_help_id)
        .ok_or_else(|| AppError::validation("The HouseHelpId field is required."))?;

    let receipt = state
        .reach_out_service
        .submit(target, payload.name, payload.phone, payload.description)
        .await?;

    let message = receipt.message.clone();
    Ok(Created(receipt, message))
}
