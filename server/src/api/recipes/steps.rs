use crate::api::{required, ErrorResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeStepsRequest {
    /// Dish or ingredient list to cook with
    #[serde(rename = "itemName")]
    pub item_name: Option<String>,
}

#[utoipa::path(
    post,
    path = "/recipes/steps",
    tag = "recipes",
    request_body = RecipeStepsRequest,
    responses(
        (status = 200, description = "Plain-text instructions, as a JSON string", body = String),
        (status = 400, description = "Missing itemName", body = ErrorResponse),
        (status = 500, description = "Model failure", body = ErrorResponse)
    )
)]
pub async fn recipe_steps(
    State(state): State<AppState>,
    payload: Result<Json<RecipeStepsRequest>, JsonRejection>,
) -> Result<Json<String>, ApiError> {
    let Json(request) = payload?;
    let item_name = required(request.item_name, "itemName")?;

    let steps = state.advisor.recipe_steps(&item_name).await?;

    Ok(Json(steps))
}
