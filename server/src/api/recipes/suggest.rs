use crate::api::users::EmailRequest;
use crate::api::{required, ErrorResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};

#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "Model output: a JSON document with a \"recipes\" key, as a string", body = String),
        (status = 400, description = "Missing email", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Profile store or model failure", body = ErrorResponse)
    )
)]
pub async fn suggest_recipes(
    State(state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<String>, ApiError> {
    let Json(request) = payload?;
    let email = required(request.email, "email")?;

    let recipes = state.advisor.suggest_recipes(&email).await?;

    Ok(Json(recipes))
}
