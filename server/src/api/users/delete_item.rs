use crate::api::{required, ErrorResponse, MessageResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DeleteItemRequest {
    pub email: Option<String>,
    /// Zero-based position in the item list
    #[serde(rename = "itemIndex")]
    pub item_index: Option<i64>,
}

#[utoipa::path(
    post,
    path = "/users/items/delete",
    tag = "users",
    request_body = DeleteItemRequest,
    responses(
        (status = 200, description = "Item removed", body = MessageResponse),
        (status = 400, description = "Missing field or invalid item index", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Profile store failure", body = ErrorResponse)
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    payload: Result<Json<DeleteItemRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let email = required(request.email, "email")?;
    let index = required(request.item_index, "itemIndex")?;

    state.profiles.delete_item(&email, index).await?;

    Ok(Json(MessageResponse::new("Item deleted successfully.")))
}
