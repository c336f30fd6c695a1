use crate::api::{required, ErrorResponse, MessageResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use pantry_core::entry_text;
use serde::Deserialize;
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddItemRequest {
    pub email: Option<String>,
    /// A string, or any JSON value (stored as its JSON text). Also accepted as `items`.
    #[serde(alias = "items")]
    #[schema(value_type = Option<Object>)]
    pub item: Option<Value>,
}

#[utoipa::path(
    put,
    path = "/users/items",
    tag = "users",
    request_body = AddItemRequest,
    responses(
        (status = 200, description = "Item appended to the pantry", body = MessageResponse),
        (status = 400, description = "Missing email or item", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Profile store failure", body = ErrorResponse)
    )
)]
pub async fn add_item(
    State(state): State<AppState>,
    payload: Result<Json<AddItemRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let email = required(request.email, "email")?;
    let item = required(request.item.and_then(entry_text), "item")?;

    state.profiles.add_item(&email, item).await?;

    Ok(Json(MessageResponse::new("Item added successfully.")))
}
