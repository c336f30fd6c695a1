use crate::api::{required, ErrorResponse, MessageResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetPreferencesRequest {
    pub email: Option<String>,
    /// Replaces the stored list. Also accepted as `preference`.
    #[serde(alias = "preference")]
    pub preferences: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddPreferenceRequest {
    pub email: Option<String>,
    /// Appended to the stored list. Also accepted as `preferences`.
    #[serde(alias = "preferences")]
    pub preference: Option<String>,
}

#[utoipa::path(
    put,
    path = "/users/preferences",
    tag = "users",
    request_body = SetPreferencesRequest,
    responses(
        (status = 200, description = "Preferences replaced", body = MessageResponse),
        (status = 400, description = "Missing email or preferences", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Profile store failure", body = ErrorResponse)
    )
)]
pub async fn set_preferences(
    State(state): State<AppState>,
    payload: Result<Json<SetPreferencesRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let email = required(request.email, "email")?;
    let preferences = required(request.preferences, "preferences")?;

    state.profiles.set_preferences(&email, preferences).await?;

    Ok(Json(MessageResponse::new("Preference updated successfully.")))
}

#[utoipa::path(
    post,
    path = "/users/preferences",
    tag = "users",
    request_body = AddPreferenceRequest,
    responses(
        (status = 200, description = "Preference appended", body = MessageResponse),
        (status = 400, description = "Missing email or preference", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Profile store failure", body = ErrorResponse)
    )
)]
pub async fn add_preference(
    State(state): State<AppState>,
    payload: Result<Json<AddPreferenceRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload?;
    let email = required(request.email, "email")?;
    let preference = required(request.preference, "preference")?;

    state.profiles.add_preference(&email, preference).await?;

    Ok(Json(MessageResponse::new("Preference added successfully.")))
}
