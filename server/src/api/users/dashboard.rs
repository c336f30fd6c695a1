use crate::api::users::{EmailRequest, ProfileResponse};
use crate::api::{required, ErrorResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};

#[utoipa::path(
    post,
    path = "/users/dashboard",
    tag = "users",
    request_body = EmailRequest,
    responses(
        (status = 200, description = "The user's profile", body = ProfileResponse),
        (status = 400, description = "Missing email", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Profile store failure", body = ErrorResponse)
    )
)]
pub async fn dashboard(
    State(state): State<AppState>,
    payload: Result<Json<EmailRequest>, JsonRejection>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Json(request) = payload?;
    let email = required(request.email, "email")?;

    let profile = state.profiles.get_profile(&email).await?;

    Ok(Json(profile.into()))
}
