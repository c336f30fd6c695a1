use crate::api::users::ProfileResponse;
use crate::api::{required, ErrorResponse, MessageResponse};
use crate::error::ApiError;
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use pantry_core::CreateOutcome;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    /// Defaults to an empty name
    pub name: Option<String>,
}

/// A confirmation for a new user, or the stored profile when the user exists.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum CreateUserResponse {
    Created(MessageResponse),
    Existing(ProfileResponse),
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "User created, or the existing profile", body = CreateUserResponse),
        (status = 400, description = "Missing email", body = ErrorResponse),
        (status = 500, description = "Profile store failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<Json<CreateUserResponse>, ApiError> {
    let Json(request) = payload?;
    let email = required(request.email, "email")?;
    let name = request.name.unwrap_or_default();

    let outcome = state.profiles.create_user(&email, &name).await?;
    tracing::debug!(
        email = %outcome.profile().email,
        created = matches!(outcome, CreateOutcome::Created(_)),
        "Create user"
    );

    let response = match outcome {
        CreateOutcome::Created(_) => {
            CreateUserResponse::Created(MessageResponse::new("User created successfully."))
        }
        CreateOutcome::Existing(profile) => CreateUserResponse::Existing(profile.into()),
    };

    Ok(Json(response))
}
