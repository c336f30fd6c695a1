use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::AppState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ClassifyImageRequest {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClassifyImageResponse {
    /// The model's description of the food and how long it keeps
    pub item: String,
}

/// Read the uploaded image: the field named `file`, or else the first field
/// that carries a filename.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Vec<u8>>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") || field.file_name().is_some() {
            let data = field.bytes().await?;
            return Ok(Some(data.to_vec()));
        }
    }
    Ok(None)
}

#[utoipa::path(
    post,
    path = "/images/classify",
    tag = "images",
    request_body(content_type = "multipart/form-data", content = ClassifyImageRequest),
    responses(
        (status = 200, description = "Food item identified", body = ClassifyImageResponse),
        (status = 400, description = "No file, empty file, or unsupported format", body = ErrorResponse),
        (status = 413, description = "Upload too large", body = ErrorResponse),
        (status = 500, description = "Model failure", body = ErrorResponse)
    )
)]
pub async fn classify_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ClassifyImageResponse>, ApiError> {
    let mut multipart = multipart?;

    let data = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let item = state.advisor.classify_image(data).await?;

    Ok(Json(ClassifyImageResponse { item }))
}
