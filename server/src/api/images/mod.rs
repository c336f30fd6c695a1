pub mod classify;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /images endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/images/classify", post(classify::classify_image))
}

#[derive(OpenApi)]
#[openapi(
    paths(classify::classify_image),
    components(schemas(classify::ClassifyImageRequest, classify::ClassifyImageResponse))
)]
pub struct ApiDoc;
