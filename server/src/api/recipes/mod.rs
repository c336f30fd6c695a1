pub mod steps;
pub mod suggest;

use crate::AppState;
use axum::routing::post;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /recipes endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/recipes", post(suggest::suggest_recipes))
        .route("/recipes/steps", post(steps::recipe_steps))
}

#[derive(OpenApi)]
#[openapi(
    paths(suggest::suggest_recipes, steps::recipe_steps),
    components(schemas(steps::RecipeStepsRequest))
)]
pub struct ApiDoc;
