//! Paths served by earlier versions of the service, kept for existing clients.
//! They share handlers with the current routes and are left out of the OpenAPI
//! document.

use crate::api::{images, recipes, users};
use crate::AppState;
use axum::routing::{post, put};
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create/user", post(users::create::create_user))
        .route("/add/preferences", put(users::preferences::set_preferences))
        .route("/add/items", put(users::items::add_item))
        .route("/dashboard", post(users::dashboard::dashboard))
        .route("/deleteItem", post(users::delete_item::delete_item))
        .route("/create/recipe", post(recipes::suggest::suggest_recipes))
        .route("/create/recipe/steps", post(recipes::steps::recipe_steps))
        .route("/upload", post(images::classify::classify_image))
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::TestApp;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_legacy_profile_flow() {
        let app = TestApp::new();

        let (status, _) = app
            .json(
                Method::POST,
                "/create/user",
                json!({"email": "a@x.com", "name": "A"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = app
            .json(
                Method::PUT,
                "/add/preferences",
                json!({"email": "a@x.com", "preference": ["vegan"]}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        for item in ["eggs", "milk"] {
            let (status, _) = app
                .json(
                    Method::PUT,
                    "/add/items",
                    json!({"email": "a@x.com", "items": item}),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, _) = app
            .json(
                Method::POST,
                "/deleteItem",
                json!({"email": "a@x.com", "itemIndex": 0}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = app
            .json(Method::POST, "/dashboard", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"name": "A", "email": "a@x.com", "preferences": ["vegan"], "items": ["milk"]})
        );
    }

    #[tokio::test]
    async fn test_legacy_recipe_routes() {
        let app = TestApp::new();
        app.create_user("a@x.com").await;

        let (status, body) = app
            .json(Method::POST, "/create/recipe", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_string());

        let (status, body) = app
            .json(
                Method::POST,
                "/create/recipe/steps",
                json!({"itemName": "rice"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_string());
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let app = TestApp::new();

        let request =
            crate::api::test_support::json_request(Method::POST, "/create/user", "{not json");
        let (status, body) = app.send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }
}
