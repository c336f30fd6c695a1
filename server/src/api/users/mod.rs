pub mod create;
pub mod dashboard;
pub mod delete_item;
pub mod items;
pub mod preferences;

use crate::AppState;
use axum::routing::{post, put};
use axum::Router;
use pantry_core::UserProfile;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Returns the router for /users endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create::create_user))
        .route(
            "/users/preferences",
            put(preferences::set_preferences).post(preferences::add_preference),
        )
        .route("/users/items", put(items::add_item))
        .route("/users/items/delete", post(delete_item::delete_item))
        .route("/users/dashboard", post(dashboard::dashboard))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_user,
        preferences::set_preferences,
        preferences::add_preference,
        items::add_item,
        dashboard::dashboard,
        delete_item::delete_item,
    ),
    components(schemas(
        ProfileResponse,
        EmailRequest,
        create::CreateUserRequest,
        create::CreateUserResponse,
        preferences::SetPreferencesRequest,
        preferences::AddPreferenceRequest,
        items::AddItemRequest,
        delete_item::DeleteItemRequest,
    ))
)]
pub struct ApiDoc;

/// A user's stored profile
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
    pub preferences: Vec<String>,
    pub items: Vec<String>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            preferences: profile.preferences,
            items: profile.items,
        }
    }
}

/// Body for endpoints that only identify the user
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct EmailRequest {
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::TestApp;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_then_fetch_profile() {
        let app = TestApp::new();

        let (status, body) = app
            .json(Method::POST, "/users", json!({"email": "a@x.com", "name": "A"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "User created successfully."}));

        let (status, body) = app
            .json(Method::POST, "/users/dashboard", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"name": "A", "email": "a@x.com", "preferences": [], "items": []})
        );
    }

    #[tokio::test]
    async fn test_create_existing_returns_profile() {
        let app = TestApp::new();
        app.create_user("a@x.com").await;
        app.json(
            Method::PUT,
            "/users/items",
            json!({"email": "a@x.com", "item": "eggs"}),
        )
        .await;

        let (status, body) = app
            .json(Method::POST, "/users", json!({"email": "a@x.com", "name": "Other"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Test");
        assert_eq!(body["items"], json!(["eggs"]));
    }

    #[tokio::test]
    async fn test_create_requires_email() {
        let app = TestApp::new();
        let (status, body) = app.json(Method::POST, "/users", json!({"name": "A"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "email is required"}));

        let (status, _) = app
            .json(Method::POST, "/users", json!({"email": "   "}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preferences_replace_and_append() {
        let app = TestApp::new();
        app.create_user("a@x.com").await;

        let (status, body) = app
            .json(
                Method::PUT,
                "/users/preferences",
                json!({"email": "a@x.com", "preferences": ["keto", "spicy"]}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Preference updated successfully."}));

        // Singular field name is accepted for the full list
        app.json(
            Method::PUT,
            "/users/preferences",
            json!({"email": "a@x.com", "preference": ["vegan"]}),
        )
        .await;

        let (status, body) = app
            .json(
                Method::POST,
                "/users/preferences",
                json!({"email": "a@x.com", "preference": "gluten-free"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Preference added successfully."}));

        let (_, body) = app
            .json(Method::POST, "/users/dashboard", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(body["preferences"], json!(["vegan", "gluten-free"]));
    }

    #[tokio::test]
    async fn test_preferences_missing_fields() {
        let app = TestApp::new();
        app.create_user("a@x.com").await;

        let (status, body) = app
            .json(Method::PUT, "/users/preferences", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "preferences is required"}));

        let (status, _) = app
            .json(Method::PUT, "/users/preferences", json!({"preferences": []}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_user_is_404() {
        let app = TestApp::new();

        for (method, uri, body) in [
            (
                Method::PUT,
                "/users/preferences",
                json!({"email": "nobody@x.com", "preferences": ["vegan"]}),
            ),
            (
                Method::PUT,
                "/users/items",
                json!({"email": "nobody@x.com", "item": "eggs"}),
            ),
            (
                Method::POST,
                "/users/dashboard",
                json!({"email": "nobody@x.com"}),
            ),
            (
                Method::POST,
                "/users/items/delete",
                json!({"email": "nobody@x.com", "itemIndex": 0}),
            ),
        ] {
            let (status, body) = app.json(method, uri, body).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
            assert_eq!(body, json!({"error": "User not found"}));
        }
    }

    #[tokio::test]
    async fn test_items_add_and_delete() {
        let app = TestApp::new();
        app.create_user("a@x.com").await;

        let (status, body) = app
            .json(
                Method::PUT,
                "/users/items",
                json!({"email": "a@x.com", "item": "eggs"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Item added successfully."}));

        // Plural field name is accepted for a single item
        app.json(
            Method::PUT,
            "/users/items",
            json!({"email": "a@x.com", "items": "milk"}),
        )
        .await;

        let (status, body) = app
            .json(
                Method::POST,
                "/users/items/delete",
                json!({"email": "a@x.com", "itemIndex": 0}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Item deleted successfully."}));

        let (_, body) = app
            .json(Method::POST, "/users/dashboard", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(body["items"], json!(["milk"]));
    }

    #[tokio::test]
    async fn test_add_structured_and_numeric_items() {
        let app = TestApp::new();
        app.create_user("a@x.com").await;

        for item in [json!({"name": "eggs", "qty": 2}), json!(12), json!("milk")] {
            let (status, _) = app
                .json(
                    Method::PUT,
                    "/users/items",
                    json!({"email": "a@x.com", "item": item}),
                )
                .await;
            assert_eq!(status, StatusCode::OK, "item {}", item);
        }

        let (_, body) = app
            .json(Method::POST, "/users/dashboard", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(
            body["items"],
            json!([r#"{"name":"eggs","qty":2}"#, "12", "milk"])
        );

        let (status, body) = app
            .json(
                Method::PUT,
                "/users/items",
                json!({"email": "a@x.com", "item": null}),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "item is required"}));
    }

    #[tokio::test]
    async fn test_delete_invalid_index_is_400() {
        let app = TestApp::new();
        app.create_user("a@x.com").await;
        app.json(
            Method::PUT,
            "/users/items",
            json!({"email": "a@x.com", "item": "milk"}),
        )
        .await;

        for index in [json!(5), json!(-1), json!("zero")] {
            let (status, _) = app
                .json(
                    Method::POST,
                    "/users/items/delete",
                    json!({"email": "a@x.com", "itemIndex": index}),
                )
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "index {}", index);
        }

        let (status, _) = app
            .json(Method::POST, "/users/items/delete", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, body) = app
            .json(Method::POST, "/users/dashboard", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(body["items"], json!(["milk"]));
    }

    #[tokio::test]
    async fn test_store_outage_is_500_without_details() {
        let app = TestApp::new();
        app.create_user("a@x.com").await;
        app.store.set_unavailable(true);

        let (status, body) = app
            .json(Method::POST, "/users/dashboard", json!({"email": "a@x.com"}))
            .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Internal server error"}));
    }
}
