pub mod health;
pub mod images;
pub mod legacy;
pub mod recipes;
pub mod users;

use crate::error::ApiError;
use crate::AppState;
use axum::extract::DefaultBodyLimit;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::Router;
use serde::Serialize;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

/// Headroom on top of the image limit for multipart framing and JSON bodies.
const BODY_LIMIT_SLACK: usize = 64 * 1024;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Confirmation returned by mutating endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Unwrap a request field, rejecting the request if it was omitted.
pub fn required<T>(value: Option<T>, field: &str) -> Result<T, ApiError> {
    value.ok_or_else(|| ApiError::BadRequest(format!("{} is required", field)))
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "pantry-server", description = "Pantry profiles and recipe suggestions"),
        components(schemas(ErrorResponse, MessageResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        health::ApiDoc::openapi(),
        users::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
        images::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

/// Largest request body accepted for a given image size limit.
fn body_limit(max_upload_bytes: usize) -> usize {
    max_upload_bytes.saturating_add(BODY_LIMIT_SLACK)
}

/// Build the full application router, including docs and legacy aliases.
pub fn router(state: AppState) -> Router {
    let limit = body_limit(state.advisor.max_upload_bytes());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", openapi());

    Router::new()
        .merge(health::router())
        .merge(users::router())
        .merge(recipes::router())
        .merge(images::router())
        .merge(legacy::router())
        .layer(DefaultBodyLimit::max(limit))
        .layer(cors)
        .with_state(state)
        .merge(swagger_ui)
}


#[cfg(test)]
pub(crate) mod test_support {
    use crate::{AppContext, AppState};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use pantry_core::{FakeProvider, MemoryStore, ProfileService, RecipeAdvisor};
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub struct TestApp {
        pub router: Router,
        pub store: Arc<MemoryStore>,
        pub llm: Arc<FakeProvider>,
    }

    impl TestApp {
        pub fn new() -> Self {
            Self::with_llm(FakeProvider::with_pantry_responses())
        }

        pub fn with_llm(llm: FakeProvider) -> Self {
            let store = Arc::new(MemoryStore::new());
            let llm = Arc::new(llm);
            let profiles = ProfileService::new(store.clone());
            let advisor = RecipeAdvisor::new(profiles.clone(), llm.clone());
            let state: AppState = Arc::new(AppContext { profiles, advisor });
            Self {
                router: super::router(state),
                store,
                llm,
            }
        }

        pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self
                .router
                .clone()
                .oneshot(request)
                .await
                .expect("router is infallible");
            let status = response.status();
            let bytes = response
                .into_body()
                .collect()
                .await
                .expect("body collects")
                .to_bytes();
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                })
            };
            (status, body)
        }

        pub async fn json(&self, method: Method, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send(json_request(method, uri, &body.to_string())).await
        }

        pub async fn create_user(&self, email: &str) {
            let (status, _) = self
                .json(
                    Method::POST,
                    "/users",
                    serde_json::json!({"email": email, "name": "Test"}),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
        }
    }

    pub fn json_request(method: Method, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request")
    }
}
