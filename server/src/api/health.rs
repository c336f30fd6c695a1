use crate::AppState;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Returns the router for the liveness probe
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(OpenApi)]
#[openapi(paths(health), components(schemas(HealthResponse)))]
pub struct ApiDoc;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Server is up", body = HealthResponse)
    )
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use crate::api::test_support::TestApp;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_health() {
        let app = TestApp::new();
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let (status, body) = app.send(request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let app = TestApp::new();
        let request = Request::get("/api-docs/openapi.json")
            .body(Body::empty())
            .unwrap();

        let (status, body) = app.send(request).await;

        assert_eq!(status, StatusCode::OK);
        for path in ["/health", "/users", "/recipes", "/images/classify"] {
            assert!(body["paths"].get(path).is_some(), "missing {}", path);
        }
    }
}
