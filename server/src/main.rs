mod api;
mod config;
mod db;
mod error;
mod models;
mod pg_store;
mod schema;
mod telemetry;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use pantry_core::{
    create_provider, LlmConfig, MemoryStore, ProfileService, ProfileStore, RecipeAdvisor,
};
use std::env;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::config::{ServerConfig, StoreConfig};
use crate::pg_store::PgProfileStore;

/// Services shared across all handlers
#[derive(Debug)]
pub struct AppContext {
    pub profiles: ProfileService,
    pub advisor: RecipeAdvisor,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn ProfileStore>> {
    match config {
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory profile store; profiles are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreConfig::Postgres { database_url } => {
            let pool = db::create_pool(database_url)?;
            Ok(Arc::new(PgProfileStore::new(pool)))
        }
    }
}

fn build_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let store = build_store(&config.store)?;

    let llm_config = LlmConfig::from_env().context("Invalid LLM configuration")?;
    let llm = create_provider(&llm_config).context("Failed to create LLM provider")?;

    tracing::info!(
        store = store.store_name(),
        llm_provider = llm.provider_name(),
        llm_model = llm.model_name(),
        "Services configured"
    );

    let profiles = ProfileService::new(store);
    let advisor = RecipeAdvisor::new(profiles.clone(), llm)
        .with_max_upload_bytes(config.max_upload_bytes);

    Ok(Arc::new(AppContext { profiles, advisor }))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received terminate signal, shutting down"),
    }
}

async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = build_state(&config)?;

    let app = api::router(state).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                // Don't create a span at all for noisy endpoints
                if matched_path == "/health" {
                    tracing::trace_span!("http_request")
                } else {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                }
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, span: &Span| {
                    // Skip logging for noisy endpoints (trace-level spans)
                    if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                        return;
                    }
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: std::time::Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    );

    let address = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Check for --openapi flag to dump spec and exit
    if env::args().any(|arg| arg == "--openapi") {
        let spec = api::openapi().to_pretty_json()?;
        println!("{}", spec);
        return Ok(());
    }

    let telemetry = telemetry::init_telemetry();

    let result = match ServerConfig::from_env() {
        Ok(config) => run(config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = &result {
        tracing::error!("Server failed: {:#}", e);
    }

    telemetry.shutdown();
    result
}
