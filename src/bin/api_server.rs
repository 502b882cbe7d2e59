// src/bin/api_server.rs

use pet_appointments_api::infra::{self, logging};
use pet_appointments_api::transport;
use pet_appointments_api::{Config, Services};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(&config.log_level);

    // --- Store Initialization ---
    tracing::info!("Connecting to {:?} document store...", config.store_backend);
    let store = infra::connect_store(&config).await?;
    let services = Services::new(store, config.store_timeout);
    services.ensure_collections().await?;
    tracing::info!(
        "Document store ready (per-call timeout {:?}).",
        config.store_timeout
    );

    // --- API Server Initialization ---
    let app_state = transport::http::AppState::new(services);
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()),
        )
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.server_addr).await?;
    tracing::info!("API server listening on http://{}", listener.local_addr()?);
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutdown signal received, draining connections...");
        })
        .await?;

    tracing::info!("Graceful shutdown complete.");
    Ok(())
}
