use cat_breeds_api::infra::telemetry;
use cat_breeds_api::transport;
use cat_breeds_api::{open_store, BreedService, Config, StoreConfig};
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();
    let config = Config::from_env()?;

    // --- Store Initialization ---
    match &config.store {
        StoreConfig::Postgres { max_connections, .. } => {
            tracing::info!(max_connections, "connecting to PostgreSQL store");
        }
        StoreConfig::Memory => {
            tracing::warn!("using in-memory store; records are lost on shutdown");
        }
    }
    let store = open_store(&config.store).await?;

    let app_state = transport::http::AppState {
        breeds: BreedService::new(store),
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "API server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
