mod accounts;
mod app;
mod config;
mod error;
mod filter;
mod models;
mod normalize;
mod routes;
mod upstream;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use accounts::postgres::PostgresAccountStore;
use accounts::AccountStore;
use app::AppState;
use config::load_settings_from_path;
use upstream::http::HttpRagBackend;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting rag-gateway server...");

    // Load configuration.
    let settings = load_settings_from_path("gateway.toml")?;
    info!(
        "Configuration loaded: environment={}, upstream={}",
        settings.environment, settings.rag_base_url
    );

    // Initialize account store.
    let accounts = Arc::new(
        PostgresAccountStore::new(&settings.postgres_uri, settings.db_pool_size).await?,
    );
    accounts.initialize().await?;
    info!("Account store initialized");

    // Initialize upstream transport.
    let backend = Arc::new(HttpRagBackend::new(
        &settings.rag_base_url,
        settings.upstream_timeout_secs,
    ));

    // Build application state.
    let state = Arc::new(AppState {
        settings: settings.clone(),
        backend,
        accounts,
    });

    // Build router.
    let app = routes::build_router(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    // Start server.
    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port).parse()?;
    info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
