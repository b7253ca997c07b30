use anyhow::Context;
use product_api::config::ConfigService;
use product_api::lifecycle::shutdown_signal;
use product_api::session::SessionFactory;
use product_api::{AppState, app, database, logging};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigService::new();
    logging::init(&config)?;
    if let Some(path) = config.env_file() {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    tracing::info!("🚀 Starting Product API...");

    let conn = database::connect(&config)
        .await
        .context("failed to connect to the database")?;
    database::ensure_schema(&conn)
        .await
        .context("failed to prepare the database schema")?;

    let state = AppState::new(SessionFactory::new(conn));
    let router = app(state);

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!("✅ HTTP server listening on {}", addr);

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("🛑 Initiating graceful shutdown...");
    })
    .await?;

    tracing::info!("👋 Server stopped");
    Ok(())
}
