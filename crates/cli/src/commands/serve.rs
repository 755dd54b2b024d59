use std::sync::Arc;

use anyhow::Result;
use city_explorer_core::{DEFAULT_PORT, env_parse_with_default};
use city_explorer_http::{AppState, create_router};
use city_explorer_service::Coordinator;

pub(crate) async fn run(coordinator: Coordinator, port: Option<u16>, host: String) -> Result<()> {
    let port = port.unwrap_or_else(|| env_parse_with_default("PORT", DEFAULT_PORT));
    let router = create_router(Arc::new(AppState::new(coordinator)));

    let addr = format!("{host}:{port}");
    tracing::info!("Starting HTTP server on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).with_graceful_shutdown(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
