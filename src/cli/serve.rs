//! HTTP server command handler.

use std::net::SocketAddr;

use color_eyre::Result;

use crate::api::build_router;
use crate::config::Config;
use crate::context::Context;

use super::App;

impl App {
    /// Run the REST API until interrupted.
    pub async fn run_serve(&self, host: Option<&str>, port: Option<u16>) -> Result<()> {
        tracing::info!("Starting Bookgraph HTTP server");

        let config = Config::load()?;
        let host = host.unwrap_or(config.server.host.as_str()).to_string();
        let port = port.unwrap_or(config.server.port);
        tracing::info!(
            id_strategy = ?config.store.id_strategy,
            retries = config.store.retries,
            "Loaded configuration"
        );

        let ctx = Context::connect(config).await?;
        let app = build_router(ctx);

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .map_err(|e| color_eyre::eyre::eyre!("Invalid address {}:{}: {}", host, port, e))?;

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| color_eyre::eyre::eyre!("Failed to bind to {}: {}", addr, e))?;

        tracing::info!("Bookgraph HTTP server listening on http://{}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "HTTP server error");
                color_eyre::eyre::eyre!("HTTP server error: {}", e)
            })?;

        tracing::info!("HTTP server shutting down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
