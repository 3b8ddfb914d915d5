//! Server lifecycle.

use std::sync::Arc;

use anyhow::{Context, Result};
use tax_advisor::{OpenAiClient, TaxAdvisor};
use tax_core::IncomeTaxCalculator;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Builds the shared state from `config`. The completion client is created
/// here, once, and shared by every request.
pub fn build_state(config: &AppConfig) -> AppState {
    let client = OpenAiClient::new(config.openai.clone());
    let advisor = TaxAdvisor::new(Arc::new(client), config.advisor.clone());

    AppState::new(IncomeTaxCalculator::standard(), advisor)
}

/// Binds `config.addr` and serves until Ctrl-C.
pub async fn run(config: AppConfig) -> Result<()> {
    let app = create_router(build_state(&config));

    info!(
        ip = %config.addr.ip(),
        port = config.addr.port(),
        model = %config.advisor.model,
        "Server starting up"
    );

    let listener = TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server terminated unexpectedly")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(error) => {
            warn!(?error, "cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}
