// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::error::Error;

use relational_authorizer::{
    api::router,
    auth::{https_client, Authorizer, KeyResolver},
    config::{AuthorizerConfig, LogFormat, DEFAULT_LOG_FILTER},
    state::AppState,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AuthorizerConfig::from_env()?;
    init_tracing(config.log_format);

    // Install the ring crypto provider for rustls (must be done before any TLS operations)
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        tracing::debug!("rustls crypto provider already installed");
    }

    if config.allowed_issuers.is_empty() {
        tracing::warn!("ALLOWED_ISSUERS is empty; every request will be rejected");
    }
    tracing::info!(
        allowed_issuers = ?config.allowed_issuers.iter().collect::<Vec<_>>(),
        key_selection = ?config.key_selection,
        deadline_secs = config.deadline.as_secs(),
        "Authorizer configured"
    );

    let client = https_client()?;
    let resolver = KeyResolver::new(client).with_selection(config.key_selection);
    let authorizer = Authorizer::new(config.allowed_issuers, resolver);

    let state = AppState::new(authorizer).with_deadline(config.deadline);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Relational Authorizer listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Relational Authorizer stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
