// SPDX-FileCopyrightText: 2026 Solace Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `solace serve` command implementation.
//!
//! Starts the journal server: SQLite storage, the Qwen completion client,
//! the exchange coordinator, and the HTTP boundary. Supports graceful
//! shutdown via signal handlers.

use std::sync::Arc;

use solace_config::model::SolaceConfig;
use solace_core::{JournalStore, SolaceError};
use solace_exchange::ExchangeCoordinator;
use solace_qwen::QwenClient;
use solace_server::{install_signal_handler, start_server, AppState};
use solace_storage::SqliteJournal;
use tracing::{error, info};

/// Runs the `solace serve` command.
///
/// Wires storage, completion client, and coordinator into the HTTP server
/// and blocks until a shutdown signal arrives. Storage is checkpointed and
/// closed on the way out.
pub async fn run_serve(config: SolaceConfig) -> Result<(), SolaceError> {
    // Initialize tracing subscriber.
    init_tracing(&config.service.log_level);

    info!("starting solace serve");

    // Initialize storage.
    let store = {
        let store = SqliteJournal::new(config.storage.clone());
        store.initialize().await?;
        Arc::new(store)
    };

    // Initialize the Qwen completion client.
    let backend = {
        let client = QwenClient::new(&config.qwen).map_err(|e| {
            error!(error = %e, "failed to initialize Qwen client");
            eprintln!(
                "error: Qwen API key required. Set via: config or SOLACE_QWEN_API_KEY env var"
            );
            e
        })?;
        info!(model = client.model(), "completion client ready");
        Arc::new(client)
    };

    let coordinator = Arc::new(ExchangeCoordinator::new(
        store.clone() as Arc<dyn JournalStore>,
        backend,
        &config.exchange,
    ));

    let state = AppState {
        store: store.clone(),
        coordinator,
    };

    // Install signal handler and serve until shutdown.
    let cancel = install_signal_handler();
    start_server(&config.server, state, cancel).await?;

    // Checkpoint and close storage.
    store.close().await?;

    info!("solace serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("solace={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
