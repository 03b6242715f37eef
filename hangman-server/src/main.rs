use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

use hangman_core::{HangmanManager, WordBank};
use hangman_persistence::JsonFileStore;
use hangman_server::{
    audit::AuditLog, config::Config, create_routes, hangman_service::HangmanService,
};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting hangman server...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Loading hangman words from {}", config.hangman_file);
    let word_bank = WordBank::load(Box::new(JsonFileStore::new(&config.hangman_file)));

    let mut manager = HangmanManager::new(word_bank);
    manager.add_event_handler(Box::new(AuditLog));
    let service = Arc::new(HangmanService::new(manager));

    let routes = create_routes(service);

    let (addr, server) = match warp::serve(routes)
        .try_bind_with_graceful_shutdown(config.socket_addr(), shutdown_signal())
    {
        Ok(bound) => bound,
        Err(e) => {
            error!("Failed to bind {}: {}", config.socket_addr(), e);
            std::process::exit(1);
        }
    };

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
}

// Resolves on SIGINT (Ctrl+C), or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
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
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }
}
