//! TelecomPredict HTTP Server Binary
//!
//! This is the main entry point for the TelecomPredict REST API server.
//! It initializes the repository, seeds the demo dataset, wires up the
//! auth service, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository and default config
//! cargo run --bin telepredict-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)
//!
//! Repository and session-store settings come from `telepredict.toml` when
//! present; otherwise a seeded in-memory repository with a volatile session
//! store is used.

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use telepredict::auth::{AuthService, FileSessionStore, MemorySessionStore, SessionStore};
use telepredict::db::{self, RepositoryConfig, SessionStoreKind};
use telepredict::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting TelecomPredict HTTP Server");

    // Initialize global repository once and reuse it across the app
    db::init_repository().await?;
    let repository = Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    // Session store per config; init_repository already validated the file
    // if one exists, so a missing config just means defaults.
    let config = RepositoryConfig::from_default_location().unwrap_or_default();
    let sessions: Arc<dyn SessionStore> = match config.session_store_kind()? {
        SessionStoreKind::Memory => Arc::new(MemorySessionStore::new()),
        SessionStoreKind::File => {
            let path = config.session_file_path();
            let store = FileSessionStore::open(path)
                .with_context(|| format!("Failed to open session store at {}", path))?;
            info!(path = %path, "using file-backed session store");
            Arc::new(store)
        }
    };
    let auth = AuthService::new(Arc::clone(&repository), sessions);

    // Create application state
    let state = AppState::new(repository, auth);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
