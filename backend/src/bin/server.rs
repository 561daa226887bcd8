//! Pilates dashboard HTTP server.
//!
//! Builds the document repository once, sets up the HTTP router and serves
//! requests until interrupted.
//!
//! # Usage
//!
//! ```bash
//! # In-memory repository seeded from a JSON file (default)
//! LOCAL_SEED_FILE=data/seed.json cargo run --bin pilates-server
//!
//! # MongoDB repository
//! MONGO_URI=mongodb://localhost:27017 \
//!   cargo run --bin pilates-server --features "mongo-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_CONFIG`: Path to a `repository.toml`
//! - `REPOSITORY_TYPE`: `local` or `mongo` when no config file is used
//! - `MONGO_URI` / `MONGODB_URI`: MongoDB connection string
//! - `LOCAL_SEED_FILE`: JSON seed for the in-memory repository
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use pilates_viz::db::RepositoryFactory;
use pilates_viz::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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

    info!("Starting Pilates dashboard server");

    let repository = RepositoryFactory::resolve().await?;
    info!("Repository initialized ({})", repository.backend_name());

    let state = AppState::new(repository.clone());
    let app = create_router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    repository.shutdown().await?;
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
