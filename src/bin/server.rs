//! Pensum Engine HTTP Server Binary
//!
//! Loads the pensum rule tables and serves the evaluation API.
//!
//! # Usage
//!
//! ```bash
//! PENSUM_CONFIG_DIR=./config/pensum PORT=8080 cargo run --bin pensum-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `PENSUM_CONFIG_DIR`: Directory of the YAML rule tables (default: ./config/pensum)
//! - `RUST_LOG`: Log filter (default: info)

use std::env;
use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pensum_engine::api::{AppState, create_router};
use pensum_engine::config::ConfigLoader;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting Pensum Engine HTTP Server");

    let config_dir = env::var("PENSUM_CONFIG_DIR").unwrap_or_else(|_| "./config/pensum".to_string());
    let loader = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading pensum configuration from {}", config_dir))?;
    info!(config_dir = %config_dir, "Configuration loaded");

    let app = create_router(AppState::new(loader));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
