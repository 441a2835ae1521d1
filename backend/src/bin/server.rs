//! WindOps HTTP Server Binary
//!
//! This is the main entry point for the WindOps REST API server.
//! It loads the analysis configuration, sets up the HTTP router, and
//! starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin windops-server --features http-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use windops_rust::config::AnalysisConfig;
use windops_rust::http::{create_router, AppState};
use windops_rust::store::SessionStore;

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
        .init();

    info!("Starting WindOps HTTP Server");

    let config = AnalysisConfig::from_default_location();
    info!(
        "Analysis config loaded (cut-in {} m/s, cut-out {} m/s)",
        config.cut_in_speed.value(),
        config.cut_out_speed.value()
    );

    // Create application state
    let state = AppState::new(SessionStore::new(), config);

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

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
