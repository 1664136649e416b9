//! DASOS Web Server
//!
//! Run with: cargo run -p dasos-web

use std::net::SocketAddr;

use dasos_config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting DASOS web server...");

    let config = Config::load()?;
    let addr: SocketAddr = config.server.bind_addr.parse()?;
    info!(
        api = %config.api.base_url,
        mock_data = config.api.use_mock_data,
        catalog = %config.catalog.base_url,
        "Configuration loaded"
    );

    let state = dasos_web::state::AppState::from_config(config)?;
    let app = dasos_web::router::build_router(state);

    info!("Server listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
