//! MaxFit gateway
//!
//! - Plan-gated dashboard pages (`/dashboard/...`)
//! - Profile update API
//! - Ops endpoints (`/healthz`, `/metrics`)
//!
//! Config path comes from `MAXFIT_CONFIG` (default `maxfit.yaml`).

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use maxfit_gateway::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::var("MAXFIT_CONFIG").unwrap_or_else(|_| "maxfit.yaml".to_string());
    let cfg = config::load_from_file(&path).map_err(|e| {
        tracing::error!(%path, error = %e, "config load failed");
        e
    })?;
    let listen: SocketAddr = cfg.server.listen.parse()?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, "maxfit-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen).await?;

    axum::serve(listener, app).await?;
    Ok(())
}
