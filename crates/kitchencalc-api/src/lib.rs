mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::{get, post};
use axum::Router;
use kitchencalc_core::Engine;
use tokio::net::TcpListener;
use tracing::info;

pub use routes::ErrorBody;
pub use state::AppState;

/// Environment variable holding the listen address.
pub const BIND_ENV: &str = "KITCHENCALC_BIND";
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

pub fn router(engine: Engine) -> Router {
    let app_state = Arc::new(AppState::new(engine));

    Router::new()
        .route("/health", get(routes::health))
        .route("/converters", get(routes::converters))
        .route("/calculate", post(routes::calculate))
        .route("/tables/{name}", get(routes::table))
        .with_state(app_state)
}

/// `explicit`, else `$KITCHENCALC_BIND`, else `0.0.0.0:3000`.
pub fn bind_address(explicit: Option<SocketAddr>) -> Result<SocketAddr> {
    if let Some(addr) = explicit {
        return Ok(addr);
    }
    let raw = std::env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.to_string());
    raw.parse()
        .with_context(|| format!("invalid {BIND_ENV} address '{raw}'"))
}

pub async fn serve(addr: SocketAddr, engine: Engine) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router(engine).into_make_service()).await?;
    Ok(())
}
