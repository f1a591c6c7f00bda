use anyhow::{Context, Result};
use kitchencalc_api::{bind_address, serve};
use kitchencalc_core::{Engine, EngineConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let config = EngineConfig::resolve(None).context("failed to load engine configuration")?;
    let engine = Engine::new(config).context("invalid engine configuration")?;
    serve(bind_address(None)?, engine).await
}
