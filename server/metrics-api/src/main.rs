//! Binary entrypoint for the metrics API.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use metrics_api::{router, AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let config = Config::from_env()?;
  let state = Arc::new(AppState::new());
  let app = router(state);

  let addr = config.addr();
  tracing::info!(%addr, "metrics-api listening");

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
