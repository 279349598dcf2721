//! Delivery Metrics API
//!
//! HTTP service exposing DORA metrics over an in-memory deployment/incident
//! snapshot store. All computation lives in dora-engine; this crate is
//! routing, validation, and the store.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;
pub mod state;
pub mod types;

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/api/v1/metrics/dora", get(handlers::dora_report))
    .route(
      "/api/v1/metrics/dora/deployment-frequency",
      get(handlers::deployment_frequency),
    )
    .route("/api/v1/metrics/dora/lead-time", get(handlers::lead_time))
    .route("/api/v1/metrics/dora/mttr", get(handlers::mttr))
    .route(
      "/api/v1/metrics/dora/change-failure-rate",
      get(handlers::change_failure_rate),
    )
    .route(
      "/api/v1/deployments",
      post(handlers::create_deployment).get(handlers::list_deployments),
    )
    .route(
      "/api/v1/incidents",
      post(handlers::create_incident).get(handlers::list_incidents),
    )
    .route("/api/v1/incidents/:id/resolve", post(handlers::resolve_incident))
    .route("/api/v1/state", get(handlers::list_state))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
