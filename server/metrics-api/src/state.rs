//! Shared in-memory snapshot store.
//!
//! Holds the ingested deployments and incidents behind RwLocks so metric
//! handlers read a consistent snapshot while ingestion appends concurrently.
//! Persistence is a separate collaborator; this service keeps everything in
//! memory.

use dora_engine::{Deployment, Incident};
use tokio::sync::RwLock;

pub struct AppState {
  pub deployments: RwLock<Vec<Deployment>>,
  pub incidents: RwLock<Vec<Incident>>,
}

impl AppState {
  pub fn new() -> Self {
    Self {
      deployments: RwLock::new(Vec::new()),
      incidents: RwLock::new(Vec::new()),
    }
  }
}

impl Default for AppState {
  fn default() -> Self {
    Self::new()
  }
}
