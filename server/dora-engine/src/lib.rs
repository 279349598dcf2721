//! DORA Delivery Metrics Engine — deterministic, rule-based.
//!
//! Consumes deployment/incident snapshots plus a reporting window, filters to
//! the window, computes the four DORA metrics (deployment frequency, lead
//! time for changes, MTTR, change failure rate), classifies them against the
//! research thresholds, and assembles a structured MetricsReport.
//!
//! No AI, no DB, no network; pure computation on in-memory collections. All
//! functions are stateless and safe to call concurrently on independent
//! snapshots.

pub mod calculator;
pub mod classify;
pub mod error;
pub mod quality;
pub mod report;
pub mod types;
pub mod window;

pub use calculator::compute_all;
pub use classify::PerformanceTier;
pub use error::EngineError;
pub use report::MetricsReport;
pub use types::{Deployment, DoraMetrics, Incident, MetricsRequest, TimeRange};
pub use window::filter_by_window;
