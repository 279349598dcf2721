//! Report assembly: metrics + classification + rollup in one flat envelope.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::calculator;
use crate::classify::{self, PerformanceTier};
use crate::error::EngineError;
use crate::types::{DataQuality, Deployment, Incident, TimeRange};
use crate::window::filter_by_window;

/// The full delivery-performance report for one window, shaped for direct
/// serialization by any transport.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsReport {
  /// Successful deployments per day.
  pub deployment_frequency: f64,
  /// Humanized average lead time, e.g. "2h30m".
  pub lead_time: String,
  pub lead_time_seconds: i64,
  /// Humanized mean time to recovery.
  pub mttr: String,
  pub mttr_seconds: i64,
  pub change_failure_rate: f64,
  pub classification: BTreeMap<&'static str, PerformanceTier>,
  pub overall_performance: PerformanceTier,
  pub time_range: TimeRange,
  pub data_quality: DataQuality,
  /// Entities that fell inside the window.
  pub deployments_count: usize,
  pub incidents_count: usize,
  pub generated_at: DateTime<Utc>,
}

impl MetricsReport {
  /// Compute all metrics over the window and assemble the report.
  pub fn build(
    deployments: &[Deployment],
    incidents: &[Incident],
    range: &TimeRange,
  ) -> Result<Self, EngineError> {
    let metrics = calculator::compute_all(deployments, incidents, range)?;
    let classification = classify::classify(&metrics);
    let overall_performance = classify::overall_tier(&classification);

    Ok(Self {
      deployment_frequency: metrics.deployment_frequency,
      lead_time: humanize_duration(metrics.lead_time),
      lead_time_seconds: metrics.lead_time.num_seconds(),
      mttr: humanize_duration(metrics.mttr),
      mttr_seconds: metrics.mttr.num_seconds(),
      change_failure_rate: metrics.change_failure_rate,
      classification,
      overall_performance,
      time_range: metrics.time_range,
      data_quality: metrics.data_quality,
      deployments_count: filter_by_window(deployments, range).len(),
      incidents_count: filter_by_window(incidents, range).len(),
      generated_at: metrics.calculated_at,
    })
  }
}

/// Compact duration formatting for dashboards: "2h30m", "45m10s", "12s".
/// Negative durations render as zero.
pub fn humanize_duration(d: Duration) -> String {
  let total = d.num_seconds().max(0);
  let hours = total / 3600;
  let minutes = (total % 3600) / 60;
  let seconds = total % 60;

  if hours > 0 {
    format!("{}h{}m", hours, minutes)
  } else if minutes > 0 {
    format!("{}m{}s", minutes, seconds)
  } else {
    format!("{}s", seconds)
  }
}
