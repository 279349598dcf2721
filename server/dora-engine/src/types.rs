//! Core types for the metrics engine (JSON contracts + domain models).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Status / severity enums (closed variants, loose string parsing at the edge)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentStatus {
  Pending,
  Running,
  Success,
  Failed,
  Cancelled,
}

impl DeploymentStatus {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "pending" => Some(Self::Pending),
      "running" | "in_progress" => Some(Self::Running),
      "success" | "succeeded" => Some(Self::Success),
      "failed" | "failure" => Some(Self::Failed),
      "cancelled" | "canceled" => Some(Self::Cancelled),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentSeverity {
  Low,
  Medium,
  High,
  Critical,
}

impl IncidentSeverity {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.to_ascii_lowercase().as_str() {
      "low" => Some(Self::Low),
      "medium" | "med" => Some(Self::Medium),
      "high" => Some(Self::High),
      "critical" | "crit" => Some(Self::Critical),
      _ => None,
    }
  }
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

/// One deployment attempt. Immutable after ingestion except status/end_time
/// transitions as the deployment progresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deployment {
  pub id: String,
  pub service: String,
  pub environment: String,
  pub status: DeploymentStatus,
  pub start_time: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub end_time: Option<DateTime<Utc>>,
  pub commit_sha: String,
  pub commit_time: DateTime<Utc>,
  #[serde(default)]
  pub author: String,
  #[serde(default)]
  pub repository: String,
  #[serde(default)]
  pub branch: String,
  #[serde(default, skip_serializing_if = "HashMap::is_empty")]
  pub tags: HashMap<String, String>,
}

impl Deployment {
  pub fn is_successful(&self) -> bool {
    self.status == DeploymentStatus::Success
  }

  pub fn is_failed(&self) -> bool {
    self.status == DeploymentStatus::Failed
  }

  /// Commit-to-production time. Zero when the deployment has not finished.
  pub fn lead_time(&self) -> Duration {
    match self.end_time {
      Some(end) => end - self.commit_time,
      None => Duration::zero(),
    }
  }

  /// Wall-clock duration of the deployment itself. Zero when unfinished.
  pub fn duration(&self) -> Duration {
    match self.end_time {
      Some(end) => end - self.start_time,
      None => Duration::zero(),
    }
  }
}

// ---------------------------------------------------------------------------
// Incident
// ---------------------------------------------------------------------------

/// A service disruption. Created open; transitions once to resolved (the
/// once-only rule is enforced by the ingestion layer — from here the
/// resolved_time is read-only).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub description: String,
  pub service: String,
  pub environment: String,
  pub severity: IncidentSeverity,
  pub start_time: DateTime<Utc>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub resolved_time: Option<DateTime<Utc>>,
  #[serde(default, skip_serializing_if = "HashMap::is_empty")]
  pub tags: HashMap<String, String>,
}

impl Incident {
  pub fn is_resolved(&self) -> bool {
    self.resolved_time.is_some()
  }

  /// Start-to-resolution time. Zero while the incident is open.
  pub fn time_to_recovery(&self) -> Duration {
    match self.resolved_time {
      Some(resolved) => resolved - self.start_time,
      None => Duration::zero(),
    }
  }
}

// ---------------------------------------------------------------------------
// TimeRange
// ---------------------------------------------------------------------------

/// Reporting window. Both bounds are exclusive: an instant equal to start or
/// end is outside the window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
  pub start: DateTime<Utc>,
  pub end: DateTime<Utc>,
}

impl TimeRange {
  pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
    Self { start, end }
  }

  /// Strictly exclusive bounds test: start < t < end.
  pub fn contains(&self, t: DateTime<Utc>) -> bool {
    self.start < t && t < self.end
  }

  pub fn duration(&self) -> Duration {
    self.end - self.start
  }

  /// Fractional days spanned. May be zero or negative for degenerate ranges;
  /// callers guard before dividing by it.
  pub fn days(&self) -> f64 {
    self.duration().num_milliseconds() as f64 / 3_600_000.0 / 24.0
  }
}

// ---------------------------------------------------------------------------
// Data quality
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
  High,
  Medium,
  Low,
}

// ---------------------------------------------------------------------------
// Computed metrics
// ---------------------------------------------------------------------------

/// The four DORA metrics over one reporting window. Durations serialize as
/// whole seconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoraMetrics {
  /// Successful deployments per day.
  pub deployment_frequency: f64,
  /// Average commit-to-production time.
  #[serde(with = "duration_secs")]
  pub lead_time: Duration,
  /// Average incident start-to-resolution time.
  #[serde(with = "duration_secs")]
  pub mttr: Duration,
  /// Ratio of changes causing degradation (0.15 = 15%; the correlation
  /// heuristic can push it past 1 on overlapping failures).
  pub change_failure_rate: f64,
  pub time_range: TimeRange,
  pub calculated_at: DateTime<Utc>,
  pub data_quality: DataQuality,
}

mod duration_secs {
  use chrono::Duration;
  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S: Serializer>(d: &Duration, ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_i64(d.num_seconds())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Duration, D::Error> {
    Ok(Duration::seconds(i64::deserialize(de)?))
  }
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// One inbound request line from stdin: a full snapshot plus the window.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsRequest {
  #[serde(default)]
  pub deployments: Vec<Deployment>,
  #[serde(default)]
  pub incidents: Vec<Incident>,
  pub time_range: TimeRange,
}

impl MetricsRequest {
  /// Reject windows the caller should never hand us. The calculators stay
  /// total over degenerate ranges regardless; this only fails fast at the
  /// stream boundary.
  pub fn validate(&self) -> Result<(), EngineError> {
    if self.time_range.end <= self.time_range.start {
      return Err(EngineError::validation(
        "time_range",
        "end must be after start",
      ));
    }
    Ok(())
  }
}

/// Structured error output for invalid input lines.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn ts(h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, h, m, 0).unwrap()
  }

  #[test]
  fn contains_excludes_both_bounds() {
    let range = TimeRange::new(ts(10, 0), ts(12, 0));
    assert!(!range.contains(ts(10, 0)));
    assert!(!range.contains(ts(12, 0)));
    assert!(range.contains(ts(10, 1)));
    assert!(range.contains(ts(11, 59)));
  }

  #[test]
  fn days_handles_fractions_and_inversion() {
    let range = TimeRange::new(ts(0, 0), ts(12, 0));
    assert!((range.days() - 0.5).abs() < 1e-9);

    let inverted = TimeRange::new(ts(12, 0), ts(0, 0));
    assert!(inverted.days() < 0.0);

    let empty = TimeRange::new(ts(6, 0), ts(6, 0));
    assert_eq!(empty.days(), 0.0);
  }

  #[test]
  fn lead_time_zero_without_end_time() {
    let dep = Deployment {
      id: "d1".into(),
      service: "api".into(),
      environment: "prod".into(),
      status: DeploymentStatus::Running,
      start_time: ts(10, 0),
      end_time: None,
      commit_sha: "abc123".into(),
      commit_time: ts(9, 0),
      author: String::new(),
      repository: String::new(),
      branch: String::new(),
      tags: HashMap::new(),
    };
    assert_eq!(dep.lead_time(), Duration::zero());
    assert_eq!(dep.duration(), Duration::zero());
    assert!(!dep.is_successful());
    assert!(!dep.is_failed());
  }

  #[test]
  fn recovery_time_zero_while_open() {
    let inc = Incident {
      id: "i1".into(),
      title: "API down".into(),
      description: String::new(),
      service: "api".into(),
      environment: "prod".into(),
      severity: IncidentSeverity::High,
      start_time: ts(10, 0),
      resolved_time: None,
      tags: HashMap::new(),
    };
    assert!(!inc.is_resolved());
    assert_eq!(inc.time_to_recovery(), Duration::zero());
  }

  #[test]
  fn status_parses_loosely() {
    assert_eq!(
      DeploymentStatus::from_str_loose("Succeeded"),
      Some(DeploymentStatus::Success)
    );
    assert_eq!(
      DeploymentStatus::from_str_loose("canceled"),
      Some(DeploymentStatus::Cancelled)
    );
    assert_eq!(DeploymentStatus::from_str_loose("exploded"), None);
    assert_eq!(
      IncidentSeverity::from_str_loose("CRIT"),
      Some(IncidentSeverity::Critical)
    );
  }

  #[test]
  fn request_validation_rejects_inverted_window() {
    let req = MetricsRequest {
      deployments: Vec::new(),
      incidents: Vec::new(),
      time_range: TimeRange::new(ts(12, 0), ts(10, 0)),
    };
    let err = req.validate().unwrap_err();
    assert!(err.to_string().contains("time_range"));
  }
}
