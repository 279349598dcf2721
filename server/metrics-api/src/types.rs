//! Request/response types for the metrics API (JSON contract with callers).

use chrono::{DateTime, Utc};
use dora_engine::types::{DeploymentStatus, IncidentSeverity};
use dora_engine::{Deployment, Incident};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;

// ---------------------------------------------------------------------------
// Ingestion payloads
// ---------------------------------------------------------------------------

/// Inbound deployment event. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DeploymentPayload {
  #[serde(default)]
  pub id: Option<String>,
  pub service: String,
  pub environment: String,
  pub status: String,
  #[serde(default)]
  pub started_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub ended_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub commit_sha: String,
  #[serde(default)]
  pub commit_time: Option<DateTime<Utc>>,
  #[serde(default)]
  pub author: String,
  #[serde(default)]
  pub repository: String,
  #[serde(default)]
  pub branch: String,
  #[serde(default)]
  pub tags: HashMap<String, String>,
}

impl DeploymentPayload {
  /// Validate and normalize into a domain Deployment. Missing timestamps
  /// default to `now`; a missing id gets a fresh UUID.
  pub fn into_deployment(self, now: DateTime<Utc>) -> Result<Deployment, ApiError> {
    if self.service.is_empty() {
      return Err(ApiError::validation("service", "must not be empty"));
    }
    if self.environment.is_empty() {
      return Err(ApiError::validation("environment", "must not be empty"));
    }
    let status = DeploymentStatus::from_str_loose(&self.status).ok_or_else(|| {
      ApiError::validation("status", "expected pending|running|success|failed|cancelled")
    })?;

    let start_time = self.started_at.unwrap_or(now);
    Ok(Deployment {
      id: self
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string()),
      service: self.service,
      environment: self.environment,
      status,
      start_time,
      end_time: self.ended_at,
      commit_sha: self.commit_sha,
      commit_time: self.commit_time.unwrap_or(start_time),
      author: self.author,
      repository: self.repository,
      branch: self.branch,
      tags: self.tags,
    })
  }
}

/// Inbound incident event.
#[derive(Debug, Clone, Deserialize)]
pub struct IncidentPayload {
  #[serde(default)]
  pub id: Option<String>,
  pub title: String,
  #[serde(default)]
  pub description: String,
  pub service: String,
  pub environment: String,
  pub severity: String,
  #[serde(default)]
  pub started_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub resolved_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub tags: HashMap<String, String>,
}

impl IncidentPayload {
  pub fn into_incident(self, now: DateTime<Utc>) -> Result<Incident, ApiError> {
    if self.title.is_empty() {
      return Err(ApiError::validation("title", "must not be empty"));
    }
    if self.service.is_empty() {
      return Err(ApiError::validation("service", "must not be empty"));
    }
    if self.environment.is_empty() {
      return Err(ApiError::validation("environment", "must not be empty"));
    }
    let severity = IncidentSeverity::from_str_loose(&self.severity)
      .ok_or_else(|| ApiError::validation("severity", "expected low|medium|high|critical"))?;

    Ok(Incident {
      id: self
        .id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string()),
      title: self.title,
      description: self.description,
      service: self.service,
      environment: self.environment,
      severity,
      start_time: self.started_at.unwrap_or(now),
      resolved_time: self.resolved_at,
      tags: self.tags,
    })
  }
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ScalarMetric {
  pub value: f64,
  pub unit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DurationMetric {
  /// Humanized, e.g. "2h30m".
  pub value: String,
  pub seconds: i64,
  pub unit: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DeploymentList {
  pub deployments: Vec<Deployment>,
  pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct IncidentList {
  pub incidents: Vec<Incident>,
  pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct StateSnapshot {
  pub deployments: Vec<Deployment>,
  pub incidents: Vec<Incident>,
}

#[derive(Debug, Serialize)]
pub struct ResolveResponse {
  pub resolved_at: DateTime<Utc>,
}
