//! Reporting-window filter, shared by deployments and incidents.

use chrono::{DateTime, Utc};

use crate::types::{Deployment, Incident, TimeRange};

/// Anything placed on the timeline by its start instant.
pub trait Windowed {
  fn start_time(&self) -> DateTime<Utc>;
}

impl Windowed for Deployment {
  fn start_time(&self) -> DateTime<Utc> {
    self.start_time
  }
}

impl Windowed for Incident {
  fn start_time(&self) -> DateTime<Utc> {
    self.start_time
  }
}

/// Keep entities whose start time falls strictly inside the window. Entities
/// starting exactly on either bound are excluded (see TimeRange::contains).
pub fn filter_by_window<E: Windowed + Clone>(entities: &[E], range: &TimeRange) -> Vec<E> {
  entities
    .iter()
    .filter(|e| range.contains(e.start_time()))
    .cloned()
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{DeploymentStatus, IncidentSeverity};
  use chrono::{TimeZone, Utc};
  use std::collections::HashMap;

  fn ts(day: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, h, 0, 0).unwrap()
  }

  fn deployment(id: &str, start: DateTime<Utc>) -> Deployment {
    Deployment {
      id: id.into(),
      service: "api".into(),
      environment: "prod".into(),
      status: DeploymentStatus::Success,
      start_time: start,
      end_time: None,
      commit_sha: "abc".into(),
      commit_time: start,
      author: String::new(),
      repository: String::new(),
      branch: String::new(),
      tags: HashMap::new(),
    }
  }

  fn incident(id: &str, start: DateTime<Utc>) -> Incident {
    Incident {
      id: id.into(),
      title: "outage".into(),
      description: String::new(),
      service: "api".into(),
      environment: "prod".into(),
      severity: IncidentSeverity::High,
      start_time: start,
      resolved_time: None,
      tags: HashMap::new(),
    }
  }

  #[test]
  fn keeps_only_entities_inside_window() {
    let range = TimeRange::new(ts(10, 0), ts(12, 0));
    let deployments = vec![
      deployment("before", ts(9, 12)),
      deployment("inside", ts(11, 6)),
      deployment("after", ts(12, 6)),
    ];
    let kept = filter_by_window(&deployments, &range);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "inside");
  }

  #[test]
  fn boundary_start_times_are_excluded() {
    let range = TimeRange::new(ts(10, 0), ts(12, 0));
    let deployments = vec![
      deployment("at-start", ts(10, 0)),
      deployment("at-end", ts(12, 0)),
    ];
    assert!(filter_by_window(&deployments, &range).is_empty());
  }

  #[test]
  fn filters_incidents_identically() {
    let range = TimeRange::new(ts(10, 0), ts(12, 0));
    let incidents = vec![
      incident("at-start", ts(10, 0)),
      incident("inside", ts(11, 0)),
    ];
    let kept = filter_by_window(&incidents, &range);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "inside");
  }

  #[test]
  fn inputs_are_untouched() {
    let range = TimeRange::new(ts(10, 0), ts(12, 0));
    let deployments = vec![deployment("inside", ts(11, 0))];
    let _ = filter_by_window(&deployments, &range);
    assert_eq!(deployments.len(), 1);
  }
}
