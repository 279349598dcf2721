//! Performance classification against the DORA research thresholds.

use std::collections::BTreeMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::types::DoraMetrics;

pub const METRIC_DEPLOYMENT_FREQUENCY: &str = "deployment_frequency";
pub const METRIC_LEAD_TIME: &str = "lead_time";
pub const METRIC_MTTR: &str = "mttr";
pub const METRIC_CHANGE_FAILURE_RATE: &str = "change_failure_rate";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
  Elite,
  High,
  Medium,
  Low,
}

/// Per-metric tiers from four independent threshold ladders, evaluated
/// top-down; first matching threshold wins.
pub fn classify(metrics: &DoraMetrics) -> BTreeMap<&'static str, PerformanceTier> {
  let mut classification = BTreeMap::new();
  classification.insert(
    METRIC_DEPLOYMENT_FREQUENCY,
    frequency_tier(metrics.deployment_frequency),
  );
  classification.insert(METRIC_LEAD_TIME, lead_time_tier(metrics.lead_time));
  classification.insert(METRIC_MTTR, mttr_tier(metrics.mttr));
  classification.insert(
    METRIC_CHANGE_FAILURE_RATE,
    failure_rate_tier(metrics.change_failure_rate),
  );
  classification
}

/// Deployments per day: >= 1 daily, >= 0.14 weekly, >= 0.033 monthly.
fn frequency_tier(per_day: f64) -> PerformanceTier {
  if per_day >= 1.0 {
    PerformanceTier::Elite
  } else if per_day >= 0.14 {
    PerformanceTier::High
  } else if per_day >= 0.033 {
    PerformanceTier::Medium
  } else {
    PerformanceTier::Low
  }
}

/// Lead time: <= a day, <= a week, <= a month.
fn lead_time_tier(lead_time: Duration) -> PerformanceTier {
  let hours = lead_time.num_seconds() as f64 / 3600.0;
  if hours <= 24.0 {
    PerformanceTier::Elite
  } else if hours <= 168.0 {
    PerformanceTier::High
  } else if hours <= 720.0 {
    PerformanceTier::Medium
  } else {
    PerformanceTier::Low
  }
}

/// MTTR: <= an hour, <= a day, <= a week.
fn mttr_tier(mttr: Duration) -> PerformanceTier {
  let hours = mttr.num_seconds() as f64 / 3600.0;
  if hours <= 1.0 {
    PerformanceTier::Elite
  } else if hours <= 24.0 {
    PerformanceTier::High
  } else if hours <= 168.0 {
    PerformanceTier::Medium
  } else {
    PerformanceTier::Low
  }
}

/// Change failure rate: <= 15%, <= 20%, <= 30%.
fn failure_rate_tier(rate: f64) -> PerformanceTier {
  if rate <= 0.15 {
    PerformanceTier::Elite
  } else if rate <= 0.20 {
    PerformanceTier::High
  } else if rate <= 0.30 {
    PerformanceTier::Medium
  } else {
    PerformanceTier::Low
  }
}

/// Roll the four per-metric tiers into one overall tier.
///
/// Evaluated in this order: 3+ Elite wins, then 3+ Elite/High, then 3+ Low.
/// With only four metrics, ties and mixed spreads fall through to Medium —
/// that is the default bucket, not an error.
pub fn overall_tier(classification: &BTreeMap<&'static str, PerformanceTier>) -> PerformanceTier {
  let count =
    |tier: PerformanceTier| classification.values().filter(|&&t| t == tier).count();

  let elite = count(PerformanceTier::Elite);
  let high = count(PerformanceTier::High);
  let low = count(PerformanceTier::Low);

  if elite >= 3 {
    PerformanceTier::Elite
  } else if elite + high >= 3 {
    PerformanceTier::High
  } else if low >= 3 {
    PerformanceTier::Low
  } else {
    PerformanceTier::Medium
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{DataQuality, TimeRange};
  use chrono::{TimeZone, Utc};

  fn metrics(freq: f64, lead_secs: i64, mttr_secs: i64, cfr: f64) -> DoraMetrics {
    let start = Utc.with_ymd_and_hms(2025, 3, 1, 0, 0, 0).unwrap();
    DoraMetrics {
      deployment_frequency: freq,
      lead_time: Duration::seconds(lead_secs),
      mttr: Duration::seconds(mttr_secs),
      change_failure_rate: cfr,
      time_range: TimeRange::new(start, start + Duration::days(30)),
      calculated_at: start,
      data_quality: DataQuality::High,
    }
  }

  fn ladder(classification: &BTreeMap<&'static str, PerformanceTier>, key: &str) -> PerformanceTier {
    *classification.get(key).unwrap()
  }

  #[test]
  fn frequency_ladder_boundaries() {
    assert_eq!(frequency_tier(1.0), PerformanceTier::Elite);
    assert_eq!(frequency_tier(0.14), PerformanceTier::High);
    assert_eq!(frequency_tier(0.033), PerformanceTier::Medium);
    assert_eq!(frequency_tier(0.01), PerformanceTier::Low);
  }

  #[test]
  fn lead_time_ladder_boundaries() {
    assert_eq!(lead_time_tier(Duration::hours(24)), PerformanceTier::Elite);
    assert_eq!(
      lead_time_tier(Duration::hours(24) + Duration::seconds(1)),
      PerformanceTier::High
    );
    assert_eq!(lead_time_tier(Duration::hours(168)), PerformanceTier::High);
    assert_eq!(lead_time_tier(Duration::hours(720)), PerformanceTier::Medium);
    assert_eq!(lead_time_tier(Duration::hours(721)), PerformanceTier::Low);
  }

  #[test]
  fn mttr_ladder_boundaries() {
    assert_eq!(mttr_tier(Duration::hours(1)), PerformanceTier::Elite);
    assert_eq!(mttr_tier(Duration::hours(24)), PerformanceTier::High);
    assert_eq!(mttr_tier(Duration::hours(168)), PerformanceTier::Medium);
    assert_eq!(mttr_tier(Duration::hours(169)), PerformanceTier::Low);
  }

  #[test]
  fn failure_rate_ladder_boundaries() {
    assert_eq!(failure_rate_tier(0.15), PerformanceTier::Elite);
    assert_eq!(failure_rate_tier(0.20), PerformanceTier::High);
    assert_eq!(failure_rate_tier(0.30), PerformanceTier::Medium);
    assert_eq!(failure_rate_tier(0.31), PerformanceTier::Low);
  }

  #[test]
  fn classify_covers_all_four_metrics() {
    let classification = classify(&metrics(2.0, 3600, 1800, 0.1));
    assert_eq!(classification.len(), 4);
    assert_eq!(
      ladder(&classification, METRIC_DEPLOYMENT_FREQUENCY),
      PerformanceTier::Elite
    );
    assert_eq!(ladder(&classification, METRIC_LEAD_TIME), PerformanceTier::Elite);
    assert_eq!(ladder(&classification, METRIC_MTTR), PerformanceTier::Elite);
    assert_eq!(
      ladder(&classification, METRIC_CHANGE_FAILURE_RATE),
      PerformanceTier::Elite
    );
  }

  #[test]
  fn three_elites_roll_up_to_elite() {
    // Elite frequency, lead time, MTTR; Low failure rate. The Elite rule
    // fires before the Elite+High rule is considered.
    let classification = classify(&metrics(2.0, 3600, 1800, 0.9));
    assert_eq!(overall_tier(&classification), PerformanceTier::Elite);
  }

  #[test]
  fn elite_plus_high_roll_up_to_high() {
    // Two Elite + one High + one Low.
    let classification = classify(&metrics(2.0, 3600, 7200, 0.9));
    assert_eq!(overall_tier(&classification), PerformanceTier::High);
  }

  #[test]
  fn three_lows_roll_up_to_low() {
    let classification = classify(&metrics(0.01, 3_000_000, 700_000, 0.9));
    assert_eq!(overall_tier(&classification), PerformanceTier::Low);
  }

  #[test]
  fn mixed_spread_defaults_to_medium() {
    // One of each tier: no rule reaches 3, so Medium.
    let classification = classify(&metrics(2.0, 600_000, 500_000, 0.9));
    assert_eq!(
      ladder(&classification, METRIC_DEPLOYMENT_FREQUENCY),
      PerformanceTier::Elite
    );
    assert_eq!(ladder(&classification, METRIC_LEAD_TIME), PerformanceTier::High);
    assert_eq!(ladder(&classification, METRIC_MTTR), PerformanceTier::Medium);
    assert_eq!(
      ladder(&classification, METRIC_CHANGE_FAILURE_RATE),
      PerformanceTier::Low
    );
    assert_eq!(overall_tier(&classification), PerformanceTier::Medium);
  }
}
