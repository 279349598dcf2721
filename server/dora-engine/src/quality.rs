//! Data-quality heuristic for a computed window.

use crate::types::{DataQuality, Deployment, Incident, TimeRange};

/// Label how trustworthy the metrics over this window are.
///
/// A window under 7 days is always Low, regardless of volume — short windows
/// produce noisy rates. Beyond that: regular deployments plus incident data
/// is High, any data at all is Medium, nothing is Low.
pub fn assess(deployments: &[Deployment], incidents: &[Incident], range: &TimeRange) -> DataQuality {
  let days = range.days();
  if days < 7.0 {
    return DataQuality::Low;
  }

  let deployments_per_day = deployments.len() as f64 / days;
  if deployments_per_day >= 0.5 && !incidents.is_empty() {
    return DataQuality::High;
  }

  if !deployments.is_empty() || !incidents.is_empty() {
    return DataQuality::Medium;
  }

  DataQuality::Low
}
