//! The four DORA metric calculators and the top-level composition.
//!
//! Every function here is a pure, total function over its inputs: degenerate
//! windows and empty collections yield zeros, never NaN/Inf or panics.

use chrono::{Duration, Utc};

use crate::error::EngineError;
use crate::quality;
use crate::types::{Deployment, DoraMetrics, Incident, TimeRange};
use crate::window::filter_by_window;

/// How long after a successful deployment finishes an incident is still
/// attributed to it.
const CORRELATION_WINDOW_HOURS: i64 = 2;

/// Successful deployments per day over the window. Returns 0 for zero-width
/// or inverted windows.
pub fn deployment_frequency(deployments: &[Deployment], range: &TimeRange) -> f64 {
  let successful = deployments.iter().filter(|d| d.is_successful()).count();

  let days = range.days();
  if days <= 0.0 {
    return 0.0;
  }

  successful as f64 / days
}

/// Average commit-to-production time over successful, finished deployments.
///
/// Samples with a zero or negative lead time (no end time, clock skew, end
/// before commit) are skipped entirely rather than averaged in as zero, so
/// bad data cannot drag the average toward zero. Consequence: the function
/// never reports a true-zero average — no qualifying sample means zero.
pub fn lead_time(deployments: &[Deployment]) -> Duration {
  let mut total = Duration::zero();
  let mut qualifying = 0;

  for deployment in deployments {
    if deployment.is_successful() && deployment.end_time.is_some() {
      let lead = deployment.lead_time();
      if lead > Duration::zero() {
        total = total + lead;
        qualifying += 1;
      }
    }
  }

  if qualifying == 0 {
    return Duration::zero();
  }

  total / qualifying
}

/// Mean time to recovery over resolved incidents. Same skip policy for
/// zero/negative recovery times as lead_time.
pub fn mttr(incidents: &[Incident]) -> Duration {
  let mut total = Duration::zero();
  let mut qualifying = 0;

  for incident in incidents {
    if incident.is_resolved() {
      let recovery = incident.time_to_recovery();
      if recovery > Duration::zero() {
        total = total + recovery;
        qualifying += 1;
      }
    }
  }

  if qualifying == 0 {
    return Duration::zero();
  }

  total / qualifying
}

/// Fraction of deployments that failed or are suspected of causing an
/// incident. Returns 0 when there are no deployments.
///
/// Each incident is attributed to at most one deployment: the first one in
/// slice order that finished successfully within the 2-hour window before the
/// incident started. The attributed deployment may itself already be counted
/// as failed, and one deployment can be blamed for several incidents, so the
/// rate is not clamped to [0, 1]. Changing the scan order or the
/// one-per-incident rule changes output on ambiguous inputs; both are load
/// bearing for compatibility.
pub fn change_failure_rate(deployments: &[Deployment], incidents: &[Incident]) -> f64 {
  if deployments.is_empty() {
    return 0.0;
  }

  let mut failures = deployments.iter().filter(|d| d.is_failed()).count();

  for incident in incidents {
    for deployment in deployments {
      let end = match deployment.end_time {
        Some(end) if deployment.is_successful() => end,
        _ => continue,
      };
      let gap = incident.start_time - end;
      if gap > Duration::zero() && gap < Duration::hours(CORRELATION_WINDOW_HOURS) {
        failures += 1;
        break; // at most one deployment per incident
      }
    }
  }

  failures as f64 / deployments.len() as f64
}

/// Window both collections, run the four metrics on the filtered sets, and
/// assemble the result with a fresh timestamp.
///
/// Infallible today; the error slot exists so future fallible enrichment
/// steps slot in without an interface break.
pub fn compute_all(
  deployments: &[Deployment],
  incidents: &[Incident],
  range: &TimeRange,
) -> Result<DoraMetrics, EngineError> {
  let deployments = filter_by_window(deployments, range);
  let incidents = filter_by_window(incidents, range);

  Ok(DoraMetrics {
    deployment_frequency: deployment_frequency(&deployments, range),
    lead_time: lead_time(&deployments),
    mttr: mttr(&incidents),
    change_failure_rate: change_failure_rate(&deployments, &incidents),
    time_range: *range,
    calculated_at: Utc::now(),
    data_quality: quality::assess(&deployments, &incidents, range),
  })
}
