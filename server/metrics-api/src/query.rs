//! Reporting-window selection from query parameters.

use chrono::{DateTime, Duration, Utc};
use dora_engine::TimeRange;
use serde::Deserialize;

pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const MAX_WINDOW_DAYS: i64 = 365;

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
  pub days: Option<i64>,
}

/// Window ending now and spanning `?days=N` (default 30; out-of-range values
/// fall back to the default rather than erroring).
pub fn range_from_query(query: &RangeQuery, now: DateTime<Utc>) -> TimeRange {
  let days = match query.days {
    Some(n) if n > 0 && n <= MAX_WINDOW_DAYS => n,
    _ => DEFAULT_WINDOW_DAYS,
  };
  TimeRange::new(now - Duration::days(days - 1), now)
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 31, 0, 0, 0).unwrap()
  }

  #[test]
  fn default_window_is_thirty_days() {
    let range = range_from_query(&RangeQuery { days: None }, now());
    assert_eq!(range.end, now());
    assert_eq!(range.start, now() - Duration::days(29));
  }

  #[test]
  fn explicit_days_are_honored() {
    let range = range_from_query(&RangeQuery { days: Some(7) }, now());
    assert_eq!(range.start, now() - Duration::days(6));
  }

  #[test]
  fn out_of_range_days_fall_back_to_default() {
    for days in [0, -3, 366] {
      let range = range_from_query(&RangeQuery { days: Some(days) }, now());
      assert_eq!(range.start, now() - Duration::days(29));
    }
  }
}
