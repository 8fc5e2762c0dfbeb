// Day grouping and lookback filtering over the location log
use super::location::{DailyLocationGroup, LocationPoint, DAY_MS};
use super::zone::ZonePolicy;
use crate::error::LogError;
use std::collections::BTreeMap;

/// Oldest timestamp retained by a lookback of `lookback_days` ending at `now_ms`
pub fn cutoff_ms(now_ms: i64, lookback_days: i64) -> i64 {
    now_ms.saturating_sub(lookback_days.saturating_mul(DAY_MS))
}

/// Filter `points` to the trailing `lookback_days` and bucket them by calendar
/// date in `zone`, newest day first
///
/// The window is rolling (`now - days * 24h`, inclusive) while buckets are
/// calendar days, so a 1-day lookback that straddles midnight yields two
/// groups. Points dated after `now` are kept. Within a day, points stay in
/// log order. Points whose timestamp has no calendar date (beyond roughly
/// year 262000) are skipped with a warning
pub fn group_by_day(
    points: Vec<LocationPoint>,
    now_ms: i64,
    lookback_days: i64,
    zone: ZonePolicy,
) -> Result<Vec<DailyLocationGroup>, LogError> {
    if lookback_days <= 0 {
        return Err(LogError::InvalidArgument(format!(
            "lookback_days must be positive, got {}",
            lookback_days
        )));
    }

    let cutoff = cutoff_ms(now_ms, lookback_days);
    let mut buckets: BTreeMap<_, Vec<LocationPoint>> = BTreeMap::new();

    for point in points.into_iter().filter(|p| p.timestamp >= cutoff) {
        match zone.local_date(point.timestamp) {
            Some(date) => buckets.entry(date).or_default().push(point),
            None => {
                tracing::warn!(
                    "Skipping location {} with unrepresentable timestamp {}",
                    point.id,
                    point.timestamp
                );
            }
        }
    }

    Ok(buckets
        .into_iter()
        .rev()
        .map(|(date, points)| DailyLocationGroup::new(date, points))
        .collect())
}
