// Human-readable labels for days, times and lookback ranges
use crate::domain::zone::ZonePolicy;
use chrono::{Datelike, Days, NaiveDate};

/// Lookback ranges offered to the user, in days
pub const RANGE_OPTIONS: [i64; 3] = [1, 7, 30];

/// "Today", "Yesterday", the weekday for other days of the current
/// (Sunday-started) week, otherwise e.g. "May 1, 2023"
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        return "Today".to_string();
    }
    if today.pred_opt() == Some(date) {
        return "Yesterday".to_string();
    }
    if week_start(date) == week_start(today) {
        return date.format("%A").to_string();
    }
    date.format("%b %-d, %Y").to_string()
}

/// Wall-clock time such as "3:30 PM", or `None` for an unrepresentable timestamp
pub fn time_label(timestamp_ms: i64, zone: ZonePolicy) -> Option<String> {
    zone.local_datetime(timestamp_ms)
        .map(|dt| dt.format("%-I:%M %p").to_string())
}

pub fn range_label(days: i64) -> String {
    match days {
        1 => "Today".to_string(),
        7 => "This Week".to_string(),
        30 => "This Month".to_string(),
        _ => format!("Last {} Days", days),
    }
}

/// The `days` dates ending at `today`, oldest first
pub fn date_range(days: i64, today: NaiveDate) -> Vec<NaiveDate> {
    (0..days.max(0) as u64)
        .rev()
        .filter_map(|i| today.checked_sub_days(Days::new(i)))
        .collect()
}

fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_labels() {
        // Saturday
        let today = date(2024, 6, 15);

        assert_eq!(day_label(today, today), "Today");
        assert_eq!(day_label(date(2024, 6, 14), today), "Yesterday");
        assert_eq!(day_label(date(2024, 6, 10), today), "Monday");
        assert_eq!(day_label(date(2024, 6, 9), today), "Sunday");
        assert_eq!(day_label(date(2024, 6, 8), today), "Jun 8, 2024");
        assert_eq!(day_label(date(2023, 5, 1), today), "May 1, 2023");
    }

    #[test]
    fn test_week_starts_on_sunday() {
        // Sunday: Saturday before is the previous week but still "Yesterday"
        let today = date(2024, 6, 16);

        assert_eq!(day_label(date(2024, 6, 15), today), "Yesterday");
        assert_eq!(day_label(date(2024, 6, 14), today), "Jun 14, 2024");
    }

    #[test]
    fn test_time_labels() {
        let utc = ZonePolicy::utc();

        // 2024-06-15T15:30:00Z
        assert_eq!(time_label(1_718_465_400_000, utc).as_deref(), Some("3:30 PM"));
        // 2024-06-15T00:05:00Z
        assert_eq!(time_label(1_718_409_900_000, utc).as_deref(), Some("12:05 AM"));
        assert_eq!(time_label(i64::MAX, utc), None);
    }

    #[test]
    fn test_range_labels() {
        let labels: Vec<_> = RANGE_OPTIONS.iter().map(|d| range_label(*d)).collect();
        assert_eq!(labels, vec!["Today", "This Week", "This Month"]);
        assert_eq!(range_label(14), "Last 14 Days");
    }

    #[test]
    fn test_date_range() {
        let today = date(2024, 3, 2);

        assert_eq!(
            date_range(3, today),
            vec![date(2024, 2, 29), date(2024, 3, 1), date(2024, 3, 2)]
        );
        assert!(date_range(0, today).is_empty());
        assert!(date_range(-4, today).is_empty());
    }
}
