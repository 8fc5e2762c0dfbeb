// History list view model
use crate::domain::location::{DailyLocationGroup, LocationPoint};
use crate::domain::zone::ZonePolicy;
use crate::presentation::labels::{day_label, time_label};
use chrono::NaiveDate;
use serde::Serialize;

pub const EMPTY_HISTORY_MESSAGE: &str = "No location history found.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySection {
    pub date: NaiveDate,
    pub heading: String,
    pub count_label: String,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryEntry {
    pub id: String,
    pub coordinates: String,
    pub accuracy: Option<String>,
    pub time: String,
}

impl HistoryEntry {
    pub fn from_point(point: &LocationPoint, zone: ZonePolicy) -> Self {
        Self {
            id: point.id.clone(),
            coordinates: format!("{:.4}, {:.4}", point.latitude, point.longitude),
            accuracy: point
                .accuracy
                .filter(|a| *a > 0.0)
                .map(|a| format!("Accuracy: ±{:.0}m", a)),
            time: time_label(point.timestamp, zone).unwrap_or_default(),
        }
    }
}

/// One section per day group, in the order given
pub fn build_history_view(
    groups: &[DailyLocationGroup],
    today: NaiveDate,
    zone: ZonePolicy,
) -> Vec<DaySection> {
    groups
        .iter()
        .map(|group| DaySection {
            date: group.date,
            heading: day_label(group.date, today),
            count_label: format!("{} locations", group.len()),
            entries: group
                .points
                .iter()
                .map(|p| HistoryEntry::from_point(p, zone))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-06-15T15:30:00Z
    const AFTERNOON: i64 = 1_718_465_400_000;

    #[test]
    fn test_builds_sections() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let groups = vec![
            DailyLocationGroup::new(
                today,
                vec![
                    LocationPoint::new("a", 40.712_776, -74.005_974, AFTERNOON).with_accuracy(9.6),
                    LocationPoint::new("b", 40.7, -74.0, AFTERNOON + 60_000),
                ],
            ),
            DailyLocationGroup::new(
                today.pred_opt().unwrap(),
                vec![LocationPoint::new("c", 1.0, 2.0, AFTERNOON - 86_400_000).with_accuracy(0.0)],
            ),
        ];

        let view = build_history_view(&groups, today, ZonePolicy::utc());

        assert_eq!(view.len(), 2);
        assert_eq!(view[0].heading, "Today");
        assert_eq!(view[0].count_label, "2 locations");
        assert_eq!(
            view[0].entries[0],
            HistoryEntry {
                id: "a".to_string(),
                coordinates: "40.7128, -74.0060".to_string(),
                accuracy: Some("Accuracy: ±10m".to_string()),
                time: "3:30 PM".to_string(),
            }
        );
        assert_eq!(view[0].entries[1].accuracy, None);
        assert_eq!(view[0].entries[1].time, "3:31 PM");
        assert_eq!(view[1].heading, "Yesterday");
        assert_eq!(view[1].entries[0].accuracy, None);
    }

    #[test]
    fn test_empty_groups_give_empty_view() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(build_history_view(&[], today, ZonePolicy::utc()).is_empty());
    }

    #[test]
    fn test_sections_serialize_with_iso_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let groups = vec![DailyLocationGroup::new(
            today,
            vec![LocationPoint::new("a", 40.7, -74.0, AFTERNOON)],
        )];

        let view = build_history_view(&groups, today, ZonePolicy::utc());
        let value = serde_json::to_value(&view).unwrap();

        assert_eq!(value[0]["date"], "2024-06-15");
        assert_eq!(value[0]["heading"], "Today");
        assert_eq!(value[0]["entries"][0]["time"], "3:30 PM");
    }
}
