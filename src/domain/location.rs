// Location domain models
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Milliseconds in one day
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A single timestamped position observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPoint {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Milliseconds since the Unix epoch
    #[serde(deserialize_with = "deserialize_millis")]
    pub timestamp: i64,
    /// Accuracy radius in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

impl LocationPoint {
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            timestamp,
            accuracy: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);
        self
    }
}

/// Points sharing one calendar date
#[derive(Debug, Clone, PartialEq)]
pub struct DailyLocationGroup {
    pub date: NaiveDate,
    pub points: Vec<LocationPoint>,
}

impl DailyLocationGroup {
    pub fn new(date: NaiveDate, points: Vec<LocationPoint>) -> Self {
        Self { date, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

// Browsers hand out fractional millisecond timestamps on some platforms
#[derive(Deserialize)]
#[serde(untagged)]
enum Millis {
    Integer(i64),
    Float(f64),
}

fn deserialize_millis<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match Millis::deserialize(deserializer)? {
        Millis::Integer(ms) => Ok(ms),
        Millis::Float(ms) if ms.is_finite() => Ok(ms.trunc() as i64),
        Millis::Float(_) => Err(serde::de::Error::custom("timestamp is not a finite number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_omitted_when_absent() {
        let point = LocationPoint::new("a", 1.0, 2.0, 1_700_000_000_000);
        let json = serde_json::to_string(&point).unwrap();

        assert_eq!(
            json,
            r#"{"id":"a","latitude":1.0,"longitude":2.0,"timestamp":1700000000000}"#
        );
    }

    #[test]
    fn test_reads_browser_payload() {
        let payload = r#"[
            {"id":"loc-1","latitude":40.71,"longitude":-74.0,"timestamp":1700000000000,"accuracy":12},
            {"id":"loc-2","latitude":40.72,"longitude":-74.01,"timestamp":1700000060000.75}
        ]"#;

        let points: Vec<LocationPoint> = serde_json::from_str(payload).unwrap();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].accuracy, Some(12.0));
        assert_eq!(points[1].timestamp, 1_700_000_060_000);
        assert_eq!(points[1].accuracy, None);
    }

    #[test]
    fn test_rejects_non_numeric_timestamp() {
        let payload = r#"{"id":"x","latitude":0,"longitude":0,"timestamp":"yesterday"}"#;
        assert!(serde_json::from_str::<LocationPoint>(payload).is_err());
    }
}
