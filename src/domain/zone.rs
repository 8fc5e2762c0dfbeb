// Timezone policy for turning timestamps into calendar dates
use crate::error::LogError;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, Offset, Utc};
use std::str::FromStr;

/// The single zone used to bucket timestamps into calendar days
///
/// `Local` follows the executing system's zone, so the same timestamp can land
/// on different dates on differently configured hosts. `Fixed` pins the offset
/// and is what tests use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZonePolicy {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl ZonePolicy {
    pub fn utc() -> Self {
        ZonePolicy::Fixed(Utc.fix())
    }

    /// Wall-clock time for `timestamp_ms`, or `None` when it is outside the
    /// representable range
    pub fn local_datetime(&self, timestamp_ms: i64) -> Option<DateTime<FixedOffset>> {
        let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
        Some(match self {
            ZonePolicy::Local => utc.with_timezone(&Local).fixed_offset(),
            ZonePolicy::Fixed(offset) => utc.with_timezone(offset),
        })
    }

    pub fn local_date(&self, timestamp_ms: i64) -> Option<NaiveDate> {
        self.local_datetime(timestamp_ms).map(|dt| dt.date_naive())
    }
}

impl FromStr for ZonePolicy {
    type Err = LogError;

    /// Accepts `local`, `utc`, or an offset such as `+02:00` / `-0530`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => return Ok(ZonePolicy::Local),
            "utc" | "z" => return Ok(ZonePolicy::utc()),
            _ => {}
        }

        let invalid = || LogError::InvalidArgument(format!("unrecognized timezone '{}'", s));

        let (sign, rest) = match trimmed.as_bytes().first() {
            Some(b'+') => (1, &trimmed[1..]),
            Some(b'-') => (-1, &trimmed[1..]),
            _ => return Err(invalid()),
        };
        let digits: String = rest.chars().filter(|c| *c != ':').collect();
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if minutes >= 60 {
            return Err(invalid());
        }

        FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
            .map(ZonePolicy::Fixed)
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zone_policies() {
        assert_eq!("local".parse::<ZonePolicy>().unwrap(), ZonePolicy::Local);
        assert_eq!("UTC".parse::<ZonePolicy>().unwrap(), ZonePolicy::utc());
        assert_eq!(
            "+05:30".parse::<ZonePolicy>().unwrap(),
            ZonePolicy::Fixed(FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap())
        );
        assert_eq!(
            "-0800".parse::<ZonePolicy>().unwrap(),
            ZonePolicy::Fixed(FixedOffset::west_opt(8 * 3600).unwrap())
        );
        assert!("Europe/Paris".parse::<ZonePolicy>().is_err());
        assert!("+25:00".parse::<ZonePolicy>().is_err());
        assert!("+01:75".parse::<ZonePolicy>().is_err());
    }

    #[test]
    fn test_same_instant_buckets_by_offset() {
        // 2024-03-10T23:30:00Z
        let ts = 1_710_113_400_000;
        let utc = ZonePolicy::utc();
        let tokyo: ZonePolicy = "+09:00".parse().unwrap();

        assert_eq!(utc.local_date(ts), NaiveDate::from_ymd_opt(2024, 3, 10));
        assert_eq!(tokyo.local_date(ts), NaiveDate::from_ymd_opt(2024, 3, 11));
    }

    #[test]
    fn test_out_of_range_timestamp() {
        assert_eq!(ZonePolicy::utc().local_date(i64::MAX), None);
    }
}
