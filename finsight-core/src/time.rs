//! Day-label policy: which calendar day a timestamp belongs to, and how that day is printed.
//!
//! Offset-carrying timestamps are converted into one fixed IANA reporting
//! timezone before the date is taken. Naive timestamps are assumed to already
//! be local. Labels always use English month abbreviations ("Jan 5"),
//! independent of the process locale.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Default reporting timezone (the backend serves Indian bank accounts)
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayPolicy {
    tz: Tz,
}

impl DayPolicy {
    /// Build a policy for an IANA zone name like "Asia/Kolkata"
    pub fn new(tz: &str) -> Result<Self> {
        let tz: Tz = tz
            .trim()
            .parse()
            .map_err(|_| Error::UnknownTimezone(tz.to_string()))?;
        Ok(Self { tz })
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Parse a timestamp into local wall-clock time in the reporting zone.
    ///
    /// Accepts RFC 3339, naive date-times, and plain dates (midnight).
    pub fn parse_datetime(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&self.tz).naive_local());
        }
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Some(dt.with_timezone(&self.tz).naive_local());
        }
        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(ndt) = NaiveDateTime::parse_from_str(raw, fmt) {
                return Some(ndt);
            }
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    /// Calendar day of a timestamp or date string in the reporting zone
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        self.parse_datetime(raw).map(|dt| dt.date())
    }
}

impl Default for DayPolicy {
    fn default() -> Self {
        Self {
            tz: chrono_tz::Asia::Kolkata,
        }
    }
}

/// Short month + day, e.g. "Jan 5"
pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(ymd(2024, 1, 5)), "Jan 5");
        assert_eq!(day_label(ymd(2024, 12, 31)), "Dec 31");
    }

    #[test]
    fn test_offset_timestamp_moves_into_reporting_zone() {
        let policy = DayPolicy::default();
        // 20:00 UTC is 01:30 the next day in IST
        let date = policy.parse_date("2024-01-05T20:00:00Z").unwrap();
        assert_eq!(date, ymd(2024, 1, 6));

        let utc = DayPolicy::new("UTC").unwrap();
        assert_eq!(utc.parse_date("2024-01-05T20:00:00Z").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_naive_and_plain_dates_are_taken_as_local() {
        let policy = DayPolicy::default();
        assert_eq!(policy.parse_date("2024-01-05").unwrap(), ymd(2024, 1, 5));
        assert_eq!(policy.parse_date("2024-01-05 23:10:00").unwrap(), ymd(2024, 1, 5));
        assert_eq!(
            policy.parse_datetime("2024-01-05T23:10:00.250").unwrap(),
            ymd(2024, 1, 5).and_hms_milli_opt(23, 10, 0, 250).unwrap()
        );
    }

    #[test]
    fn test_unparseable_inputs() {
        let policy = DayPolicy::default();
        assert!(policy.parse_date("").is_none());
        assert!(policy.parse_date("yesterday").is_none());
        assert!(policy.parse_date("05/01/2024").is_none());
    }

    #[test]
    fn test_unknown_timezone() {
        let err = DayPolicy::new("Mars/Olympus").unwrap_err();
        assert_eq!(err, Error::UnknownTimezone("Mars/Olympus".to_string()));
    }
}
