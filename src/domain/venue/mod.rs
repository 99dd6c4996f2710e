//! Trading venue domain — venues and their opening days.

#[cfg(feature = "http")]
pub mod client;

use crate::shared::serde_util;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A trading venue (exchange), identified by its MIC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradingVenue {
    pub mic: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Opening hours of a venue on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningDay {
    /// `YYYY-MM-DD`.
    pub day_iso: String,
    #[serde(with = "serde_util::timestamp_secs")]
    pub opening_time: DateTime<Utc>,
    #[serde(with = "serde_util::timestamp_secs")]
    pub closing_time: DateTime<Utc>,
}

impl OpeningDay {
    pub fn is_open_at(&self, at: DateTime<Utc>) -> bool {
        self.opening_time <= at && at <= self.closing_time
    }

    /// Zero once the venue has opened.
    pub fn time_until_open(&self, at: DateTime<Utc>) -> Duration {
        (self.opening_time - at).max(Duration::zero())
    }

    /// Zero once the venue has closed.
    pub fn time_until_close(&self, at: DateTime<Utc>) -> Duration {
        (self.closing_time - at).max(Duration::zero())
    }
}

/// The opening day entry for the calendar day of `at` (UTC), if listed.
pub fn opening_day_for(days: &[OpeningDay], at: DateTime<Utc>) -> Option<&OpeningDay> {
    let day = at.format("%Y-%m-%d").to_string();
    days.iter().find(|d| d.day_iso == day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day() -> OpeningDay {
        serde_json::from_str(
            r#"{"day_iso": "2021-10-01", "opening_time": 1633068000, "closing_time": 1633118400}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_opening_day_deserialize() {
        let d = day();
        assert_eq!(d.opening_time, Utc.with_ymd_and_hms(2021, 10, 1, 6, 0, 0).unwrap());
        assert_eq!(d.closing_time, Utc.with_ymd_and_hms(2021, 10, 1, 20, 0, 0).unwrap());
    }

    #[test]
    fn test_is_open_at() {
        let d = day();
        assert!(!d.is_open_at(Utc.with_ymd_and_hms(2021, 10, 1, 5, 59, 59).unwrap()));
        assert!(d.is_open_at(Utc.with_ymd_and_hms(2021, 10, 1, 6, 0, 0).unwrap()));
        assert!(d.is_open_at(Utc.with_ymd_and_hms(2021, 10, 1, 20, 0, 0).unwrap()));
        assert!(!d.is_open_at(Utc.with_ymd_and_hms(2021, 10, 1, 20, 0, 1).unwrap()));
    }

    #[test]
    fn test_time_until_open_and_close() {
        let d = day();
        let at = Utc.with_ymd_and_hms(2021, 10, 1, 4, 0, 0).unwrap();
        assert_eq!(d.time_until_open(at), Duration::hours(2));
        assert_eq!(d.time_until_close(at), Duration::hours(16));

        let late = Utc.with_ymd_and_hms(2021, 10, 1, 21, 0, 0).unwrap();
        assert_eq!(d.time_until_open(late), Duration::zero());
        assert_eq!(d.time_until_close(late), Duration::zero());
    }

    #[test]
    fn test_opening_day_for() {
        let days = vec![day()];
        let at = Utc.with_ymd_and_hms(2021, 10, 1, 12, 0, 0).unwrap();
        assert!(opening_day_for(&days, at).is_some());
        let other = Utc.with_ymd_and_hms(2021, 10, 2, 12, 0, 0).unwrap();
        assert!(opening_day_for(&days, other).is_none());
    }
}
