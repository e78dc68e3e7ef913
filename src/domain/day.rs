//! Canonical calendar day used by streak and quest logic.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Legacy day format written by older app versions (`"Mon Jan 05 2025"`).
const LEGACY_FORMAT: &str = "%a %b %d %Y";

/// A calendar day with an explicit equality/adjacency relation.
///
/// Encoded as ISO `YYYY-MM-DD`. Decoding also accepts the legacy
/// `"Mon Jan 05 2025"` form so older stores keep their streaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Signed number of days from `earlier` to `self`.
    pub fn days_since(&self, earlier: CalendarDay) -> i64 {
        self.0.signed_duration_since(earlier.0).num_days()
    }

    /// True iff `self` is exactly one calendar day after `previous`.
    pub fn is_next_day_after(&self, previous: CalendarDay) -> bool {
        self.days_since(previous) == 1
    }

    /// The following day. Saturates at the last representable date.
    pub fn succ(&self) -> Self {
        Self(self.0.succ_opt().unwrap_or(self.0))
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, LEGACY_FORMAT))
            .ok()
            .map(Self)
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl Serialize for CalendarDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        CalendarDay::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid calendar day '{}'", raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> CalendarDay {
        CalendarDay::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn adjacency_crosses_month_and_year_boundaries() {
        assert!(day(2025, 2, 1).is_next_day_after(day(2025, 1, 31)));
        assert!(day(2025, 1, 1).is_next_day_after(day(2024, 12, 31)));
        assert!(day(2024, 3, 1).is_next_day_after(day(2024, 2, 29)));
    }

    #[test]
    fn same_day_and_gaps_are_not_adjacent() {
        let mon = day(2025, 3, 3);
        assert!(!mon.is_next_day_after(mon));
        assert!(!day(2025, 3, 6).is_next_day_after(mon));
        assert!(!mon.is_next_day_after(day(2025, 3, 4)));
    }

    #[test]
    fn parses_iso_and_legacy_forms() {
        assert_eq!(CalendarDay::parse("2025-01-05"), Some(day(2025, 1, 5)));
        assert_eq!(CalendarDay::parse("Sun Jan 05 2025"), Some(day(2025, 1, 5)));
        assert_eq!(CalendarDay::parse("yesterday"), None);
    }

    #[test]
    fn serializes_as_iso_string() {
        let json = serde_json::to_string(&day(2025, 7, 9)).unwrap();
        assert_eq!(json, "\"2025-07-09\"");
        let back: CalendarDay = serde_json::from_str("\"Wed Jul 09 2025\"").unwrap();
        assert_eq!(back, day(2025, 7, 9));
    }
}
