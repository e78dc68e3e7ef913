//! Daily quest and its once-per-day rotation.

use serde::{Deserialize, Serialize};

use super::day::CalendarDay;

/// Built-in quest pool.
pub const DEFAULT_QUESTS: &[&str] = &[
    "Wear a blue item today",
    "Try a monochrome fit",
    "Wear your oldest item",
    "Style a formal piece casually",
    "Wear something green",
    "Create a layered outfit",
    "Wear your newest item",
];

/// The single active styling challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuest {
    pub text: String,
    #[serde(default)]
    pub is_completed: bool,
    pub date: CalendarDay,
}

impl Default for DailyQuest {
    fn default() -> Self {
        Self::first_of(DEFAULT_QUESTS, CalendarDay::default())
    }
}

impl DailyQuest {
    /// The first quest of `pool` dated `day`; used for fresh profiles.
    pub fn first_of<S: AsRef<str>>(pool: &[S], day: CalendarDay) -> Self {
        Self::drawn(pool, 0, day)
    }

    fn drawn<S: AsRef<str>>(pool: &[S], draw: usize, day: CalendarDay) -> Self {
        let text = if pool.is_empty() {
            DEFAULT_QUESTS[draw % DEFAULT_QUESTS.len()].to_string()
        } else {
            pool[draw % pool.len()].as_ref().to_string()
        };
        Self {
            text,
            is_completed: false,
            date: day,
        }
    }

    pub fn needs_rotation(&self, today: CalendarDay) -> bool {
        self.date != today
    }

    /// Replacement quest for `today`, or `None` when the current one is
    /// already today's. `draw` picks from the pool modulo its length; an
    /// empty pool falls back to the built-in quests.
    pub fn rotated<S: AsRef<str>>(
        &self,
        today: CalendarDay,
        pool: &[S],
        draw: usize,
    ) -> Option<DailyQuest> {
        if !self.needs_rotation(today) {
            return None;
        }
        Some(Self::drawn(pool, draw, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> CalendarDay {
        CalendarDay::from_ymd(2025, 5, d).unwrap()
    }

    #[test]
    fn same_day_does_not_rotate() {
        let quest = DailyQuest::first_of(DEFAULT_QUESTS, day(1));
        assert!(quest.rotated(day(1), DEFAULT_QUESTS, 3).is_none());
    }

    #[test]
    fn new_day_resets_completion_and_dates_today() {
        let mut quest = DailyQuest::first_of(DEFAULT_QUESTS, day(1));
        quest.is_completed = true;

        let next = quest.rotated(day(2), DEFAULT_QUESTS, 9).unwrap();
        assert_eq!(next.date, day(2));
        assert!(!next.is_completed);
        assert_eq!(next.text, DEFAULT_QUESTS[9 % DEFAULT_QUESTS.len()]);
    }

    #[test]
    fn custom_pool_is_used_and_empty_pool_falls_back() {
        let pool = vec!["Wear stripes".to_string()];
        let quest = DailyQuest::first_of(&pool, day(1));
        assert_eq!(quest.text, "Wear stripes");

        let empty: Vec<String> = Vec::new();
        let fallback = quest.rotated(day(3), &empty, 0).unwrap();
        assert_eq!(fallback.text, DEFAULT_QUESTS[0]);
    }
}
