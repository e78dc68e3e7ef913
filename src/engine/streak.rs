//! Streak and badge calculation.

use crate::domain::{Badges, CalendarDay};

/// Badge awarded the first time a streak reaches [`FASHIONISTA_STREAK`].
pub const FASHIONISTA: &str = "Fashionista";
pub const FASHIONISTA_STREAK: u32 = 7;

/// Next streak value for a log on `today`.
///
/// - same day as the last log → unchanged
/// - exactly one day later → +1
/// - any other gap (including going backwards), or no prior log → 1
pub fn next_streak(today: CalendarDay, last_log: Option<CalendarDay>, current: u32) -> u32 {
    match last_log {
        Some(last) if last == today => current,
        Some(last) if today.is_next_day_after(last) => current.saturating_add(1),
        _ => 1,
    }
}

/// Award streak badges for `streak`. Returns the id of a newly earned badge.
///
/// Edge-triggered: only the transition onto exactly 7 can award, and only
/// once per profile.
pub fn award_streak_badge(badges: &mut Badges, streak: u32) -> Option<&'static str> {
    if streak == FASHIONISTA_STREAK && badges.award(FASHIONISTA) {
        Some(FASHIONISTA)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> CalendarDay {
        CalendarDay::from_ymd(2025, 6, d).unwrap()
    }

    #[test]
    fn first_log_starts_at_one() {
        assert_eq!(next_streak(day(2), None, 0), 1);
        assert_eq!(next_streak(day(2), None, 5), 1);
    }

    #[test]
    fn same_day_is_unchanged() {
        assert_eq!(next_streak(day(2), Some(day(2)), 3), 3);
    }

    #[test]
    fn consecutive_day_increments() {
        // Mon -> Tue
        assert_eq!(next_streak(day(3), Some(day(2)), 3), 4);
    }

    #[test]
    fn gap_resets() {
        // Mon -> Thu
        assert_eq!(next_streak(day(5), Some(day(2)), 3), 1);
        // clock went backwards
        assert_eq!(next_streak(day(1), Some(day(2)), 3), 1);
    }

    #[test]
    fn fashionista_awarded_once_at_seven() {
        let mut badges = Badges::default();
        assert_eq!(award_streak_badge(&mut badges, 6), None);
        assert_eq!(award_streak_badge(&mut badges, 7), Some(FASHIONISTA));
        assert_eq!(award_streak_badge(&mut badges, 8), None);
        // Re-reaching 7 after a reset does not award again.
        assert_eq!(award_streak_badge(&mut badges, 7), None);
        assert_eq!(badges.len(), 1);
    }

    #[test]
    fn standing_streak_above_seven_does_not_award() {
        let mut badges = Badges::default();
        assert_eq!(award_streak_badge(&mut badges, 12), None);
        assert!(badges.is_empty());
    }
}
