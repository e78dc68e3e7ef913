mod common;

use common::*;
use vibewear::domain::{CalendarDay, Category};
use vibewear::engine::streak::FASHIONISTA;
use vibewear::engine::{Action, VibeState};

fn log_on(state: VibeState, on: CalendarDay) -> VibeState {
    reduce(state, Action::LogOutfit(entry(&["a"], on))).state
}

#[test]
fn consecutive_days_count_every_log() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    let mut today = day(2024, 12, 28);
    for n in 1..=10u32 {
        state = log_on(state, today);
        assert_eq!(state.profile.streak, n, "after log on {}", today);
        today = today.succ();
    }
    assert_eq!(state.item("a").unwrap().wear_count, 10);
    assert_eq!(state.profile.badges.iter().collect::<Vec<_>>(), vec![FASHIONISTA]);
}

#[test]
fn gap_restarts_count_at_one() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    for d in [1, 2, 3] {
        state = log_on(state, day(2025, 2, d));
    }
    assert_eq!(state.profile.streak, 3);

    state = log_on(state, day(2025, 2, 5));
    assert_eq!(state.profile.streak, 1);

    state = log_on(state, day(2025, 2, 6));
    assert_eq!(state.profile.streak, 2);
}

#[test]
fn badge_survives_broken_streak() {
    let mut state = state_with(vec![item("a", Category::Top)]);
    let mut today = day(2025, 4, 1);
    for _ in 0..7 {
        state = log_on(state, today);
        today = today.succ();
    }
    assert!(state.profile.badges.contains(FASHIONISTA));

    state = log_on(state, day(2025, 5, 1));
    assert_eq!(state.profile.streak, 1);
    assert!(state.profile.badges.contains(FASHIONISTA));
}

#[test]
fn legacy_last_log_date_still_chains() {
    let profile = r#"{"streak": 2, "lastLogDate": "Mon Mar 03 2025"}"#;
    let mut state = state_with(vec![item("a", Category::Top)]);
    state.profile = serde_json::from_str(profile).unwrap();

    state = log_on(state, day(2025, 3, 4));
    assert_eq!(state.profile.streak, 3);
}
