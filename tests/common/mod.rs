//! Shared fixtures for integration tests.

#![allow(dead_code, unused_imports)]

use chrono::{DateTime, TimeZone, Utc};
use vibewear::clock::ManualClock;
use vibewear::domain::{CalendarDay, Category, ItemDraft, WardrobeItem, WishlistItem};
use vibewear::engine::{Action, OutfitEntry, VibeReducer, VibeState};
use vibewear::mvi::{Reducer, Transition};
use vibewear::session::{Session, SessionOptions};
use vibewear::store::MemoryStore;

pub type Step = Transition<VibeState, vibewear::engine::Effect>;

/// Noon UTC, so the calendar day is the same in every test.
pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn day(y: i32, m: u32, d: u32) -> CalendarDay {
    CalendarDay::from_ymd(y, m, d).unwrap()
}

pub fn item(id: &str, category: Category) -> WardrobeItem {
    ItemDraft::new(format!("Item {}", id), category).into_wardrobe(id.to_string(), at(2025, 1, 1))
}

pub fn dirty(id: &str, category: Category) -> WardrobeItem {
    let mut item = item(id, category);
    item.is_clean = false;
    item
}

pub fn wish(id: &str, price: f64) -> WishlistItem {
    ItemDraft::new(format!("Wish {}", id), Category::Shoes)
        .with_price(price)
        .into_wishlist(id.to_string(), at(2025, 1, 1))
}

pub fn entry(ids: &[&str], on: CalendarDay) -> OutfitEntry {
    OutfitEntry {
        item_ids: ids.iter().map(|s| s.to_string()).collect(),
        day: on,
        log_id: format!("log-{}", on),
        timestamp: at(2025, 1, 1),
        vibe_score: 90,
    }
}

pub fn state_with(items: Vec<WardrobeItem>) -> VibeState {
    VibeState {
        inventory: items,
        ..Default::default()
    }
}

pub fn reduce(state: VibeState, action: Action) -> Step {
    VibeReducer::reduce(state, action)
}

/// A seeded session over `store` whose clock starts at `now`.
pub fn session_at(store: MemoryStore, now: DateTime<Utc>) -> (Session<MemoryStore>, ManualClock) {
    let clock = ManualClock::at(now);
    let options = SessionOptions::default()
        .with_clock(clock.clone())
        .with_seed(42);
    let (session, _) = Session::open(store, options);
    (session, clock)
}
