//! Build the initial aggregate from the store.

use std::fmt;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::CalendarDay;
use crate::engine::{Slice, VibeState};

use super::SliceStore;

/// Why a slice fell back to its default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// Nothing stored under the key (first run, or removed).
    Missing,
    /// The adapter failed to read the key.
    Unreadable(String),
    /// The stored text did not decode as the slice's type.
    Corrupt(String),
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Unreadable(e) => write!(f, "unreadable: {}", e),
            Self::Corrupt(e) => write!(f, "corrupt: {}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceFallback {
    pub slice: Slice,
    pub reason: FallbackReason,
}

/// Per-slice outcome of [`hydrate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    pub fallbacks: Vec<SliceFallback>,
}

impl HydrationReport {
    pub fn fell_back(&self, slice: Slice) -> bool {
        self.fallbacks.iter().any(|f| f.slice == slice)
    }

    /// Slices that existed but could not be used.
    pub fn damaged(&self) -> impl Iterator<Item = &SliceFallback> {
        self.fallbacks
            .iter()
            .filter(|f| f.reason != FallbackReason::Missing)
    }

    /// True when no slice was stored at all.
    pub fn is_first_run(&self) -> bool {
        self.fallbacks.len() == Slice::all().len()
            && self.fallbacks.iter().all(|f| f.reason == FallbackReason::Missing)
    }
}

/// Read every slice independently, substituting its default on absence or
/// failure. Never fails as a whole.
///
/// The daily quest default is the first quest of `quest_pool` dated `today`.
/// Rotation of a stale quest is not done here; see
/// [`Session::check_quest`](crate::session::Session::check_quest).
pub fn hydrate<S, Q>(store: &S, today: CalendarDay, quest_pool: &[Q]) -> (VibeState, HydrationReport)
where
    S: SliceStore + ?Sized,
    Q: AsRef<str>,
{
    let mut report = HydrationReport::default();
    let defaults = VibeState::fresh(today, quest_pool);

    let state = VibeState {
        profile: load(store, Slice::Profile, &mut report).unwrap_or(defaults.profile),
        inventory: load(store, Slice::Inventory, &mut report).unwrap_or(defaults.inventory),
        outfit_logs: load(store, Slice::OutfitLogs, &mut report).unwrap_or(defaults.outfit_logs),
        api_key: load(store, Slice::ApiKey, &mut report).unwrap_or(defaults.api_key),
        location: load(store, Slice::Location, &mut report).unwrap_or(defaults.location),
        budget: load(store, Slice::Budget, &mut report).unwrap_or(defaults.budget),
        daily_quest: load(store, Slice::DailyQuest, &mut report).unwrap_or(defaults.daily_quest),
        chat_messages: load(store, Slice::ChatMessages, &mut report)
            .unwrap_or(defaults.chat_messages),
        planned_outfit: load(store, Slice::PlannedOutfit, &mut report)
            .unwrap_or(defaults.planned_outfit),
        wishlist: load(store, Slice::Wishlist, &mut report).unwrap_or(defaults.wishlist),
    };

    debug!(
        fallbacks = report.fallbacks.len(),
        "Hydrated state from store"
    );
    (state, report)
}

fn load<S, T>(store: &S, slice: Slice, report: &mut HydrationReport) -> Option<T>
where
    S: SliceStore + ?Sized,
    T: DeserializeOwned,
{
    let reason = match store.read(slice.key()) {
        Ok(Some(raw)) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => return Some(value),
            Err(e) => {
                warn!(slice = %slice, error = %e, "Slice is corrupt, using default");
                FallbackReason::Corrupt(e.to_string())
            }
        },
        Ok(None) => FallbackReason::Missing,
        Err(e) => {
            warn!(slice = %slice, error = %e, "Slice is unreadable, using default");
            FallbackReason::Unreadable(e.to_string())
        }
    };
    report.fallbacks.push(SliceFallback { slice, reason });
    None
}
