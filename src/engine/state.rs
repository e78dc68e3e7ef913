use std::fmt;

use crate::domain::{
    CalendarDay, ChatMessage, DailyQuest, OutfitLog, SecureString, UserProfile, WardrobeItem,
    WishlistItem,
};
use crate::mvi::Model;

/// The whole aggregate owned by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VibeState {
    pub profile: UserProfile,
    pub inventory: Vec<WardrobeItem>,
    /// Newest first.
    pub outfit_logs: Vec<OutfitLog>,
    pub api_key: SecureString,
    pub location: String,
    /// Signed, no floor.
    pub budget: f64,
    pub daily_quest: DailyQuest,
    pub chat_messages: Vec<ChatMessage>,
    /// Wardrobe item ids pinned for tomorrow.
    pub planned_outfit: Vec<String>,
    pub wishlist: Vec<WishlistItem>,
}

impl Model for VibeState {}

impl VibeState {
    /// Zeroed aggregate for a first run (or a full reset) on `today`.
    pub fn fresh<S: AsRef<str>>(today: CalendarDay, quest_pool: &[S]) -> Self {
        Self {
            daily_quest: DailyQuest::first_of(quest_pool, today),
            ..Default::default()
        }
    }

    pub fn item(&self, id: &str) -> Option<&WardrobeItem> {
        self.inventory.iter().find(|i| i.id == id)
    }

    pub fn wishlist_item(&self, id: &str) -> Option<&WishlistItem> {
        self.wishlist.iter().find(|i| i.id == id)
    }

    pub fn clean_items(&self) -> impl Iterator<Item = &WardrobeItem> {
        self.inventory.iter().filter(|i| i.is_clean)
    }

    pub fn dirty_count(&self) -> usize {
        self.inventory.iter().filter(|i| !i.is_clean).count()
    }

    /// Slices whose value differs between `self` and `other`.
    pub fn changed_slices(&self, other: &VibeState) -> Vec<Slice> {
        Slice::all()
            .iter()
            .copied()
            .filter(|slice| !self.slice_eq(other, *slice))
            .collect()
    }

    fn slice_eq(&self, other: &VibeState, slice: Slice) -> bool {
        match slice {
            Slice::Profile => self.profile == other.profile,
            Slice::Inventory => self.inventory == other.inventory,
            Slice::OutfitLogs => self.outfit_logs == other.outfit_logs,
            Slice::ApiKey => self.api_key == other.api_key,
            Slice::Location => self.location == other.location,
            // Bitwise so a NaN budget still compares equal to itself.
            Slice::Budget => self.budget.to_bits() == other.budget.to_bits(),
            Slice::DailyQuest => self.daily_quest == other.daily_quest,
            Slice::ChatMessages => self.chat_messages == other.chat_messages,
            Slice::PlannedOutfit => self.planned_outfit == other.planned_outfit,
            Slice::Wishlist => self.wishlist == other.wishlist,
        }
    }

    /// Serialize one slice as JSON for the durable store.
    pub fn encode_slice(&self, slice: Slice) -> serde_json::Result<String> {
        match slice {
            Slice::Profile => serde_json::to_string(&self.profile),
            Slice::Inventory => serde_json::to_string(&self.inventory),
            Slice::OutfitLogs => serde_json::to_string(&self.outfit_logs),
            Slice::ApiKey => serde_json::to_string(&self.api_key),
            Slice::Location => serde_json::to_string(&self.location),
            Slice::Budget => serde_json::to_string(&self.budget),
            Slice::DailyQuest => serde_json::to_string(&self.daily_quest),
            Slice::ChatMessages => serde_json::to_string(&self.chat_messages),
            Slice::PlannedOutfit => serde_json::to_string(&self.planned_outfit),
            Slice::Wishlist => serde_json::to_string(&self.wishlist),
        }
    }
}

/// Independently persisted top-level slice of [`VibeState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slice {
    Profile,
    Inventory,
    OutfitLogs,
    ApiKey,
    Location,
    Budget,
    DailyQuest,
    ChatMessages,
    PlannedOutfit,
    Wishlist,
}

impl Slice {
    /// Stable store key. Once published, do not rename.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Profile => "userProfile",
            Self::Inventory => "inventory",
            Self::OutfitLogs => "outfitLogs",
            Self::ApiKey => "apiKey",
            Self::Location => "location",
            Self::Budget => "vibe_budget",
            Self::DailyQuest => "dailyQuest",
            Self::ChatMessages => "chatMessages",
            Self::PlannedOutfit => "tomorrowOutfit",
            Self::Wishlist => "wishlist",
        }
    }

    /// All variants, in hydration order.
    pub fn all() -> &'static [Slice] {
        &[
            Self::Profile,
            Self::Inventory,
            Self::OutfitLogs,
            Self::ApiKey,
            Self::Location,
            Self::Budget,
            Self::DailyQuest,
            Self::ChatMessages,
            Self::PlannedOutfit,
            Self::Wishlist,
        ]
    }

    pub fn parse(key: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.key() == key)
    }
}

impl fmt::Display for Slice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_and_are_unique() {
        for slice in Slice::all() {
            assert_eq!(Slice::parse(slice.key()), Some(*slice));
        }
        let mut keys: Vec<_> = Slice::all().iter().map(|s| s.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), Slice::all().len());
    }

    #[test]
    fn changed_slices_reports_only_differences() {
        let a = VibeState::default();
        let mut b = a.clone();
        b.budget = -12.5;
        b.location = "Lisbon".into();
        assert_eq!(b.changed_slices(&a), vec![Slice::Location, Slice::Budget]);
        assert!(a.changed_slices(&a).is_empty());
    }
}
