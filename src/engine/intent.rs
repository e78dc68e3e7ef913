use std::fmt;

use chrono::{DateTime, Utc};

use crate::domain::{
    CalendarDay, ChatMessage, DailyQuest, ItemPatch, OutfitLog, SecureString, UserProfile,
    WardrobeItem, WishlistItem,
};
use crate::mvi::Intent;

use super::state::{Slice, VibeState};

/// New value for a slice: either a replacement or a transformation of the
/// prior value. Both are explicit so the engine never inspects a payload
/// to guess which one it got.
pub enum Update<T> {
    Replace(T),
    Transform(Box<dyn FnOnce(T) -> T + Send>),
}

impl<T> Update<T> {
    pub fn transform(f: impl FnOnce(T) -> T + Send + 'static) -> Self {
        Self::Transform(Box::new(f))
    }

    pub fn apply(self, prior: T) -> T {
        match self {
            Self::Replace(value) => value,
            Self::Transform(f) => f(prior),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Update<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Replace(value) => f.debug_tuple("Replace").field(value).finish(),
            Self::Transform(_) => f.write_str("Transform(<fn>)"),
        }
    }
}

/// A replace-or-transform update addressed to one named slice.
#[derive(Debug)]
pub enum SliceUpdate {
    Profile(Update<UserProfile>),
    Inventory(Update<Vec<WardrobeItem>>),
    OutfitLogs(Update<Vec<OutfitLog>>),
    ApiKey(Update<SecureString>),
    Location(Update<String>),
    Budget(Update<f64>),
    DailyQuest(Update<DailyQuest>),
    ChatMessages(Update<Vec<ChatMessage>>),
    PlannedOutfit(Update<Vec<String>>),
    Wishlist(Update<Vec<WishlistItem>>),
}

impl SliceUpdate {
    pub fn slice(&self) -> Slice {
        match self {
            Self::Profile(_) => Slice::Profile,
            Self::Inventory(_) => Slice::Inventory,
            Self::OutfitLogs(_) => Slice::OutfitLogs,
            Self::ApiKey(_) => Slice::ApiKey,
            Self::Location(_) => Slice::Location,
            Self::Budget(_) => Slice::Budget,
            Self::DailyQuest(_) => Slice::DailyQuest,
            Self::ChatMessages(_) => Slice::ChatMessages,
            Self::PlannedOutfit(_) => Slice::PlannedOutfit,
            Self::Wishlist(_) => Slice::Wishlist,
        }
    }
}

/// Payload for logging an outfit. Clock and random inputs are resolved by
/// the caller before dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitEntry {
    pub item_ids: Vec<String>,
    pub day: CalendarDay,
    pub log_id: String,
    pub timestamp: DateTime<Utc>,
    pub vibe_score: u8,
}

/// Every transition the engine accepts.
#[derive(Debug)]
pub enum Action {
    SetSlice(SliceUpdate),
    LogOutfit(OutfitEntry),
    CompleteQuest,
    LaundryDay,
    AddItem(WardrobeItem),
    UpdateItem {
        id: String,
        patch: ItemPatch,
    },
    ToggleClean(String),
    DeleteItem(String),
    AddToWishlist(WishlistItem),
    RemoveFromWishlist(String),
    BuyItem {
        item: WishlistItem,
        purchased_at: DateTime<Utc>,
    },
    AppendChatMessage(ChatMessage),
    ClearData(Box<VibeState>),
    /// An externally encoded command whose tag this build does not know.
    Unrecognized,
}

impl Intent for Action {}

impl Action {
    /// Short stable name for logging.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SetSlice(_) => "SET_SLICE",
            Self::LogOutfit(_) => "LOG_OUTFIT",
            Self::CompleteQuest => "COMPLETE_QUEST",
            Self::LaundryDay => "LAUNDRY_DAY",
            Self::AddItem(_) => "ADD_ITEM",
            Self::UpdateItem { .. } => "UPDATE_ITEM",
            Self::ToggleClean(_) => "TOGGLE_CLEAN",
            Self::DeleteItem(_) => "DELETE_ITEM",
            Self::AddToWishlist(_) => "ADD_TO_WISHLIST",
            Self::RemoveFromWishlist(_) => "REMOVE_FROM_WISHLIST",
            Self::BuyItem { .. } => "BUY_ITEM",
            Self::AppendChatMessage(_) => "APPEND_CHAT_MESSAGE",
            Self::ClearData(_) => "CLEAR_DATA",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}
