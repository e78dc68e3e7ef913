//! Typed records owned by the engine.

mod chat;
mod day;
mod item;
mod log;
mod profile;
pub mod quest;
pub mod sample;
mod secret;

pub use chat::{ChatMessage, ChatRole};
pub use day::CalendarDay;
pub use item::{Category, ItemDraft, ItemPatch, WardrobeItem, WishlistItem};
pub use log::OutfitLog;
pub use profile::{Badges, ProfilePatch, UserProfile};
pub use quest::{DailyQuest, DEFAULT_QUESTS};
pub use secret::SecureString;
