//! Externally encoded commands.
//!
//! A [`Command`] is what a presentation surface sends: the user-facing part
//! of an action, without clock or random inputs. The session resolves it
//! into an [`Action`](super::Action) before dispatch.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatRole, ItemDraft, ItemPatch, ProfilePatch};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Command {
    LogOutfit {
        item_ids: Vec<String>,
    },
    CompleteQuest,
    LaundryDay,
    AddItem {
        item: ItemDraft,
    },
    UpdateItem {
        id: String,
        updates: ItemPatch,
    },
    ToggleClean {
        id: String,
    },
    DeleteItem {
        id: String,
    },
    AddToWishlist {
        item: ItemDraft,
    },
    RemoveFromWishlist {
        id: String,
    },
    BuyItem {
        id: String,
    },
    SetBudget {
        amount: f64,
    },
    AdjustBudget {
        delta: f64,
    },
    SetLocation {
        location: String,
    },
    SetApiKey {
        key: String,
    },
    PlanOutfit {
        item_ids: Vec<String>,
    },
    AppendChatMessage {
        role: ChatRole,
        text: String,
    },
    ClearChat,
    UpdateProfile {
        updates: ProfilePatch,
    },
    /// Replace inventory and wishlist with the starter wardrobe.
    LoadSampleData,
    ClearData,
    /// Any tag not listed above.
    #[serde(other)]
    Unrecognized,
}

impl Command {
    /// Decode one JSON command. Unknown tags decode to
    /// [`Command::Unrecognized`]; malformed JSON is an error.
    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
