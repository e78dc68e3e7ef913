use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::item::WardrobeItem;

/// A logged outfit.
///
/// `items` is a value snapshot taken when the log was created, so later
/// edits to (or deletion of) those wardrobe items never rewrite history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutfitLog {
    pub id: String,
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    pub items: Vec<WardrobeItem>,
    #[serde(default)]
    pub vibe_score: u8,
    /// Text of the daily quest if it was already completed when logging.
    #[serde(default, rename = "questCompleted")]
    pub quest_completed_text: Option<String>,
}

impl OutfitLog {
    pub fn item_names(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.name.as_str()).collect()
    }
}
