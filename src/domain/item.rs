//! Wardrobe and wishlist items.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Clothing category.
///
/// Labels outside the known set are kept verbatim in [`Category::Other`] so
/// items written by other clients survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Top,
    Bottom,
    Outerwear,
    Shoes,
    Accessory,
    Other(String),
}

impl Category {
    /// The known categories, in display order.
    pub fn all() -> [Category; 5] {
        [
            Self::Top,
            Self::Bottom,
            Self::Outerwear,
            Self::Shoes,
            Self::Accessory,
        ]
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Top => "Top",
            Self::Bottom => "Bottom",
            Self::Outerwear => "Outerwear",
            Self::Shoes => "Shoes",
            Self::Accessory => "Accessory",
            Self::Other(label) => label,
        }
    }

    fn known(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "top" | "tops" => Some(Self::Top),
            "bottom" | "bottoms" => Some(Self::Bottom),
            "outerwear" | "jacket" | "jackets" => Some(Self::Outerwear),
            "shoes" | "shoe" => Some(Self::Shoes),
            "accessory" | "accessories" => Some(Self::Accessory),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Strict parse for user input: only the known categories are accepted.
impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::known(s).ok_or_else(|| format!("unknown category '{}'", s.trim()))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::known(&raw).unwrap_or(Self::Other(raw)))
    }
}

/// An owned clothing item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardrobeItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    #[serde(default = "default_clean")]
    pub is_clean: bool,
    #[serde(default)]
    pub wear_count: u32,
    #[serde(default, with = "price_format", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

fn default_clean() -> bool {
    true
}

/// A desired, not-yet-owned item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    /// Estimated price.
    #[serde(default, with = "price_format", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default)]
    pub date_added: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WishlistItem {
    /// Convert into a freshly bought wardrobe item: unworn, clean, dated now.
    pub fn into_wardrobe(self, purchased_at: DateTime<Utc>) -> WardrobeItem {
        WardrobeItem {
            id: self.id,
            name: self.name,
            category: self.category,
            is_clean: true,
            wear_count: 0,
            price: self.price,
            date_added: purchased_at,
            image: self.image,
            color: self.color,
            sub_type: self.sub_type,
            season: self.season,
        }
    }
}

/// User-entered fields for a new item; id and timestamp are assigned later.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemDraft {
    pub name: String,
    pub category: Option<Category>,
    #[serde(with = "price_format", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
}

impl ItemDraft {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category: Some(category),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn into_wardrobe(self, id: String, added_at: DateTime<Utc>) -> WardrobeItem {
        WardrobeItem {
            id,
            name: self.name,
            category: self.category.unwrap_or(Category::Top),
            is_clean: true,
            wear_count: 0,
            price: self.price.map(clamp_price),
            date_added: added_at,
            image: self.image,
            color: self.color,
            sub_type: self.sub_type,
            season: self.season,
        }
    }

    pub fn into_wishlist(self, id: String, added_at: DateTime<Utc>) -> WishlistItem {
        WishlistItem {
            id,
            name: self.name,
            category: self.category.unwrap_or(Category::Top),
            price: self.price.map(clamp_price),
            date_added: added_at,
            image: self.image,
            color: self.color,
            sub_type: self.sub_type,
            season: self.season,
            notes: None,
        }
    }
}

/// Partial edit of a wardrobe item. `None` leaves a field untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_clean: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wear_count: Option<u32>,
    #[serde(with = "price_format", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ItemPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(self, item: &mut WardrobeItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(is_clean) = self.is_clean {
            item.is_clean = is_clean;
        }
        if let Some(wear_count) = self.wear_count {
            item.wear_count = wear_count;
        }
        if let Some(price) = self.price {
            item.price = Some(clamp_price(price));
        }
        if let Some(image) = self.image {
            item.image = Some(image);
        }
        if let Some(color) = self.color {
            item.color = Some(color);
        }
    }
}

/// Prices are non-negative; anything else (including NaN) is stored as 0.
fn clamp_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Prices arrive either as JSON numbers or as numeric strings (`"25.00"`).
/// Empty or unparsable strings decode as no price.
mod price_format {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(price: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
        match price {
            Some(value) => serializer.serialize_f64(*value),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let raw = Option::<RawPrice>::deserialize(deserializer)?;
        let value = match raw {
            Some(RawPrice::Number(value)) => Some(value),
            Some(RawPrice::Text(text)) => text.trim().parse::<f64>().ok(),
            None => None,
        };
        Ok(value.map(super::clamp_price))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_prices_from_older_stores() {
        let item: WardrobeItem = serde_json::from_str(
            r#"{"id":"sample-1","name":"Classic White Tee","category":"Top",
                "isClean":true,"price":"25.00","wearCount":0,
                "dateAdded":"2025-01-05T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(item.price, Some(25.0));
        assert_eq!(item.category, Category::Top);
    }

    #[test]
    fn empty_price_string_is_no_price() {
        let item: WishlistItem =
            serde_json::from_str(r#"{"id":"w1","name":"Boots","category":"Shoes","price":""}"#)
                .unwrap();
        assert_eq!(item.price, None);
    }

    #[test]
    fn patch_merges_only_present_fields() {
        let mut item = ItemDraft::new("Jeans", Category::Bottom)
            .with_price(60.0)
            .into_wardrobe("i1".into(), Utc::now());
        ItemPatch {
            wear_count: Some(4),
            is_clean: Some(false),
            ..Default::default()
        }
        .apply(&mut item);
        assert_eq!(item.wear_count, 4);
        assert!(!item.is_clean);
        assert_eq!(item.name, "Jeans");
        assert_eq!(item.price, Some(60.0));
    }

    #[test]
    fn negative_prices_are_clamped() {
        let item = ItemDraft::new("Scarf", Category::Accessory)
            .with_price(-3.0)
            .into_wardrobe("i2".into(), Utc::now());
        assert_eq!(item.price, Some(0.0));
    }

    #[test]
    fn stored_negative_price_is_clamped_on_load() {
        let item: WardrobeItem = serde_json::from_str(
            r#"{"id":"i3","name":"Belt","category":"Accessory","price":"-12.5"}"#,
        )
        .unwrap();
        assert_eq!(item.price, Some(0.0));
        let wish: WishlistItem =
            serde_json::from_str(r#"{"id":"w2","name":"Cap","category":"Accessory","price":-4}"#)
                .unwrap();
        assert_eq!(wish.price, Some(0.0));
    }

    #[test]
    fn category_parses_loosely() {
        assert_eq!("shoes".parse::<Category>(), Ok(Category::Shoes));
        assert_eq!(" Accessories ".parse::<Category>(), Ok(Category::Accessory));
        assert_eq!("outerwear".parse::<Category>(), Ok(Category::Outerwear));
        assert!("hat".parse::<Category>().is_err());
    }

    #[test]
    fn unknown_category_labels_survive_a_round_trip() {
        let json = r#"{"id":"sample-3","name":"Denim Jacket","category":"Outerwear",
            "subType":"Jacket","color":"Blue","season":"Cool","isClean":true,
            "price":"85.00","wearCount":0}"#;
        let item: WardrobeItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.category, Category::Outerwear);

        let odd: WardrobeItem =
            serde_json::from_str(r#"{"id":"x","name":"Kimono","category":"Robe"}"#).unwrap();
        assert_eq!(odd.category, Category::Other("Robe".into()));
        let back = serde_json::to_value(&odd).unwrap();
        assert_eq!(back["category"], "Robe");
    }

    #[test]
    fn wishlist_keeps_notes_and_carries_details_on_purchase() {
        let wish: WishlistItem = serde_json::from_str(
            r#"{"id":"wish-1","name":"Varsity Jacket","category":"Outerwear",
                "subType":"Jacket","color":"Red","season":"Cool",
                "price":"150.00","notes":"Classic vibe"}"#,
        )
        .unwrap();
        assert_eq!(wish.notes.as_deref(), Some("Classic vibe"));
        let owned = wish.into_wardrobe(Utc::now());
        assert_eq!(owned.sub_type.as_deref(), Some("Jacket"));
        assert_eq!(owned.season.as_deref(), Some("Cool"));
        assert_eq!(owned.price, Some(150.0));
    }
}
