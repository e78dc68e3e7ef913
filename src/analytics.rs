//! Read-side projections.
//!
//! Everything here is a pure function of the current state and is
//! recomputed on every call; nothing is cached.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Category, WardrobeItem, WishlistItem};
use crate::engine::rewards;

/// How good a cost-per-wear figure is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueTier {
    /// Under 1 per wear.
    Great,
    Fair,
    /// Over 10 per wear.
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostPerWear {
    pub value: f64,
    pub tier: ValueTier,
}

/// Price divided by wears, or the price itself while unworn.
///
/// `None` when the item has no positive price.
pub fn cost_per_wear(price: Option<f64>, wears: u32) -> Option<CostPerWear> {
    let price = price.filter(|p| p.is_finite() && *p > 0.0)?;
    let value = if wears == 0 {
        price
    } else {
        price / f64::from(wears)
    };
    let tier = if value < 1.0 {
        ValueTier::Great
    } else if value > 10.0 {
        ValueTier::Poor
    } else {
        ValueTier::Fair
    };
    Some(CostPerWear { value, tier })
}

pub fn item_cost_per_wear(item: &WardrobeItem) -> Option<CostPerWear> {
    cost_per_wear(item.price, item.wear_count)
}

pub fn category_breakdown(inventory: &[WardrobeItem]) -> BTreeMap<Category, usize> {
    let mut counts = BTreeMap::new();
    for item in inventory {
        *counts.entry(item.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// Up to `limit` items, most worn first. Ties keep inventory order.
pub fn most_worn(inventory: &[WardrobeItem], limit: usize) -> Vec<&WardrobeItem> {
    let mut items: Vec<&WardrobeItem> = inventory.iter().collect();
    items.sort_by(|a, b| b.wear_count.cmp(&a.wear_count));
    items.truncate(limit);
    items
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cleanliness {
    pub clean: usize,
    pub dirty: usize,
}

impl Cleanliness {
    pub fn of(inventory: &[WardrobeItem]) -> Self {
        let clean = inventory.iter().filter(|i| i.is_clean).count();
        Self {
            clean,
            dirty: inventory.len() - clean,
        }
    }

    /// Whole-number percentage of clean items; 0 for an empty wardrobe.
    pub fn percent_clean(&self) -> u32 {
        let total = self.clean + self.dirty;
        if total == 0 {
            return 0;
        }
        ((self.clean as f64 / total as f64) * 100.0).round() as u32
    }
}

/// Inventory-derived unlocks. Unlike badges these are not stored and can
/// be lost again (a dirty shirt re-locks Clean Freak).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Achievement {
    WardrobeStuffer,
    SustainableStyle,
    CleanFreak,
}

impl Achievement {
    pub fn all() -> &'static [Achievement] {
        &[Self::WardrobeStuffer, Self::SustainableStyle, Self::CleanFreak]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::WardrobeStuffer => "Wardrobe Stuffer",
            Self::SustainableStyle => "Sustainable Style",
            Self::CleanFreak => "Clean Freak",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::WardrobeStuffer => "Upload 10 items to your inventory.",
            Self::SustainableStyle => "Wear the same item 10 times.",
            Self::CleanFreak => "Have all items marked as clean.",
        }
    }

    pub fn is_unlocked(&self, inventory: &[WardrobeItem]) -> bool {
        match self {
            Self::WardrobeStuffer => inventory.len() >= 10,
            Self::SustainableStyle => inventory.iter().any(|i| i.wear_count >= 10),
            Self::CleanFreak => !inventory.is_empty() && inventory.iter().all(|i| i.is_clean),
        }
    }
}

pub fn unlocked_achievements(inventory: &[WardrobeItem]) -> Vec<Achievement> {
    Achievement::all()
        .iter()
        .copied()
        .filter(|a| a.is_unlocked(inventory))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u64,
    pub into_level: u64,
    pub per_level: u64,
}

impl LevelProgress {
    pub fn from_xp(xp: u64) -> Self {
        Self {
            level: rewards::level_for(xp),
            into_level: rewards::level_progress(xp),
            per_level: rewards::XP_PER_LEVEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Name,
    MostWorn,
    LeastWorn,
    /// Cheapest per wear first; unpriced items last.
    CostPerWear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryQuery {
    pub category: Option<Category>,
    pub clean_only: bool,
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    pub sort: SortKey,
}

/// Filtered and sorted view of the inventory.
pub fn query<'a>(inventory: &'a [WardrobeItem], q: &InventoryQuery) -> Vec<&'a WardrobeItem> {
    let needle = q.search.as_ref().map(|s| s.to_lowercase());
    let mut items: Vec<&WardrobeItem> = inventory
        .iter()
        .filter(|i| q.category.as_ref().is_none_or(|c| i.category == *c))
        .filter(|i| !q.clean_only || i.is_clean)
        .filter(|i| {
            needle
                .as_deref()
                .is_none_or(|n| i.name.to_lowercase().contains(n))
        })
        .collect();

    match q.sort {
        SortKey::Newest => items.sort_by(|a, b| b.date_added.cmp(&a.date_added)),
        SortKey::Name => items.sort_by_key(|i| i.name.to_lowercase()),
        SortKey::MostWorn => items.sort_by(|a, b| b.wear_count.cmp(&a.wear_count)),
        SortKey::LeastWorn => items.sort_by_key(|i| i.wear_count),
        SortKey::CostPerWear => items.sort_by(|a, b| {
            match (item_cost_per_wear(a), item_cost_per_wear(b)) {
                (Some(x), Some(y)) => x.value.partial_cmp(&y.value).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }),
    }
    items
}

/// Sum of estimated wishlist prices.
pub fn wishlist_total(wishlist: &[WishlistItem]) -> f64 {
    wishlist.iter().filter_map(|i| i.price).sum()
}

/// Sum of known purchase prices across the wardrobe.
pub fn wardrobe_value(inventory: &[WardrobeItem]) -> f64 {
    inventory.iter().filter_map(|i| i.price).sum()
}

/// Random clean top, bottom and shoes, skipping any category with no clean
/// item. Returns item ids in that order.
pub fn suggest_outfit<R: Rng + ?Sized>(inventory: &[WardrobeItem], rng: &mut R) -> Vec<String> {
    [Category::Top, Category::Bottom, Category::Shoes]
        .iter()
        .filter_map(|category| {
            let candidates: Vec<&WardrobeItem> = inventory
                .iter()
                .filter(|i| i.is_clean && i.category == *category)
                .collect();
            candidates.choose(rng).map(|i| i.id.clone())
        })
        .collect()
}
