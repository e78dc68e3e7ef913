//! Starter wardrobe offered to new users.

use chrono::{DateTime, Utc};

use super::item::{Category, WardrobeItem, WishlistItem};

struct Sample {
    id: &'static str,
    name: &'static str,
    category: Category,
    sub_type: &'static str,
    color: &'static str,
    season: &'static str,
    price: f64,
}

fn sample(
    id: &'static str,
    name: &'static str,
    category: Category,
    sub_type: &'static str,
    color: &'static str,
    season: &'static str,
    price: f64,
) -> Sample {
    Sample {
        id,
        name,
        category,
        sub_type,
        color,
        season,
        price,
    }
}

fn inventory_rows() -> [Sample; 10] {
    [
        sample("sample-1", "Classic White Tee", Category::Top, "T-Shirt", "White", "All", 25.0),
        sample("sample-2", "Black Slim Jeans", Category::Bottom, "Jeans", "Black", "All", 60.0),
        sample("sample-3", "Denim Jacket", Category::Outerwear, "Jacket", "Blue", "Cool", 85.0),
        sample("sample-4", "Chunky Sneakers", Category::Shoes, "Sneakers", "White", "All", 90.0),
        sample("sample-5", "Beige Chinos", Category::Bottom, "Chinos", "Beige", "All", 45.0),
        sample("sample-6", "Navy Blue Hoodie", Category::Top, "Hoodie", "Navy", "Cool", 55.0),
        sample("sample-7", "Leather Chelsea Boots", Category::Shoes, "Boots", "Brown", "Cool", 120.0),
        sample("sample-8", "Graphic Band Tee", Category::Top, "T-Shirt", "Black", "Warm", 30.0),
        sample("sample-9", "Grey Sweatpants", Category::Bottom, "Sweatpants", "Grey", "Cool", 40.0),
        sample("sample-10", "Dad Hat", Category::Accessory, "Hat", "Green", "All", 20.0),
    ]
}

fn wishlist_rows() -> [(Sample, &'static str); 3] {
    [
        (
            sample("wish-1", "Varsity Jacket", Category::Outerwear, "Jacket", "Red", "Cool", 150.0),
            "Classic vibe",
        ),
        (
            sample("wish-2", "Silk Scarf", Category::Accessory, "Scarf", "Gold", "All", 85.0),
            "For formal events",
        ),
        (
            sample("wish-3", "High Top Converses", Category::Shoes, "Sneakers", "Black", "All", 65.0),
            "Beaters",
        ),
    ]
}

/// Ten clean, unworn items dated `at`.
pub fn sample_inventory(at: DateTime<Utc>) -> Vec<WardrobeItem> {
    inventory_rows()
        .into_iter()
        .map(|s| WardrobeItem {
            id: s.id.to_string(),
            name: s.name.to_string(),
            category: s.category,
            is_clean: true,
            wear_count: 0,
            price: Some(s.price),
            date_added: at,
            image: None,
            color: Some(s.color.to_string()),
            sub_type: Some(s.sub_type.to_string()),
            season: Some(s.season.to_string()),
        })
        .collect()
}

pub fn sample_wishlist(at: DateTime<Utc>) -> Vec<WishlistItem> {
    wishlist_rows()
        .into_iter()
        .map(|(s, notes)| WishlistItem {
            id: s.id.to_string(),
            name: s.name.to_string(),
            category: s.category,
            price: Some(s.price),
            date_added: at,
            image: None,
            color: Some(s.color.to_string()),
            sub_type: Some(s.sub_type.to_string()),
            season: Some(s.season.to_string()),
            notes: Some(notes.to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique_across_both_lists() {
        let at = Utc::now();
        let mut ids = HashSet::new();
        for item in sample_inventory(at) {
            assert!(ids.insert(item.id));
        }
        for item in sample_wishlist(at) {
            assert!(ids.insert(item.id));
        }
        assert_eq!(ids.len(), 13);
    }

    #[test]
    fn sample_wardrobe_covers_every_core_category() {
        let inventory = sample_inventory(Utc::now());
        for category in [Category::Top, Category::Bottom, Category::Shoes] {
            assert!(inventory.iter().any(|i| i.category == category));
        }
        assert!(inventory.iter().all(|i| i.is_clean && i.wear_count == 0));
    }
}
