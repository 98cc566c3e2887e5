// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Food directory repository: restaurants and their menus.
//!
//! Restaurants are indexed per university; menu items per restaurant.

use redb::TableDefinition;

use crate::models::{FoodListing, MenuItem};
use crate::storage::{CampusDatabase, StorageResult};

/// Primary table: restaurant id → serialized FoodListing (JSON bytes).
pub(crate) const FOOD_LISTINGS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("food_listings");

/// Index: composite key (university|!timestamp|id) → restaurant id.
pub(crate) const FOOD_INDEX: TableDefinition<&[u8], &str> = TableDefinition::new("food_index");

/// Primary table: menu item id → serialized MenuItem (JSON bytes).
pub(crate) const MENU_ITEMS: TableDefinition<&str, &[u8]> = TableDefinition::new("menu_items");

/// Index: composite key (restaurant_id|!timestamp|id) → menu item id.
pub(crate) const MENU_INDEX: TableDefinition<&[u8], &str> = TableDefinition::new("menu_index");

/// Repository for the food directory.
pub struct FoodRepository<'a> {
    db: &'a CampusDatabase,
}

impl<'a> FoodRepository<'a> {
    pub fn new(db: &'a CampusDatabase) -> Self {
        Self { db }
    }

    /// Insert a restaurant and its tenant index entry.
    pub fn insert_listing(&self, listing: &FoodListing) -> StorageResult<()> {
        self.db.insert_indexed(
            FOOD_LISTINGS,
            FOOD_INDEX,
            &listing.university_name,
            listing.created_at.timestamp(),
            &listing.id,
            listing,
        )
    }

    /// Look up a restaurant by id.
    pub fn get_listing(&self, id: &str) -> StorageResult<Option<FoodListing>> {
        self.db.get_row(FOOD_LISTINGS, id)
    }

    /// All restaurants for a university.
    pub fn list_by_university(&self, university: &str) -> StorageResult<Vec<FoodListing>> {
        self.db.list_scoped(FOOD_LISTINGS, FOOD_INDEX, university)
    }

    /// Insert a menu item under its restaurant.
    pub fn insert_menu_item(&self, item: &MenuItem) -> StorageResult<()> {
        self.db.insert_indexed(
            MENU_ITEMS,
            MENU_INDEX,
            &item.restaurant_id,
            item.created_at.timestamp(),
            &item.id,
            item,
        )
    }

    /// Look up a menu item by id.
    pub fn get_menu_item(&self, id: &str) -> StorageResult<Option<MenuItem>> {
        self.db.get_row(MENU_ITEMS, id)
    }

    /// All menu items for a restaurant.
    pub fn menu_for_restaurant(&self, restaurant_id: &str) -> StorageResult<Vec<MenuItem>> {
        self.db.list_scoped(MENU_ITEMS, MENU_INDEX, restaurant_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn temp_db() -> (CampusDatabase, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = CampusDatabase::open(&dir.path().join("test.redb")).unwrap();
        (db, dir)
    }

    fn sample_listing(id: &str, rating: f64) -> FoodListing {
        FoodListing {
            id: id.to_string(),
            name: format!("Restaurant {id}"),
            description: None,
            cuisine: Some("Chinese".to_string()),
            tags: None,
            address: None,
            phone: None,
            timing: Some("9 AM - 11 PM".to_string()),
            price_range: Some("₹200-500".to_string()),
            rating,
            review_count: 12,
            image_url: None,
            location: "East Gate".to_string(),
            university_name: "Demo University".to_string(),
            created_at: Utc::now(),
        }
    }

    fn sample_menu_item(id: &str, restaurant_id: &str, category: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: format!("Dish {id}"),
            description: None,
            price: "120".to_string(),
            category: Some(category.to_string()),
            image_url: None,
            is_veg: true,
            is_available: true,
            rating: 4.0,
            review_count: 3,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_and_list_restaurants() {
        let (db, _dir) = temp_db();
        let repo = FoodRepository::new(&db);

        repo.insert_listing(&sample_listing("r-1", 4.5)).unwrap();
        repo.insert_listing(&sample_listing("r-2", 3.9)).unwrap();

        let listings = repo.list_by_university("Demo University").unwrap();
        assert_eq!(listings.len(), 2);
    }

    #[test]
    fn menu_is_scoped_to_restaurant() {
        let (db, _dir) = temp_db();
        let repo = FoodRepository::new(&db);

        repo.insert_menu_item(&sample_menu_item("m-1", "r-1", "Starters")).unwrap();
        repo.insert_menu_item(&sample_menu_item("m-2", "r-1", "Main Course")).unwrap();
        repo.insert_menu_item(&sample_menu_item("m-3", "r-2", "Drinks")).unwrap();

        let menu = repo.menu_for_restaurant("r-1").unwrap();
        assert_eq!(menu.len(), 2);
        assert!(menu.iter().all(|m| m.restaurant_id == "r-1"));
    }

    #[test]
    fn get_menu_item_by_id() {
        let (db, _dir) = temp_db();
        let repo = FoodRepository::new(&db);

        repo.insert_menu_item(&sample_menu_item("m-9", "r-1", "Desserts")).unwrap();
        let item = repo.get_menu_item("m-9").unwrap().unwrap();
        assert_eq!(item.category.as_deref(), Some("Desserts"));
        assert!(repo.get_menu_item("m-404").unwrap().is_none());
    }
}
