// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Marketplace repository.

use redb::TableDefinition;

use crate::models::MarketplaceItem;
use crate::storage::{CampusDatabase, StorageResult};

/// Primary table: item id → serialized MarketplaceItem (JSON bytes).
pub(crate) const MARKETPLACE_ITEMS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("marketplace_items");

/// Index: composite key (university|!timestamp|id) → item id.
pub(crate) const MARKETPLACE_INDEX: TableDefinition<&[u8], &str> =
    TableDefinition::new("marketplace_index");

/// Repository for marketplace listings.
pub struct MarketplaceRepository<'a> {
    db: &'a CampusDatabase,
}

impl<'a> MarketplaceRepository<'a> {
    pub fn new(db: &'a CampusDatabase) -> Self {
        Self { db }
    }

    /// Insert a listing and its tenant index entry.
    pub fn insert(&self, item: &MarketplaceItem) -> StorageResult<()> {
        self.db.insert_indexed(
            MARKETPLACE_ITEMS,
            MARKETPLACE_INDEX,
            &item.university_name,
            item.created_at.timestamp(),
            &item.id,
            item,
        )
    }

    /// Look up a listing by id.
    pub fn get(&self, id: &str) -> StorageResult<Option<MarketplaceItem>> {
        self.db.get_row(MARKETPLACE_ITEMS, id)
    }

    /// All listings for a university, newest first.
    pub fn list_by_university(&self, university: &str) -> StorageResult<Vec<MarketplaceItem>> {
        self.db
            .list_scoped(MARKETPLACE_ITEMS, MARKETPLACE_INDEX, university)
    }
}
