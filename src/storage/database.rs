// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Embedded campus database backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! Each domain stores rows as `id → serialized JSON bytes` plus, where
//! listings are scanned per university (or per restaurant for menus), an
//! index table with composite keys `scope|!timestamp_be|id → id` so a
//! forward range scan yields newest-first ordering.

use std::path::Path;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};

use super::repository::{
    accommodation::{ACCOMMODATIONS, ACCOMMODATION_INDEX},
    announcements::{ANNOUNCEMENTS, ANNOUNCEMENT_INDEX},
    food::{FOOD_INDEX, FOOD_LISTINGS, MENU_INDEX, MENU_ITEMS},
    lostfound::{LOST_FOUND, LOST_FOUND_INDEX},
    marketplace::{MARKETPLACE_INDEX, MARKETPLACE_ITEMS},
    profiles::PROFILES,
    social::{SOCIAL_INDEX, SOCIAL_POSTS},
};
use super::{StorageError, StorageResult};

// =============================================================================
// Index Key Helpers
// =============================================================================

/// Build a composite key for a scoped index table.
///
/// Format: `scope | inverted_timestamp_be_bytes | id`
///
/// The inverted timestamp ensures newest-first ordering when scanning forward.
pub(crate) fn make_index_key(scope: &str, timestamp: i64, id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(scope.len() + 1 + 8 + 1 + id.len());
    key.extend_from_slice(scope.as_bytes());
    key.push(b'|');
    key.extend_from_slice(&(!timestamp as u64).to_be_bytes());
    key.push(b'|');
    key.extend_from_slice(id.as_bytes());
    key
}

/// Build a prefix key for range scanning all rows under a scope.
fn make_prefix(scope: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(scope.len() + 1);
    prefix.extend_from_slice(scope.as_bytes());
    prefix.push(b'|');
    prefix
}

/// Build the upper bound for a range scan (prefix with 0xFF bytes appended).
fn make_prefix_end(scope: &str) -> Vec<u8> {
    let mut end = Vec::with_capacity(scope.len() + 1 + 20);
    end.extend_from_slice(scope.as_bytes());
    end.push(b'|');
    end.extend_from_slice(&[0xFF; 20]);
    end
}

// =============================================================================
// CampusDatabase
// =============================================================================

/// Embedded ACID database holding all campus data.
pub struct CampusDatabase {
    db: Database,
}

impl CampusDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(PROFILES)?;
            let _ = write_txn.open_table(MARKETPLACE_ITEMS)?;
            let _ = write_txn.open_table(MARKETPLACE_INDEX)?;
            let _ = write_txn.open_table(LOST_FOUND)?;
            let _ = write_txn.open_table(LOST_FOUND_INDEX)?;
            let _ = write_txn.open_table(SOCIAL_POSTS)?;
            let _ = write_txn.open_table(SOCIAL_INDEX)?;
            let _ = write_txn.open_table(ANNOUNCEMENTS)?;
            let _ = write_txn.open_table(ANNOUNCEMENT_INDEX)?;
            let _ = write_txn.open_table(FOOD_LISTINGS)?;
            let _ = write_txn.open_table(FOOD_INDEX)?;
            let _ = write_txn.open_table(MENU_ITEMS)?;
            let _ = write_txn.open_table(MENU_INDEX)?;
            let _ = write_txn.open_table(ACCOMMODATIONS)?;
            let _ = write_txn.open_table(ACCOMMODATION_INDEX)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    /// Insert or overwrite a row in an unindexed table.
    pub(crate) fn put_row<T: Serialize>(
        &self,
        rows: TableDefinition<&str, &[u8]>,
        id: &str,
        row: &T,
    ) -> StorageResult<()> {
        let json = serde_json::to_vec(row)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(rows)?;
            table.insert(id, json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Insert a row and its scoped index entry in one transaction.
    pub(crate) fn insert_indexed<T: Serialize>(
        &self,
        rows: TableDefinition<&str, &[u8]>,
        index: TableDefinition<&[u8], &str>,
        scope: &str,
        created_at: i64,
        id: &str,
        row: &T,
    ) -> StorageResult<()> {
        let json = serde_json::to_vec(row)?;
        let key = make_index_key(scope, created_at, id);
        let write_txn = self.db.begin_write()?;
        {
            let mut row_table = write_txn.open_table(rows)?;
            row_table.insert(id, json.as_slice())?;

            let mut idx_table = write_txn.open_table(index)?;
            idx_table.insert(key.as_slice(), id)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Look up a single row by id.
    pub(crate) fn get_row<T: DeserializeOwned>(
        &self,
        rows: TableDefinition<&str, &[u8]>,
        id: &str,
    ) -> StorageResult<Option<T>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(rows)?;
        match table.get(id)? {
            Some(value) => {
                let row: T = serde_json::from_slice(value.value())?;
                Ok(Some(row))
            }
            None => Ok(None),
        }
    }

    /// List all rows under a scope, newest first.
    pub(crate) fn list_scoped<T: DeserializeOwned>(
        &self,
        rows: TableDefinition<&str, &[u8]>,
        index: TableDefinition<&[u8], &str>,
        scope: &str,
    ) -> StorageResult<Vec<T>> {
        let read_txn = self.db.begin_read()?;
        let idx_table = read_txn.open_table(index)?;
        let row_table = read_txn.open_table(rows)?;

        let prefix = make_prefix(scope);
        let prefix_end = make_prefix_end(scope);

        let mut results = Vec::new();
        for entry in idx_table.range(prefix.as_slice()..prefix_end.as_slice())? {
            let entry = entry?;
            let id = entry.1.value().to_string();
            let value = row_table.get(id.as_str())?.ok_or_else(|| {
                StorageError::NotFound(format!("indexed row {id}"))
            })?;
            let row: T = serde_json::from_slice(value.value())?;
            results.push(row);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_index_key_orders_newest_first() {
        // Newer timestamps produce smaller composite keys
        let key_old = make_index_key("Demo University", 1000, "id-1");
        let key_new = make_index_key("Demo University", 2000, "id-2");
        assert!(key_new < key_old, "newer timestamps should sort first");
    }

    #[test]
    fn prefix_bounds_cover_scope_keys_only() {
        let key = make_index_key("Uni A", 1234, "id-1");
        let prefix = make_prefix("Uni A");
        let end = make_prefix_end("Uni A");
        assert!(key.as_slice() >= prefix.as_slice());
        assert!(key.as_slice() < end.as_slice());

        let other = make_index_key("Uni B", 1234, "id-1");
        assert!(other.as_slice() >= end.as_slice() || other.as_slice() < prefix.as_slice());
    }

    #[test]
    fn open_creates_all_tables() {
        let dir = tempfile::tempdir().unwrap();
        let db = CampusDatabase::open(&dir.path().join("test.redb")).unwrap();

        // A read of a pre-created empty table must not fail
        let read_txn = db.db.begin_read().unwrap();
        let table = read_txn.open_table(PROFILES).unwrap();
        assert!(table.get("missing").unwrap().is_none());
    }
}
