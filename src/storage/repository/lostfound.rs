// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Lost & found repository.

use redb::TableDefinition;

use crate::models::LostFoundReport;
use crate::storage::{CampusDatabase, StorageResult};

/// Primary table: report id → serialized LostFoundReport (JSON bytes).
pub(crate) const LOST_FOUND: TableDefinition<&str, &[u8]> = TableDefinition::new("lost_found");

/// Index: composite key (university|!timestamp|id) → report id.
pub(crate) const LOST_FOUND_INDEX: TableDefinition<&[u8], &str> =
    TableDefinition::new("lost_found_index");

/// Repository for lost-and-found reports.
pub struct LostFoundRepository<'a> {
    db: &'a CampusDatabase,
}

impl<'a> LostFoundRepository<'a> {
    pub fn new(db: &'a CampusDatabase) -> Self {
        Self { db }
    }

    /// Insert a report and its tenant index entry.
    pub fn insert(&self, report: &LostFoundReport) -> StorageResult<()> {
        self.db.insert_indexed(
            LOST_FOUND,
            LOST_FOUND_INDEX,
            &report.university_name,
            report.created_at.timestamp(),
            &report.id,
            report,
        )
    }

    /// Look up a report by id.
    pub fn get(&self, id: &str) -> StorageResult<Option<LostFoundReport>> {
        self.db.get_row(LOST_FOUND, id)
    }

    /// All reports for a university, newest first.
    pub fn list_by_university(&self, university: &str) -> StorageResult<Vec<LostFoundReport>> {
        self.db.list_scoped(LOST_FOUND, LOST_FOUND_INDEX, university)
    }
}
