// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Announcement repository.
//!
//! Announcements are published out-of-band by university staff tooling;
//! the API only reads them for the dashboard summary.

use redb::TableDefinition;

use crate::models::Announcement;
use crate::storage::{CampusDatabase, StorageResult};

/// Primary table: announcement id → serialized Announcement (JSON bytes).
pub(crate) const ANNOUNCEMENTS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("announcements");

/// Index: composite key (university|!timestamp|id) → announcement id.
pub(crate) const ANNOUNCEMENT_INDEX: TableDefinition<&[u8], &str> =
    TableDefinition::new("announcement_index");

/// Repository for announcements.
pub struct AnnouncementRepository<'a> {
    db: &'a CampusDatabase,
}

impl<'a> AnnouncementRepository<'a> {
    pub fn new(db: &'a CampusDatabase) -> Self {
        Self { db }
    }

    /// Insert an announcement and its tenant index entry.
    pub fn insert(&self, announcement: &Announcement) -> StorageResult<()> {
        self.db.insert_indexed(
            ANNOUNCEMENTS,
            ANNOUNCEMENT_INDEX,
            &announcement.university_name,
            announcement.created_at.timestamp(),
            &announcement.id,
            announcement,
        )
    }

    /// All announcements for a university, newest first.
    pub fn list_by_university(&self, university: &str) -> StorageResult<Vec<Announcement>> {
        self.db
            .list_scoped(ANNOUNCEMENTS, ANNOUNCEMENT_INDEX, university)
    }
}
