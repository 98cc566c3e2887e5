// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Profile repository.
//!
//! Profiles are keyed by the authentication subject id. This is the only
//! table the auth gate reads; everything else is route-handler territory.

use redb::TableDefinition;

use crate::models::Profile;
use crate::storage::{CampusDatabase, StorageResult};

/// Primary table: subject id → serialized Profile (JSON bytes).
pub(crate) const PROFILES: TableDefinition<&str, &[u8]> = TableDefinition::new("profiles");

/// Repository for profile rows.
pub struct ProfileRepository<'a> {
    db: &'a CampusDatabase,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(db: &'a CampusDatabase) -> Self {
        Self { db }
    }

    /// Look up a profile by subject id.
    pub fn get(&self, subject_id: &str) -> StorageResult<Option<Profile>> {
        self.db.get_row(PROFILES, subject_id)
    }

    /// Insert or overwrite a profile row.
    pub fn put(&self, profile: &Profile) -> StorageResult<()> {
        self.db.put_row(PROFILES, &profile.id, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db() -> (CampusDatabase, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = CampusDatabase::open(&dir.path().join("test.redb")).unwrap();
        (db, dir)
    }

    #[test]
    fn put_and_get_profile() {
        let (db, _dir) = temp_db();
        let repo = ProfileRepository::new(&db);

        let mut profile = Profile::new("u-42");
        profile.full_name = Some("Asha Rao".to_string());
        profile.university_name = Some("Demo University".to_string());
        profile.onboarding_completed = true;
        repo.put(&profile).unwrap();

        let loaded = repo.get("u-42").unwrap().unwrap();
        assert_eq!(loaded.id, "u-42");
        assert_eq!(loaded.university_name.as_deref(), Some("Demo University"));
        assert!(loaded.onboarding_completed);
    }

    #[test]
    fn get_missing_profile_returns_none() {
        let (db, _dir) = temp_db();
        let repo = ProfileRepository::new(&db);
        assert!(repo.get("nobody").unwrap().is_none());
    }

    #[test]
    fn put_overwrites_existing_row() {
        let (db, _dir) = temp_db();
        let repo = ProfileRepository::new(&db);

        let mut profile = Profile::new("u-1");
        repo.put(&profile).unwrap();

        profile.department = Some("Physics".to_string());
        repo.put(&profile).unwrap();

        let loaded = repo.get("u-1").unwrap().unwrap();
        assert_eq!(loaded.department.as_deref(), Some("Physics"));
    }
}
