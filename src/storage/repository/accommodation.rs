// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Accommodation repository.

use redb::TableDefinition;

use crate::models::AccommodationListing;
use crate::storage::{CampusDatabase, StorageResult};

/// Primary table: listing id → serialized AccommodationListing (JSON bytes).
pub(crate) const ACCOMMODATIONS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("accommodation_listings");

/// Index: composite key (university|!timestamp|id) → listing id.
pub(crate) const ACCOMMODATION_INDEX: TableDefinition<&[u8], &str> =
    TableDefinition::new("accommodation_index");

/// Repository for housing listings.
pub struct AccommodationRepository<'a> {
    db: &'a CampusDatabase,
}

impl<'a> AccommodationRepository<'a> {
    pub fn new(db: &'a CampusDatabase) -> Self {
        Self { db }
    }

    /// Insert a listing and its tenant index entry.
    pub fn insert(&self, listing: &AccommodationListing) -> StorageResult<()> {
        self.db.insert_indexed(
            ACCOMMODATIONS,
            ACCOMMODATION_INDEX,
            &listing.university_name,
            listing.created_at.timestamp(),
            &listing.id,
            listing,
        )
    }

    /// Look up a listing by id.
    pub fn get(&self, id: &str) -> StorageResult<Option<AccommodationListing>> {
        self.db.get_row(ACCOMMODATIONS, id)
    }

    /// All listings for a university.
    pub fn list_by_university(&self, university: &str) -> StorageResult<Vec<AccommodationListing>> {
        self.db
            .list_scoped(ACCOMMODATIONS, ACCOMMODATION_INDEX, university)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccommodationType;
    use chrono::Utc;

    fn temp_db() -> (CampusDatabase, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = CampusDatabase::open(&dir.path().join("test.redb")).unwrap();
        (db, dir)
    }

    fn sample_listing(id: &str, kind: AccommodationType) -> AccommodationListing {
        AccommodationListing {
            id: id.to_string(),
            name: format!("Residence {id}"),
            kind,
            description: None,
            address: None,
            phone: None,
            amenities: Some("WiFi, Laundry".to_string()),
            images: Some(r#"["https://img.test/a.jpg"]"#.to_string()),
            min_price: Some("6000".to_string()),
            max_price: Some("9000".to_string()),
            rent_range: None,
            rating: 4.1,
            review_count: 7,
            location: "South Gate".to_string(),
            contact: None,
            university_name: "Demo University".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_and_get_listing() {
        let (db, _dir) = temp_db();
        let repo = AccommodationRepository::new(&db);

        repo.insert(&sample_listing("a-1", AccommodationType::Pg)).unwrap();
        let loaded = repo.get("a-1").unwrap().unwrap();
        assert_eq!(loaded.kind, AccommodationType::Pg);
        assert_eq!(loaded.images.as_deref(), Some(r#"["https://img.test/a.jpg"]"#));
    }

    #[test]
    fn list_by_university_filters_tenant() {
        let (db, _dir) = temp_db();
        let repo = AccommodationRepository::new(&db);

        repo.insert(&sample_listing("a-1", AccommodationType::Hostel)).unwrap();
        let mut other = sample_listing("a-2", AccommodationType::Apartment);
        other.university_name = "Other University".to_string();
        repo.insert(&other).unwrap();

        let list = repo.list_by_university("Demo University").unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].id, "a-1");
    }
}
