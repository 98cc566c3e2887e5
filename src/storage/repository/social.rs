// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Social feed repository.

use redb::TableDefinition;

use crate::models::SocialPost;
use crate::storage::{CampusDatabase, StorageResult};

/// Primary table: post id → serialized SocialPost (JSON bytes).
pub(crate) const SOCIAL_POSTS: TableDefinition<&str, &[u8]> = TableDefinition::new("social_posts");

/// Index: composite key (university|!timestamp|id) → post id.
pub(crate) const SOCIAL_INDEX: TableDefinition<&[u8], &str> = TableDefinition::new("social_index");

/// Repository for feed posts.
pub struct SocialRepository<'a> {
    db: &'a CampusDatabase,
}

impl<'a> SocialRepository<'a> {
    pub fn new(db: &'a CampusDatabase) -> Self {
        Self { db }
    }

    /// Insert a post and its tenant index entry.
    pub fn insert(&self, post: &SocialPost) -> StorageResult<()> {
        self.db.insert_indexed(
            SOCIAL_POSTS,
            SOCIAL_INDEX,
            &post.university_name,
            post.created_at.timestamp(),
            &post.id,
            post,
        )
    }

    /// All posts for a university, newest first.
    pub fn list_by_university(&self, university: &str) -> StorageResult<Vec<SocialPost>> {
        self.db.list_scoped(SOCIAL_POSTS, SOCIAL_INDEX, university)
    }
}
