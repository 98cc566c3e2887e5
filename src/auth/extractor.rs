// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Axum extractor for the gate-provided request context.
//!
//! Use the `Auth` extractor in handlers to receive the context the gate
//! middleware attached:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(ctx): Auth) -> impl IntoResponse {
//!     // ctx.subject_id, ctx.university_name, ctx.onboarding_completed
//! }
//! ```
//!
//! All `/api` routes sit behind `require_auth`, so the context is always
//! present there; a route wired up without the gate rejects with 401.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::state::AppState;

use super::context::RequestContext;
use super::error::AuthError;

/// Extractor for the authenticated request context.
pub struct Auth(pub RequestContext);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .map(Auth)
            .ok_or(AuthError::MissingAuthHeader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::storage::CampusDatabase;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = CampusDatabase::open(&dir.path().join("test.redb")).unwrap();
        (AppState::new(db), dir)
    }

    #[tokio::test]
    async fn extractor_reads_context_from_extensions() {
        let (state, _dir) = test_state();
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let context = RequestContext {
            subject_id: "u-42".to_string(),
            university_name: Some("Demo University".to_string()),
            onboarding_completed: Some(true),
        };
        parts.extensions.insert(context.clone());

        let Auth(extracted) = Auth::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(extracted, context);
    }

    #[tokio::test]
    async fn extractor_rejects_without_gate() {
        let (state, _dir) = test_state();
        let mut parts = Request::builder()
            .uri("/test")
            .body(())
            .unwrap()
            .into_parts()
            .0;

        let result = Auth::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(AuthError::MissingAuthHeader)));
    }
}
