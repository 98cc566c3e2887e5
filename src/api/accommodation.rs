// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Accommodation endpoints (read-only).

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{AccommodationDetail, AccommodationListing, Paginated},
    state::AppState,
    storage::repository::AccommodationRepository,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AccommodationQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Type filter: "PG", "Hostel" or "Apartment"; "all" disables it.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// List housing for the caller's university, best-rated first.
#[utoipa::path(
    get,
    path = "/api/accommodation",
    params(AccommodationQuery),
    tag = "Accommodation",
    security(("bearer" = [])),
    responses((status = 200, description = "Page of listings", body = Paginated<AccommodationListing>))
)]
pub async fn list_accommodations(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Query(query): Query<AccommodationQuery>,
) -> Result<Json<Paginated<AccommodationListing>>, ApiError> {
    let Some(university) = ctx.university_name else {
        return Ok(Json(Paginated::empty()));
    };

    let mut listings =
        AccommodationRepository::new(&state.storage).list_by_university(&university)?;
    if let Some(kind) = query.kind.filter(|k| k != "all") {
        listings.retain(|listing| listing.kind.as_str() == kind);
    }
    listings.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(Json(Paginated::page(
        listings,
        query.offset.unwrap_or(0),
        query.limit.unwrap_or(crate::models::DEFAULT_PAGE_LIMIT),
    )))
}

/// Get a listing with its image array decoded.
#[utoipa::path(
    get,
    path = "/api/accommodation/{id}",
    params(("id" = String, Path, description = "Listing id")),
    tag = "Accommodation",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Listing detail", body = AccommodationDetail),
        (status = 404, description = "Accommodation not found"),
    )
)]
pub async fn get_accommodation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AccommodationDetail>, ApiError> {
    let mut listing = AccommodationRepository::new(&state.storage)
        .get(&id)?
        .ok_or_else(|| ApiError::not_found("Accommodation not found"))?;

    // Images are stored as a JSON array string; a malformed value decodes
    // to an empty list rather than failing the request
    let images = listing
        .images
        .take()
        .and_then(|raw| serde_json::from_str::<Vec<String>>(&raw).ok())
        .unwrap_or_default();

    Ok(Json(AccommodationDetail { listing, images }))
}
