// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Marketplace endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{
        CreateMarketplaceItemRequest, MarketplaceItem, MarketplaceItemDetail, Paginated,
        SellerInfo,
    },
    state::AppState,
    storage::repository::{MarketplaceRepository, ProfileRepository},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct MarketplaceQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Category filter; "all" disables it.
    pub category: Option<String>,
}

/// List marketplace items for the caller's university.
#[utoipa::path(
    get,
    path = "/api/marketplace",
    params(MarketplaceQuery),
    tag = "Marketplace",
    security(("bearer" = [])),
    responses((status = 200, description = "Page of items", body = Paginated<MarketplaceItem>))
)]
pub async fn list_items(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Query(query): Query<MarketplaceQuery>,
) -> Result<Json<Paginated<MarketplaceItem>>, ApiError> {
    // Unscoped contexts (no profile row yet) see an empty page
    let Some(university) = ctx.university_name else {
        return Ok(Json(Paginated::empty()));
    };

    let mut items = MarketplaceRepository::new(&state.storage).list_by_university(&university)?;
    if let Some(category) = query.category.filter(|c| c != "all") {
        items.retain(|item| item.category.as_deref() == Some(category.as_str()));
    }

    Ok(Json(Paginated::page(
        items,
        query.offset.unwrap_or(0),
        query.limit.unwrap_or(crate::models::DEFAULT_PAGE_LIMIT),
    )))
}

/// Create a marketplace listing.
#[utoipa::path(
    post,
    path = "/api/marketplace",
    request_body = CreateMarketplaceItemRequest,
    tag = "Marketplace",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Created listing", body = MarketplaceItem),
        (status = 400, description = "Missing title"),
        (status = 401, description = "Caller has no university context"),
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateMarketplaceItemRequest>,
) -> Result<(StatusCode, Json<MarketplaceItem>), ApiError> {
    let Some(university) = ctx.university_name else {
        return Err(ApiError::unauthorized(
            "Unauthorized or missing profile context",
        ));
    };

    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let now = Utc::now();
    let item = MarketplaceItem {
        id: Uuid::new_v4().to_string(),
        seller_id: ctx.subject_id,
        title: request.title,
        description: request.description,
        price: request.price.into_string(),
        category: request.category,
        condition: request.condition,
        manufactured_year: request.manufactured_year,
        is_negotiable: request.is_negotiable,
        image_url: request.image_url,
        university_name: university,
        created_at: now,
        updated_at: now,
    };
    MarketplaceRepository::new(&state.storage).insert(&item)?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Get a listing with its seller's contact details.
#[utoipa::path(
    get,
    path = "/api/marketplace/{id}",
    params(("id" = String, Path, description = "Listing id")),
    tag = "Marketplace",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Listing with seller info", body = MarketplaceItemDetail),
        (status = 404, description = "Item not found"),
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MarketplaceItemDetail>, ApiError> {
    let item = MarketplaceRepository::new(&state.storage)
        .get(&id)?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    let seller = ProfileRepository::new(&state.storage)
        .get(&item.seller_id)?
        .map(SellerInfo::from);

    Ok(Json(MarketplaceItemDetail { item, seller }))
}
