// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Food directory endpoints (read-only).

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{FoodListing, MenuItem, MenuItemDetail, Paginated, RestaurantDetail, RestaurantRef},
    state::AppState,
    storage::repository::FoodRepository,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct FoodQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Cuisine filter; "all" disables it.
    pub cuisine: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct MenuQuery {
    /// Menu category filter; "all" disables it.
    pub category: Option<String>,
}

/// Sort helper: best-rated first.
fn by_rating_desc<T>(items: &mut [T], rating: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| {
        rating(b)
            .partial_cmp(&rating(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// List restaurants for the caller's university, best-rated first.
#[utoipa::path(
    get,
    path = "/api/food",
    params(FoodQuery),
    tag = "Food",
    security(("bearer" = [])),
    responses((status = 200, description = "Page of restaurants", body = Paginated<FoodListing>))
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Query(query): Query<FoodQuery>,
) -> Result<Json<Paginated<FoodListing>>, ApiError> {
    let Some(university) = ctx.university_name else {
        return Ok(Json(Paginated::empty()));
    };

    let mut listings = FoodRepository::new(&state.storage).list_by_university(&university)?;
    if let Some(cuisine) = query.cuisine.filter(|c| c != "all") {
        listings.retain(|listing| listing.cuisine.as_deref() == Some(cuisine.as_str()));
    }
    by_rating_desc(&mut listings, |l| l.rating);

    Ok(Json(Paginated::page(
        listings,
        query.offset.unwrap_or(0),
        query.limit.unwrap_or(crate::models::DEFAULT_PAGE_LIMIT),
    )))
}

/// Get a restaurant with its full menu.
#[utoipa::path(
    get,
    path = "/api/food/{id}",
    params(("id" = String, Path, description = "Restaurant id")),
    tag = "Food",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Restaurant with menu", body = RestaurantDetail),
        (status = 404, description = "Restaurant not found"),
    )
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RestaurantDetail>, ApiError> {
    let repo = FoodRepository::new(&state.storage);
    let restaurant = repo
        .get_listing(&id)?
        .ok_or_else(|| ApiError::not_found("Restaurant not found"))?;

    let mut menu = repo.menu_for_restaurant(&id)?;
    // Group by category, best-rated first within each
    menu.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal))
    });

    Ok(Json(RestaurantDetail { restaurant, menu }))
}

/// Get a restaurant's menu, optionally filtered by category.
#[utoipa::path(
    get,
    path = "/api/food/{id}/menu",
    params(("id" = String, Path, description = "Restaurant id"), MenuQuery),
    tag = "Food",
    security(("bearer" = [])),
    responses((status = 200, description = "Menu items", body = [MenuItem]))
)]
pub async fn list_menu(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<MenuQuery>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    let mut menu = FoodRepository::new(&state.storage).menu_for_restaurant(&id)?;
    if let Some(category) = query.category.filter(|c| c != "all") {
        menu.retain(|item| item.category.as_deref() == Some(category.as_str()));
    }
    by_rating_desc(&mut menu, |m| m.rating);

    Ok(Json(menu))
}

/// Get a single menu item with its restaurant reference.
#[utoipa::path(
    get,
    path = "/api/food/menu-item/{id}",
    params(("id" = String, Path, description = "Menu item id")),
    tag = "Food",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Menu item with restaurant", body = MenuItemDetail),
        (status = 404, description = "Menu item not found"),
    )
)]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MenuItemDetail>, ApiError> {
    let repo = FoodRepository::new(&state.storage);
    let item = repo
        .get_menu_item(&id)?
        .ok_or_else(|| ApiError::not_found("Menu item not found"))?;

    let restaurant = repo.get_listing(&item.restaurant_id)?.map(|r| RestaurantRef {
        id: r.id,
        name: r.name,
        location: r.location,
    });

    Ok(Json(MenuItemDetail { item, restaurant }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RequestContext;
    use chrono::Utc;

    use crate::storage::CampusDatabase;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = CampusDatabase::open(&dir.path().join("test.redb")).unwrap();
        (AppState::new(db), dir)
    }

    fn scoped_ctx() -> Auth {
        Auth(RequestContext {
            subject_id: "u-1".to_string(),
            university_name: Some("Demo University".to_string()),
            onboarding_completed: Some(true),
        })
    }

    fn seed_listing(state: &AppState, id: &str, cuisine: &str, rating: f64) {
        FoodRepository::new(&state.storage)
            .insert_listing(&FoodListing {
                id: id.to_string(),
                name: format!("Restaurant {id}"),
                description: None,
                cuisine: Some(cuisine.to_string()),
                tags: None,
                address: None,
                phone: None,
                timing: None,
                price_range: None,
                rating,
                review_count: 5,
                image_url: None,
                location: "East Gate".to_string(),
                university_name: "Demo University".to_string(),
                created_at: Utc::now(),
            })
            .unwrap();
    }

    fn seed_menu_item(state: &AppState, id: &str, restaurant: &str, category: &str, rating: f64) {
        FoodRepository::new(&state.storage)
            .insert_menu_item(&MenuItem {
                id: id.to_string(),
                restaurant_id: restaurant.to_string(),
                name: format!("Dish {id}"),
                description: None,
                price: "120".to_string(),
                category: Some(category.to_string()),
                image_url: None,
                is_veg: true,
                is_available: true,
                rating,
                review_count: 2,
                created_at: Utc::now(),
            })
            .unwrap();
    }

    #[tokio::test]
    async fn restaurants_sorted_by_rating_desc() {
        let (state, _dir) = test_state();
        seed_listing(&state, "r-low", "Chinese", 3.1);
        seed_listing(&state, "r-high", "Chinese", 4.8);

        let Json(page) = list_restaurants(
            State(state),
            scoped_ctx(),
            Query(FoodQuery {
                limit: None,
                offset: None,
                cuisine: None,
            }),
        )
        .await
        .unwrap();
        assert_eq!(page.items[0].id, "r-high");
        assert_eq!(page.items[1].id, "r-low");
    }

    #[tokio::test]
    async fn cuisine_filter_narrows_results() {
        let (state, _dir) = test_state();
        seed_listing(&state, "r-1", "Chinese", 4.0);
        seed_listing(&state, "r-2", "Italian", 4.0);

        let Json(page) = list_restaurants(
            State(state),
            scoped_ctx(),
            Query(FoodQuery {
                limit: None,
                offset: None,
                cuisine: Some("Italian".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].id, "r-2");
    }

    #[tokio::test]
    async fn restaurant_detail_includes_sorted_menu() {
        let (state, _dir) = test_state();
        seed_listing(&state, "r-1", "Chinese", 4.0);
        seed_menu_item(&state, "m-1", "r-1", "Starters", 3.5);
        seed_menu_item(&state, "m-2", "r-1", "Starters", 4.5);
        seed_menu_item(&state, "m-3", "r-1", "Drinks", 4.0);

        let Json(detail) = get_restaurant(State(state), Path("r-1".to_string()))
            .await
            .unwrap();
        assert_eq!(detail.menu.len(), 3);
        // Categories grouped alphabetically, best-rated first inside each
        assert_eq!(detail.menu[0].id, "m-3");
        assert_eq!(detail.menu[1].id, "m-2");
        assert_eq!(detail.menu[2].id, "m-1");
    }

    #[tokio::test]
    async fn menu_category_filter() {
        let (state, _dir) = test_state();
        seed_listing(&state, "r-1", "Chinese", 4.0);
        seed_menu_item(&state, "m-1", "r-1", "Starters", 3.5);
        seed_menu_item(&state, "m-2", "r-1", "Drinks", 4.5);

        let Json(menu) = list_menu(
            State(state),
            Path("r-1".to_string()),
            Query(MenuQuery {
                category: Some("Drinks".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu[0].id, "m-2");
    }

    #[tokio::test]
    async fn menu_item_detail_joins_restaurant() {
        let (state, _dir) = test_state();
        seed_listing(&state, "r-1", "Chinese", 4.0);
        seed_menu_item(&state, "m-1", "r-1", "Starters", 3.5);

        let Json(detail) = get_menu_item(State(state), Path("m-1".to_string()))
            .await
            .unwrap();
        let restaurant = detail.restaurant.expect("restaurant joined");
        assert_eq!(restaurant.id, "r-1");
        assert_eq!(restaurant.location, "East Gate");
    }

    #[tokio::test]
    async fn unknown_restaurant_404s() {
        let (state, _dir) = test_state();
        let err = get_restaurant(State(state), Path("missing".to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Restaurant not found");
    }
}
