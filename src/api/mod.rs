// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    auth::require_auth,
    models::{
        AccommodationDetail, AccommodationListing, AccommodationType, Announcement,
        CreateLostFoundRequest, CreateMarketplaceItemRequest, CreatePostRequest, DashboardSummary,
        FoodListing, LostFoundDetail, LostFoundListItem, LostFoundReport, LostFoundType,
        MarketplaceItem, MarketplaceItemDetail, MenuItem, MenuItemDetail, OnboardingRequest,
        Paginated, PriceInput, Profile, ProfileUpdateRequest, ReporterInfo, RestaurantDetail,
        RestaurantRef, SellerInfo, SocialPost, VerifyRequest, VerifyResponse,
    },
    state::AppState,
};

pub mod accommodation;
pub mod dashboard;
pub mod food;
pub mod health;
pub mod lostfound;
pub mod marketplace;
pub mod profiles;
pub mod social;

pub fn router(state: AppState) -> Router {
    // Everything under /api runs through the access gate
    let api_routes = Router::new()
        .route("/profiles/me", get(profiles::get_my_profile))
        .route("/profiles/onboarding", patch(profiles::complete_onboarding))
        .route(
            "/profiles/{id}",
            get(profiles::get_profile).patch(profiles::update_profile),
        )
        .route("/profiles/{id}/verify", post(profiles::verify_profile))
        .route(
            "/marketplace",
            get(marketplace::list_items).post(marketplace::create_item),
        )
        .route("/marketplace/{id}", get(marketplace::get_item))
        .route(
            "/lostfound",
            get(lostfound::list_reports).post(lostfound::create_report),
        )
        .route("/lostfound/{id}", get(lostfound::get_report))
        .route("/social", get(social::list_posts).post(social::create_post))
        .route("/food", get(food::list_restaurants))
        .route("/food/menu-item/{id}", get(food::get_menu_item))
        .route("/food/{id}", get(food::get_restaurant))
        .route("/food/{id}/menu", get(food::list_menu))
        .route("/accommodation", get(accommodation::list_accommodations))
        .route("/accommodation/{id}", get(accommodation::get_accommodation))
        .route("/dashboard/summary", get(dashboard::get_summary))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone());

    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .nest("/api", api_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::banner,
        health::health,
        health::liveness,
        health::readiness,
        profiles::get_my_profile,
        profiles::complete_onboarding,
        profiles::get_profile,
        profiles::update_profile,
        profiles::verify_profile,
        marketplace::list_items,
        marketplace::create_item,
        marketplace::get_item,
        lostfound::list_reports,
        lostfound::create_report,
        lostfound::get_report,
        social::list_posts,
        social::create_post,
        food::list_restaurants,
        food::get_restaurant,
        food::list_menu,
        food::get_menu_item,
        accommodation::list_accommodations,
        accommodation::get_accommodation,
        dashboard::get_summary
    ),
    components(
        schemas(
            Profile,
            OnboardingRequest,
            ProfileUpdateRequest,
            VerifyRequest,
            VerifyResponse,
            MarketplaceItem,
            CreateMarketplaceItemRequest,
            MarketplaceItemDetail,
            SellerInfo,
            PriceInput,
            LostFoundReport,
            LostFoundType,
            CreateLostFoundRequest,
            LostFoundListItem,
            LostFoundDetail,
            ReporterInfo,
            SocialPost,
            CreatePostRequest,
            Announcement,
            FoodListing,
            MenuItem,
            RestaurantDetail,
            RestaurantRef,
            MenuItemDetail,
            AccommodationListing,
            AccommodationType,
            AccommodationDetail,
            DashboardSummary,
            Paginated<MarketplaceItem>,
            Paginated<LostFoundListItem>,
            Paginated<FoodListing>,
            Paginated<AccommodationListing>
        )
    ),
    tags(
        (name = "Health", description = "Service health and banner"),
        (name = "Profiles", description = "User profiles and onboarding"),
        (name = "Marketplace", description = "Campus marketplace"),
        (name = "LostFound", description = "Lost & found board"),
        (name = "Social", description = "University social feed"),
        (name = "Food", description = "Restaurant directory"),
        (name = "Accommodation", description = "Housing directory"),
        (name = "Dashboard", description = "Activity summary")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::storage::CampusDatabase;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = CampusDatabase::open(&dir.path().join("test.redb")).unwrap();
        (AppState::new(db), dir)
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let (state, _dir) = test_state();
        let app = router(state);
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn banner_is_public() {
        let (state, _dir) = test_state();
        let app = router(state);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn api_routes_sit_behind_the_gate() {
        let (state, _dir) = test_state();
        let app = router(state);

        for path in ["/api/marketplace", "/api/social", "/api/dashboard/summary"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
        }
    }
}
