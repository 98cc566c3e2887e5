// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Dashboard summary endpoint.

use axum::{extract::State, Json};

use crate::{
    auth::Auth,
    error::ApiError,
    models::DashboardSummary,
    state::AppState,
    storage::repository::{AnnouncementRepository, MarketplaceRepository, SocialRepository},
};

/// Latest marketplace listings shown on the dashboard.
const MARKETPLACE_PREVIEW: usize = 3;
/// Latest announcements shown on the dashboard.
const ANNOUNCEMENT_PREVIEW: usize = 2;
/// Latest feed posts shown on the dashboard.
const SOCIAL_PREVIEW: usize = 2;

/// A snapshot of recent activity for the caller's university.
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardSummary),
        (status = 400, description = "Caller has no university context"),
    )
)]
pub async fn get_summary(
    State(state): State<AppState>,
    Auth(ctx): Auth,
) -> Result<Json<DashboardSummary>, ApiError> {
    let Some(university) = ctx.university_name else {
        return Err(ApiError::bad_request("Context required"));
    };

    let mut marketplace =
        MarketplaceRepository::new(&state.storage).list_by_university(&university)?;
    marketplace.truncate(MARKETPLACE_PREVIEW);

    let mut announcements =
        AnnouncementRepository::new(&state.storage).list_by_university(&university)?;
    announcements.truncate(ANNOUNCEMENT_PREVIEW);

    let mut social = SocialRepository::new(&state.storage).list_by_university(&university)?;
    social.truncate(SOCIAL_PREVIEW);

    Ok(Json(DashboardSummary {
        marketplace,
        announcements,
        social,
    }))
}
