// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Lost & found endpoints.

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
        CreateLostFoundRequest, LostFoundDetail, LostFoundListItem, LostFoundReport,
        LostFoundType, Paginated, ReporterInfo,
    },
    state::AppState,
    storage::repository::{LostFoundRepository, ProfileRepository},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct LostFoundQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    /// Report type filter: "lost" or "found".
    #[serde(rename = "type")]
    pub kind: Option<LostFoundType>,
}

/// List reports for the caller's university, reporter names included.
#[utoipa::path(
    get,
    path = "/api/lostfound",
    params(LostFoundQuery),
    tag = "LostFound",
    security(("bearer" = [])),
    responses((status = 200, description = "Page of reports", body = Paginated<LostFoundListItem>))
)]
pub async fn list_reports(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Query(query): Query<LostFoundQuery>,
) -> Result<Json<Paginated<LostFoundListItem>>, ApiError> {
    let Some(university) = ctx.university_name else {
        return Ok(Json(Paginated::empty()));
    };

    let mut reports = LostFoundRepository::new(&state.storage).list_by_university(&university)?;
    if let Some(kind) = query.kind {
        reports.retain(|report| report.kind == kind);
    }

    let profiles = ProfileRepository::new(&state.storage);
    let mut items = Vec::with_capacity(reports.len());
    for report in reports {
        let reporter_name = profiles
            .get(&report.reporter_id)?
            .and_then(|profile| profile.full_name)
            .unwrap_or_else(|| "Anonymous".to_string());
        items.push(LostFoundListItem {
            report,
            reporter_name,
        });
    }

    Ok(Json(Paginated::page(
        items,
        query.offset.unwrap_or(0),
        query.limit.unwrap_or(crate::models::DEFAULT_PAGE_LIMIT),
    )))
}

/// Report a lost or found item.
#[utoipa::path(
    post,
    path = "/api/lostfound",
    request_body = CreateLostFoundRequest,
    tag = "LostFound",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Created report", body = LostFoundReport),
        (status = 400, description = "Missing item name"),
        (status = 401, description = "Caller has no university context"),
    )
)]
pub async fn create_report(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreateLostFoundRequest>,
) -> Result<(StatusCode, Json<LostFoundReport>), ApiError> {
    let Some(university) = ctx.university_name else {
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    if request.item_name.trim().is_empty() {
        return Err(ApiError::bad_request("Item name is required"));
    }

    let now = Utc::now();
    let report = LostFoundReport {
        id: Uuid::new_v4().to_string(),
        reporter_id: ctx.subject_id,
        item_name: request.item_name,
        description: request.description,
        kind: request.kind,
        location: request.location,
        image_url: request.image_url,
        status: request.status.unwrap_or_else(|| "open".to_string()),
        university_name: university,
        created_at: now,
        updated_at: now,
    };
    LostFoundRepository::new(&state.storage).insert(&report)?;

    Ok((StatusCode::CREATED, Json(report)))
}

/// Get a report with the reporter's contact details.
#[utoipa::path(
    get,
    path = "/api/lostfound/{id}",
    params(("id" = String, Path, description = "Report id")),
    tag = "LostFound",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Report with reporter info", body = LostFoundDetail),
        (status = 404, description = "Item not found"),
    )
)]
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LostFoundDetail>, ApiError> {
    let report = LostFoundRepository::new(&state.storage)
        .get(&id)?
        .ok_or_else(|| ApiError::not_found("Item not found"))?;

    let reporter = ProfileRepository::new(&state.storage)
        .get(&report.reporter_id)?
        .map(ReporterInfo::from);

    Ok(Json(LostFoundDetail { report, reporter }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RequestContext;
    use crate::models::Profile;
    use crate::storage::CampusDatabase;

    fn test_state() -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = CampusDatabase::open(&dir.path().join("test.redb")).unwrap();
        (AppState::new(db), dir)
    }

    fn scoped_ctx(subject: &str) -> Auth {
        Auth(RequestContext {
            subject_id: subject.to_string(),
            university_name: Some("Demo University".to_string()),
            onboarding_completed: Some(true),
        })
    }

    fn report_request(item_name: &str, kind: LostFoundType) -> CreateLostFoundRequest {
        CreateLostFoundRequest {
            item_name: item_name.to_string(),
            description: None,
            kind,
            location: Some("Library".to_string()),
            image_url: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_status_to_open() {
        let (state, _dir) = test_state();

        let (status, Json(report)) = create_report(
            State(state),
            scoped_ctx("u-1"),
            Json(report_request("Umbrella", LostFoundType::Lost)),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(report.status, "open");
    }

    #[tokio::test]
    async fn list_flattens_reporter_name_with_fallback() {
        let (state, _dir) = test_state();

        let mut named = Profile::new("u-named");
        named.full_name = Some("Asha Rao".to_string());
        ProfileRepository::new(&state.storage).put(&named).unwrap();

        create_report(
            State(state.clone()),
            scoped_ctx("u-named"),
            Json(report_request("Scarf", LostFoundType::Found)),
        )
        .await
        .unwrap();
        create_report(
            State(state.clone()),
            scoped_ctx("u-ghost"),
            Json(report_request("Keys", LostFoundType::Lost)),
        )
        .await
        .unwrap();

        let Json(page) = list_reports(
            State(state),
            scoped_ctx("u-anyone"),
            Query(LostFoundQuery {
                limit: None,
                offset: None,
                kind: None,
            }),
        )
        .await
        .unwrap();

        assert_eq!(page.total, 2);
        let names: Vec<_> = page.items.iter().map(|i| i.reporter_name.as_str()).collect();
        assert!(names.contains(&"Asha Rao"));
        assert!(names.contains(&"Anonymous"));
    }

    #[tokio::test]
    async fn type_filter_narrows_results() {
        let (state, _dir) = test_state();

        create_report(
            State(state.clone()),
            scoped_ctx("u-1"),
            Json(report_request("Umbrella", LostFoundType::Lost)),
        )
        .await
        .unwrap();
        create_report(
            State(state.clone()),
            scoped_ctx("u-1"),
            Json(report_request("Wallet", LostFoundType::Found)),
        )
        .await
        .unwrap();

        let Json(page) = list_reports(
            State(state),
            scoped_ctx("u-1"),
            Query(LostFoundQuery {
                limit: None,
                offset: None,
                kind: Some(LostFoundType::Found),
            }),
        )
        .await
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].report.item_name, "Wallet");
    }

    #[tokio::test]
    async fn detail_joins_reporter() {
        let (state, _dir) = test_state();

        let mut reporter = Profile::new("u-1");
        reporter.full_name = Some("Dev Patel".to_string());
        ProfileRepository::new(&state.storage).put(&reporter).unwrap();

        let (_, Json(report)) = create_report(
            State(state.clone()),
            scoped_ctx("u-1"),
            Json(report_request("Calculator", LostFoundType::Found)),
        )
        .await
        .unwrap();

        let Json(detail) = get_report(State(state), Path(report.id)).await.unwrap();
        assert_eq!(detail.reporter.unwrap().full_name.as_deref(), Some("Dev Patel"));
    }
}
