// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Social feed endpoints.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreatePostRequest, SocialPost},
    state::AppState,
    storage::repository::SocialRepository,
};

/// The feed for the caller's university, newest first.
#[utoipa::path(
    get,
    path = "/api/social",
    tag = "Social",
    security(("bearer" = [])),
    responses((status = 200, description = "Feed posts", body = [SocialPost]))
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Auth(ctx): Auth,
) -> Result<Json<Vec<SocialPost>>, ApiError> {
    let Some(university) = ctx.university_name else {
        return Ok(Json(Vec::new()));
    };

    let posts = SocialRepository::new(&state.storage).list_by_university(&university)?;
    Ok(Json(posts))
}

/// Post to the feed.
#[utoipa::path(
    post,
    path = "/api/social",
    request_body = CreatePostRequest,
    tag = "Social",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Created post", body = SocialPost),
        (status = 400, description = "Empty content"),
        (status = 401, description = "Caller has no university context"),
    )
)]
pub async fn create_post(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<SocialPost>), ApiError> {
    let Some(university) = ctx.university_name else {
        return Err(ApiError::unauthorized("Unauthorized"));
    };

    if request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Content is required"));
    }

    let now = Utc::now();
    let post = SocialPost {
        id: Uuid::new_v4().to_string(),
        author_id: ctx.subject_id,
        content: request.content,
        likes_count: 0,
        university_name: university,
        created_at: now,
        updated_at: now,
    };
    SocialRepository::new(&state.storage).insert(&post)?;

    Ok((StatusCode::CREATED, Json(post)))
}
