// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Profile endpoints: own profile, onboarding completion, updates and
//! id-card verification.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{OnboardingRequest, Profile, ProfileUpdateRequest, VerifyRequest, VerifyResponse},
    state::AppState,
    storage::repository::ProfileRepository,
};

/// Get the current user's profile.
#[utoipa::path(
    get,
    path = "/api/profiles/me",
    tag = "Profiles",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Own profile", body = Profile),
        (status = 404, description = "No profile row for this subject"),
    )
)]
pub async fn get_my_profile(
    State(state): State<AppState>,
    Auth(ctx): Auth,
) -> Result<Json<Profile>, ApiError> {
    let repo = ProfileRepository::new(&state.storage);
    let profile = repo
        .get(&ctx.subject_id)?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;
    Ok(Json(profile))
}

/// Complete onboarding by picking a university.
///
/// This endpoint is exempt from the onboarding gate; it is how a new user
/// gets out of it. If the provisioning race left no profile row yet, the
/// row is created here.
#[utoipa::path(
    patch,
    path = "/api/profiles/onboarding",
    tag = "Profiles",
    security(("bearer" = [])),
    request_body = OnboardingRequest,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 400, description = "Missing university name"),
    )
)]
pub async fn complete_onboarding(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Json(request): Json<OnboardingRequest>,
) -> Result<Json<Profile>, ApiError> {
    let university = request
        .university_name
        .filter(|name| !name.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("University Name is required"))?;

    let repo = ProfileRepository::new(&state.storage);
    let mut profile = repo
        .get(&ctx.subject_id)?
        .unwrap_or_else(|| Profile::new(&ctx.subject_id));

    profile.university_name = Some(university);
    profile.onboarding_completed = true;
    profile.updated_at = Utc::now();
    repo.put(&profile)?;

    Ok(Json(profile))
}

/// Get a profile by id.
#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    params(("id" = String, Path, description = "Profile id")),
    tag = "Profiles",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Profile", body = Profile),
        (status = 404, description = "Profile not found"),
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Profile>, ApiError> {
    let profile = ProfileRepository::new(&state.storage)
        .get(&id)?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;
    Ok(Json(profile))
}

/// Update the caller's own profile.
///
/// Only department, class and mobile number are writable; name and
/// university are managed by onboarding.
#[utoipa::path(
    patch,
    path = "/api/profiles/{id}",
    params(("id" = String, Path, description = "Profile id")),
    tag = "Profiles",
    security(("bearer" = [])),
    request_body = ProfileUpdateRequest,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 400, description = "No valid fields to update"),
        (status = 403, description = "Not the caller's own profile"),
        (status = 404, description = "Profile not found"),
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Auth(ctx): Auth,
    Path(id): Path<String>,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<Profile>, ApiError> {
    if id != ctx.subject_id {
        return Err(ApiError::forbidden(
            "Unauthorized - can only update your own profile",
        ));
    }

    if request.is_empty() {
        return Err(ApiError::bad_request("No valid fields to update"));
    }

    let repo = ProfileRepository::new(&state.storage);
    let mut profile = repo
        .get(&id)?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;

    if let Some(department) = request.department {
        profile.department = Some(department);
    }
    if let Some(class_name) = request.class_name {
        profile.class_name = Some(class_name);
    }
    if let Some(mobile_number) = request.mobile_number {
        profile.mobile_number = Some(mobile_number);
    }
    profile.updated_at = Utc::now();
    repo.put(&profile)?;

    Ok(Json(profile))
}

/// Trigger id-card verification for a profile.
#[utoipa::path(
    post,
    path = "/api/profiles/{id}/verify",
    params(("id" = String, Path, description = "Profile id")),
    tag = "Profiles",
    security(("bearer" = [])),
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification passed", body = VerifyResponse),
        (status = 400, description = "Missing URL or verification failed", body = VerifyResponse),
        (status = 404, description = "Profile not found"),
    )
)]
pub async fn verify_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let id_card_url = request
        .id_card_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("ID Card URL required"))?;

    if !id_card_url_is_plausible(&id_card_url) {
        return Ok(Json(VerifyResponse {
            success: false,
            message: "Verification failed. Image unclear or invalid.".to_string(),
        }));
    }

    let repo = ProfileRepository::new(&state.storage);
    let mut profile = repo
        .get(&id)?
        .ok_or_else(|| ApiError::not_found("Profile not found"))?;
    profile.is_verified = true;
    profile.id_card_url = Some(id_card_url);
    profile.updated_at = Utc::now();
    repo.put(&profile)?;

    Ok(Json(VerifyResponse {
        success: true,
        message: "Profile verified successfully".to_string(),
    }))
}

/// Sanity check standing in for the external vision service: the URL must
/// parse and point at an http(s) resource.
fn id_card_url_is_plausible(id_card_url: &str) -> bool {
    match url::Url::parse(id_card_url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
