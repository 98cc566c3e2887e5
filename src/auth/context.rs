// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Request context and tenant resolution.
//!
//! After the gate admits a request, handlers see a `RequestContext`: the
//! verified subject id plus, when a profile row exists, the university
//! (tenant) scope and onboarding flag. The context is built once by the
//! middleware and never mutated afterwards.

use crate::models::Profile;
use crate::state::MissingProfilePolicy;
use crate::storage::{repository::ProfileRepository, CampusDatabase};

use super::error::AuthError;

/// Per-request authentication context.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Verified subject id (`sub` claim).
    pub subject_id: String,
    /// Tenant scope; absent for subjects without a profile row.
    pub university_name: Option<String>,
    /// Onboarding flag; absent for subjects without a profile row.
    pub onboarding_completed: Option<bool>,
}

impl RequestContext {
    /// Context for an authenticated subject without a profile row.
    pub fn unscoped(subject_id: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            university_name: None,
            onboarding_completed: None,
        }
    }

    /// Context scoped by a profile row.
    pub fn from_profile(profile: &Profile) -> Self {
        Self {
            subject_id: profile.id.clone(),
            university_name: profile.university_name.clone(),
            onboarding_completed: Some(profile.onboarding_completed),
        }
    }
}

/// Resolve a verified subject id to its tenant context.
///
/// A missing profile row means the subject is authenticated but not yet
/// provisioned locally; the configured policy decides whether that admits
/// an unscoped context or rejects the request.
pub fn load_context(
    storage: &CampusDatabase,
    subject_id: &str,
    policy: MissingProfilePolicy,
) -> Result<RequestContext, AuthError> {
    let profile = ProfileRepository::new(storage)
        .get(subject_id)
        .map_err(|e| AuthError::ProfileLookupFailed(e.to_string()))?;

    match profile {
        Some(profile) => Ok(RequestContext::from_profile(&profile)),
        None => match policy {
            MissingProfilePolicy::Admit => {
                tracing::debug!(subject_id, "no profile row; admitting unscoped");
                Ok(RequestContext::unscoped(subject_id))
            }
            MissingProfilePolicy::Reject => Err(AuthError::ProfileMissing),
        },
    }
}
