// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! The access gate: authentication middleware for all `/api` routes.
//!
//! Per request: bearer token → signature verification (ES256 against the
//! resolved JWKS key) → profile lookup for tenant scope → onboarding
//! enforcement → `RequestContext` attached to request extensions. Any
//! failure short-circuits with one of the three generic rejection bodies;
//! the downstream handler never runs.
//!
//! Apply with `axum::middleware::from_fn_with_state(state, require_auth)`
//! on the `/api` router subtree.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};

use crate::state::{AppState, AuthConfig};

use super::claims::AccessClaims;
use super::context::{load_context, RequestContext};
use super::error::AuthError;
use super::jwks::JwksManager;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Path fragment identifying the onboarding completion endpoint, which a
/// not-yet-onboarded user must still be able to reach.
const ONBOARDING_EXEMPT_PATH: &str = "profiles/onboarding";

/// Authentication middleware function.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();

    match authenticate(&state, request.headers(), &path).await {
        Ok(context) => {
            request.extensions_mut().insert(context);
            next.run(request).await
        }
        Err(err) => {
            // The sub-reason stays in the logs; clients get a generic body.
            tracing::warn!(error = %err, path = %path, "request rejected by auth gate");
            err.into_response()
        }
    }
}

/// Run the full gate: header → token → subject → tenant context → policy.
async fn authenticate(
    state: &AppState,
    headers: &HeaderMap,
    path: &str,
) -> Result<RequestContext, AuthError> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or(AuthError::MissingAuthHeader)?
        .to_str()
        .map_err(|_| AuthError::InvalidAuthHeader)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AuthError::InvalidAuthHeader)?
        .trim();

    let subject_id = verify_token(token, &state.auth_config).await?;
    let context = load_context(
        &state.storage,
        &subject_id,
        state.auth_config.missing_profile_policy,
    )?;

    // Users who have not picked their university may only reach the
    // onboarding completion endpoint.
    if context.onboarding_completed == Some(false) && !path.contains(ONBOARDING_EXEMPT_PATH) {
        return Err(AuthError::OnboardingRequired);
    }

    Ok(context)
}

/// Verify a bearer token and return the subject id.
///
/// In production mode (JWKS configured), verifies the ES256 signature
/// against the resolved key. In development mode, only validates
/// structure and expiry (no signature verification).
pub(crate) async fn verify_token(token: &str, config: &AuthConfig) -> Result<String, AuthError> {
    if let Some(ref jwks) = config.jwks {
        verify_token_es256(token, jwks, config).await
    } else {
        verify_token_development(token)
    }
}

/// Production verification against the JWKS-resolved key.
async fn verify_token_es256(
    token: &str,
    jwks: &JwksManager,
    config: &AuthConfig,
) -> Result<String, AuthError> {
    // Decode header (unverified) to learn which key signed the token
    let header = decode_header(token).map_err(|_| AuthError::TokenMalformed)?;
    let kid = header.kid.ok_or(AuthError::KeyIdMissing)?;

    let decoding_key = jwks.get_decoding_key(&kid).await?;

    let mut validation = Validation::new(Algorithm::ES256);
    validation.leeway = CLOCK_SKEW_LEEWAY;

    if let Some(ref issuer) = config.issuer {
        validation.set_issuer(&[issuer]);
    }
    if let Some(ref audience) = config.audience {
        validation.set_audience(&[audience]);
    } else {
        validation.validate_aud = false;
    }

    let token_data = decode::<AccessClaims>(token, &decoding_key, &validation).map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
            | jsonwebtoken::errors::ErrorKind::InvalidSignature
            | jsonwebtoken::errors::ErrorKind::ImmatureSignature
            | jsonwebtoken::errors::ErrorKind::InvalidIssuer
            | jsonwebtoken::errors::ErrorKind::InvalidAudience
            | jsonwebtoken::errors::ErrorKind::InvalidAlgorithm => AuthError::TokenInvalid,
            _ => AuthError::TokenMalformed,
        }
    })?;

    subject_from(token_data.claims)
}

/// Development verification (no signature check).
///
/// WARNING: This should only be used in development environments.
fn verify_token_development(token: &str) -> Result<String, AuthError> {
    let token_data = jsonwebtoken::dangerous::insecure_decode::<AccessClaims>(token)
        .map_err(|_| AuthError::TokenMalformed)?;

    let claims = token_data.claims;

    // Check expiration manually
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs() as i64;

    if claims.exp > 0 && claims.exp < now - CLOCK_SKEW_LEEWAY as i64 {
        return Err(AuthError::TokenInvalid);
    }

    subject_from(claims)
}

/// Extract a non-empty subject claim.
fn subject_from(claims: AccessClaims) -> Result<String, AuthError> {
    claims
        .sub
        .filter(|sub| !sub.is_empty())
        .ok_or(AuthError::SubjectMissing)
}
