// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Authentication errors.
//!
//! The wire contract is deliberately coarse: clients only ever see one of
//! three bodies (`Unauthorized`, `Invalid Token`, `ONBOARDING_REQUIRED`).
//! The specific failure is available via `Display` for server-side logs
//! and must never leak into a response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Authentication error type.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Authorization header is not a well-formed bearer token
    InvalidAuthHeader,
    /// Token header carries no key id
    KeyIdMissing,
    /// Key-set document could not be fetched
    KeySetFetchFailed(String),
    /// No key in the fetched set matches the token's key id
    KeyNotFound,
    /// Token could not be decoded
    TokenMalformed,
    /// Signature or time-based claim verification failed
    TokenInvalid,
    /// Verified payload lacks a subject claim
    SubjectMissing,
    /// Profile lookup against the data store failed
    ProfileLookupFailed(String),
    /// Valid token but no profile row, under the strict policy
    ProfileMissing,
    /// Authenticated but onboarding has not been completed
    OnboardingRequired,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
}

impl AuthError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::OnboardingRequired => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }

    /// The generic body exposed to clients.
    ///
    /// Verification internals are collapsed to "Invalid Token"; only the
    /// absence of credentials and the onboarding gate are distinguishable.
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader
            | AuthError::InvalidAuthHeader
            | AuthError::ProfileMissing => "Unauthorized",
            AuthError::OnboardingRequired => "ONBOARDING_REQUIRED",
            _ => "Invalid Token",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::KeyIdMissing => write!(f, "Token header is missing 'kid'"),
            AuthError::KeySetFetchFailed(msg) => write!(f, "Failed to fetch key set: {msg}"),
            AuthError::KeyNotFound => write!(f, "No matching key found in key set"),
            AuthError::TokenMalformed => write!(f, "Token is malformed"),
            AuthError::TokenInvalid => write!(f, "Token signature or claim verification failed"),
            AuthError::SubjectMissing => write!(f, "Token payload is missing a subject claim"),
            AuthError::ProfileLookupFailed(msg) => write!(f, "Profile lookup failed: {msg}"),
            AuthError::ProfileMissing => write!(f, "Authenticated subject has no profile row"),
            AuthError::OnboardingRequired => write!(f, "Onboarding has not been completed"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(AuthErrorBody {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn missing_auth_returns_401_unauthorized() {
        let response = AuthError::MissingAuthHeader.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "Unauthorized"}));
    }

    #[tokio::test]
    async fn verification_failures_collapse_to_invalid_token() {
        for err in [
            AuthError::KeyIdMissing,
            AuthError::KeySetFetchFailed("timeout".into()),
            AuthError::KeyNotFound,
            AuthError::TokenMalformed,
            AuthError::TokenInvalid,
            AuthError::SubjectMissing,
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
            assert_eq!(body, serde_json::json!({"error": "Invalid Token"}));
        }
    }

    #[tokio::test]
    async fn onboarding_gate_returns_distinguished_403() {
        let response = AuthError::OnboardingRequired.into_response();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(body, serde_json::json!({"error": "ONBOARDING_REQUIRED"}));
    }

    #[test]
    fn display_carries_internal_detail() {
        let err = AuthError::KeySetFetchFailed("connection refused".into());
        assert!(err.to_string().contains("connection refused"));
        // ...but the wire body stays generic
        assert_eq!(err.public_message(), "Invalid Token");
    }
}
