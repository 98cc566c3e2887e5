// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! JWT claims read from Supabase-issued access tokens.

use serde::Deserialize;

/// Claims extracted from a verified access token.
///
/// Supabase access tokens carry standard OIDC claims; only `sub` feeds the
/// request context. The time-based claims are enforced by the decoder;
/// `exp` is also checked manually in development mode.
#[derive(Debug, Deserialize)]
pub struct AccessClaims {
    /// Subject (user ID). Deserialized leniently so a missing subject is
    /// reported as its own failure rather than a decode error.
    #[serde(default)]
    pub sub: Option<String>,

    /// Expiration timestamp
    #[serde(default)]
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default)]
    #[allow(dead_code)]
    pub iat: i64,

    /// Issuer (validated by the decoder when configured)
    #[serde(default)]
    #[allow(dead_code)]
    pub iss: String,

    /// Audience (validated by the decoder when configured)
    #[serde(default)]
    #[allow(dead_code)]
    pub aud: Option<serde_json::Value>,
}
