// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

use std::sync::Arc;

use crate::auth::JwksManager;
use crate::storage::CampusDatabase;

/// What the gate does with a valid token whose subject has no profile row
/// (e.g. a provisioning race with the identity system).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingProfilePolicy {
    /// Admit the request with subject id only (no tenant scoping).
    #[default]
    Admit,
    /// Reject the request with a generic 401.
    Reject,
}

impl MissingProfilePolicy {
    /// Parse from configuration (`admit` | `reject`, case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "admit" => Some(Self::Admit),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

/// Authentication configuration.
///
/// ## Authentication Modes
///
/// - **Production mode** (`jwks` set): full ES256 verification against the
///   identity provider's JWKS endpoint
/// - **Development mode** (`jwks` unset): structure validation only, no
///   signature check
#[derive(Clone, Default)]
pub struct AuthConfig {
    /// JWKS manager for key resolution (production mode).
    pub jwks: Option<JwksManager>,
    /// Expected token issuer (optional).
    pub issuer: Option<String>,
    /// Expected token audience (optional).
    pub audience: Option<String>,
    /// Behavior for authenticated subjects without a profile row.
    pub missing_profile_policy: MissingProfilePolicy,
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<CampusDatabase>,
    pub auth_config: Arc<AuthConfig>,
}

impl AppState {
    pub fn new(storage: CampusDatabase) -> Self {
        Self {
            storage: Arc::new(storage),
            auth_config: Arc::new(AuthConfig::default()),
        }
    }

    pub fn with_auth_config(mut self, auth_config: AuthConfig) -> Self {
        self.auth_config = Arc::new(auth_config);
        self
    }
}
