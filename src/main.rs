// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

use std::{env, net::SocketAddr, path::PathBuf};

use tracing_subscriber::EnvFilter;

use unmarky_api::api::router;
use unmarky_api::auth::JwksManager;
use unmarky_api::config::{
    AUDIENCE_ENV, DATA_DIR_ENV, ISSUER_ENV, JWKS_URL_ENV, MISSING_PROFILE_POLICY_ENV,
};
use unmarky_api::state::{AppState, AuthConfig, MissingProfilePolicy};
use unmarky_api::storage::CampusDatabase;

#[tokio::main]
async fn main() {
    init_tracing();

    // Open the embedded database
    let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| "./data".to_string());
    let db_path = PathBuf::from(&data_dir).join("unmarky.redb");
    let storage = CampusDatabase::open(&db_path).expect("Failed to open campus database");

    let state = AppState::new(storage).with_auth_config(auth_config_from_env());
    let app = router(state);

    // Parse bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .unwrap_or(3000);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    tracing::info!("Unmarky API listening on http://{addr} (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server failed");
}

/// Initialize tracing from `RUST_LOG` and `LOG_FORMAT`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    let json = env::var("LOG_FORMAT").map(|v| v == "json").unwrap_or(false);
    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Build the auth configuration from the environment.
///
/// Without `AUTH_JWKS_URL` the server accepts unsigned tokens; that mode
/// exists for local development only.
fn auth_config_from_env() -> AuthConfig {
    let jwks = match env::var(JWKS_URL_ENV) {
        Ok(jwks_url) => {
            url::Url::parse(&jwks_url).expect("AUTH_JWKS_URL is not a valid URL");
            tracing::info!(%jwks_url, "JWT signature verification enabled");
            Some(JwksManager::new(jwks_url))
        }
        Err(_) => {
            tracing::warn!(
                "AUTH_JWKS_URL not set; running in development mode WITHOUT signature verification"
            );
            None
        }
    };

    let missing_profile_policy = env::var(MISSING_PROFILE_POLICY_ENV)
        .ok()
        .map(|value| {
            MissingProfilePolicy::parse(&value)
                .expect("MISSING_PROFILE_POLICY must be 'admit' or 'reject'")
        })
        .unwrap_or_default();

    AuthConfig {
        jwks,
        issuer: env::var(ISSUER_ENV).ok(),
        audience: env::var(AUDIENCE_ENV).ok(),
        missing_profile_policy,
    }
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
