// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Test fixtures shared across the auth module.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Kid published by the fixture key-set endpoint.
pub(crate) const TEST_KID: &str = "xyz789";

/// Valid P-256 coordinates (RFC 7515 appendix A.3 example key).
pub(crate) const TEST_EC_X: &str = "f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU";
pub(crate) const TEST_EC_Y: &str = "x_FEzRu9m36HLN_tue659LNpXW6pCyStikYjKIWI5a0";

pub(crate) fn key_set_document() -> serde_json::Value {
    serde_json::json!({
        "keys": [{
            "kid": TEST_KID,
            "kty": "EC",
            "crv": "P-256",
            "x": TEST_EC_X,
            "y": TEST_EC_Y,
            "alg": "ES256",
            "use": "sig"
        }]
    })
}

async fn serve_key_set(State(hits): State<Arc<AtomicUsize>>) -> Json<serde_json::Value> {
    hits.fetch_add(1, Ordering::SeqCst);
    Json(key_set_document())
}

async fn serve_error(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Spin up a local key-set endpoint; returns its URL and a hit counter.
pub(crate) async fn spawn_key_set_endpoint(failing: bool) -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = if failing {
        Router::new().route("/jwks.json", get(serve_error))
    } else {
        Router::new().route("/jwks.json", get(serve_key_set))
    }
    .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/jwks.json"), hits)
}

/// Build a structurally valid JWT with an unverifiable signature.
pub(crate) fn unsigned_token(claims_json: &str, kid: Option<&str>) -> String {
    let header = match kid {
        Some(kid) => format!(r#"{{"alg":"ES256","typ":"JWT","kid":"{kid}"}}"#),
        None => r#"{"alg":"ES256","typ":"JWT"}"#.to_string(),
    };
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(header.as_bytes()),
        URL_SAFE_NO_PAD.encode(claims_json.as_bytes()),
        URL_SAFE_NO_PAD.encode(b"fake_signature")
    )
}

/// Unexpired token for a subject, carrying the fixture kid.
pub(crate) fn token_for(sub: &str) -> String {
    unsigned_token(
        &format!(r#"{{"sub":"{sub}","iat":1609459200,"exp":9999999999,"iss":"test"}}"#),
        Some(TEST_KID),
    )
}
