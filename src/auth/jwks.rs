// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Unmarky

//! Key resolution: JWKS fetching and per-kid caching.
//!
//! ## Security
//!
//! - The key set is fetched from the identity provider over HTTPS
//! - Resolved keys are held in a small bounded LRU cache keyed by kid;
//!   key rotation introduces new kids and old entries age out
//! - A failed fetch is retried once with a short backoff before the
//!   request is rejected
//!
//! ## Usage
//!
//! Initialize `JwksManager` with `AUTH_JWKS_URL` in main.rs and store it
//! in `AuthConfig`. The gate middleware uses it for ES256 verification.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::jwk::{AlgorithmParameters, Jwk, JwkSet};
use jsonwebtoken::DecodingKey;
use lru::LruCache;
use tokio::sync::Mutex;

use super::error::AuthError;

/// Timeout for a single key-set fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Backoff before the single fetch retry.
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

/// Capacity of the kid → key cache. Providers rotate through a handful of
/// keys at most, so a small bound is plenty.
const KEY_CACHE_CAPACITY: usize = 8;

/// JWKS manager with a bounded per-kid key cache.
#[derive(Clone)]
pub struct JwksManager {
    /// Key-set endpoint URL
    jwks_url: String,
    /// HTTP client
    client: reqwest::Client,
    /// Resolved keys, kid → decoding key
    keys: Arc<Mutex<LruCache<String, Arc<DecodingKey>>>>,
    /// Serializes fetches so concurrent misses share one round-trip
    fetch_lock: Arc<Mutex<()>>,
}

impl JwksManager {
    /// Create a new JWKS manager.
    ///
    /// # Arguments
    /// - `jwks_url`: The JWKS endpoint URL (e.g.,
    ///   `https://<project>.supabase.co/auth/v1/.well-known/jwks.json`)
    pub fn new(jwks_url: impl Into<String>) -> Self {
        let capacity = NonZeroUsize::new(KEY_CACHE_CAPACITY).expect("cache capacity is non-zero");
        Self {
            jwks_url: jwks_url.into(),
            client: reqwest::Client::builder()
                .timeout(FETCH_TIMEOUT)
                .build()
                .expect("Failed to create HTTP client"),
            keys: Arc::new(Mutex::new(LruCache::new(capacity))),
            fetch_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Get the JWKS URL.
    pub fn jwks_url(&self) -> &str {
        &self.jwks_url
    }

    /// Resolve the decoding key for the given key id.
    ///
    /// Cache hit returns immediately. On a miss the full key set is
    /// fetched, every usable key is imported into the cache, and the
    /// matching entry is returned.
    pub async fn get_decoding_key(&self, kid: &str) -> Result<Arc<DecodingKey>, AuthError> {
        if let Some(key) = self.keys.lock().await.get(kid) {
            return Ok(key.clone());
        }

        // Single-flight: a concurrent miss waits here and finds the cache
        // populated on the re-check.
        let _fetch = self.fetch_lock.lock().await;
        if let Some(key) = self.keys.lock().await.get(kid) {
            return Ok(key.clone());
        }

        let jwks = self.fetch_key_set().await?;
        let mut keys = self.keys.lock().await;
        for jwk in &jwks.keys {
            if let (Some(id), Some(key)) = (jwk.common.key_id.clone(), import_jwk(jwk)) {
                keys.put(id, Arc::new(key));
            }
        }

        keys.get(kid).cloned().ok_or(AuthError::KeyNotFound)
    }

    /// Force a key-set fetch, repopulating the cache.
    ///
    /// Used by the readiness probe to confirm the endpoint is reachable.
    pub async fn refresh(&self) -> Result<(), AuthError> {
        let jwks = self.fetch_key_set().await?;
        let mut keys = self.keys.lock().await;
        for jwk in &jwks.keys {
            if let (Some(id), Some(key)) = (jwk.common.key_id.clone(), import_jwk(jwk)) {
                keys.put(id, Arc::new(key));
            }
        }
        Ok(())
    }

    /// Whether any key has been resolved yet.
    pub async fn has_cached_keys(&self) -> bool {
        !self.keys.lock().await.is_empty()
    }

    /// Fetch the key set, retrying once on failure.
    async fn fetch_key_set(&self) -> Result<JwkSet, AuthError> {
        match self.fetch_once().await {
            Ok(jwks) => Ok(jwks),
            Err(first) => {
                tracing::warn!(error = %first, "key set fetch failed, retrying once");
                tokio::time::sleep(RETRY_BACKOFF).await;
                self.fetch_once().await
            }
        }
    }

    /// Single fetch of the key-set document.
    async fn fetch_once(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .client
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| AuthError::KeySetFetchFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::KeySetFetchFailed(format!(
                "HTTP {} from JWKS endpoint",
                response.status()
            )));
        }

        let jwks: JwkSet = response
            .json()
            .await
            .map_err(|e| AuthError::KeySetFetchFailed(e.to_string()))?;

        Ok(jwks)
    }
}

/// Import a JWK as a decoding key.
///
/// The identity provider signs with ES256, so only elliptic-curve entries
/// are usable; anything else is skipped.
fn import_jwk(jwk: &Jwk) -> Option<DecodingKey> {
    match &jwk.algorithm {
        AlgorithmParameters::EllipticCurve(ec) => {
            match DecodingKey::from_ec_components(&ec.x, &ec.y) {
                Ok(key) => Some(key),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unusable EC key in key set");
                    None
                }
            }
        }
        _ => {
            tracing::debug!(kid = ?jwk.common.key_id, "skipping non-EC key in key set");
            None
        }
    }
}
