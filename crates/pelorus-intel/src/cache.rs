//! # Request-Coalescing Session Cache
//!
//! In-process cache scoped to one screening session. Within a session the
//! same upstream request may be wanted by several checks at once; the
//! cache guarantees each distinct request goes out exactly once.
//!
//! ## Keys
//!
//! A [`CacheKey`] is the canonical form of `(method, url, params, body)`:
//! query parameters are sorted, and JSON bodies are rendered through a
//! deterministic canonicalizer that orders object keys and list values.
//! Two semantically identical requests — same parameters in a different
//! order, the same IMO list shuffled — therefore collide on the same key.
//!
//! ## Single-flight
//!
//! Each key owns a [`tokio::sync::OnceCell`]. The first caller runs the
//! fetch; concurrent callers for the same key await that fetch instead of
//! issuing a duplicate. Failed fetches are not cached, so a later check
//! may retry the call.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{Mutex, OnceCell};

use crate::error::IntelError;

/// Canonical identity of an upstream request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    method: String,
    url: String,
    params: Vec<(String, String)>,
    body: Option<String>,
}

impl CacheKey {
    /// Build a key from request parts.
    ///
    /// `params` are sorted by key then value; `body` is rendered through
    /// [`canonical_json`].
    pub fn new(method: &str, url: &str, params: &[(&str, &str)], body: Option<&Value>) -> Self {
        let mut params: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        params.sort();
        Self {
            method: method.to_uppercase(),
            url: url.to_string(),
            params,
            body: body.map(canonical_json),
        }
    }
}

/// Render a JSON value deterministically: object keys sorted, list values
/// sorted by their own canonical rendering.
///
/// This is the frozen representation used for cache-key equality. It does
/// not depend on `serde_json` map ordering, so feature unification
/// elsewhere in the build cannot change key identity.
pub fn canonical_json(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let fields: Vec<String> = keys
                .into_iter()
                .map(|k| format!("{}:{}", serde_json::to_string(k).unwrap_or_default(), canonical_json(&map[k])))
                .collect();
            format!("{{{}}}", fields.join(","))
        }
        Value::Array(items) => {
            let mut rendered: Vec<String> = items.iter().map(canonical_json).collect();
            rendered.sort();
            format!("[{}]", rendered.join(","))
        }
        other => other.to_string(),
    }
}

/// Per-session single-flight cache of decoded upstream responses.
#[derive(Default)]
pub struct SessionCache {
    slots: Mutex<HashMap<CacheKey, Arc<OnceCell<Value>>>>,
}

impl SessionCache {
    /// Create an empty cache for a fresh screening session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, fetching it with `fetch` if
    /// absent. Concurrent callers for the same key coalesce onto one
    /// in-flight fetch. Errors are returned to the caller and leave the
    /// slot empty.
    pub async fn get_or_fetch<F, Fut>(&self, key: CacheKey, fetch: F) -> Result<Value, IntelError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<Value, IntelError>>,
    {
        let cell = {
            let mut slots = self.slots.lock().await;
            slots.entry(key).or_default().clone()
        };
        let value = cell.get_or_try_init(fetch).await?;
        Ok(value.clone())
    }

    /// Number of keys with a resolved value (for diagnostics and tests).
    pub async fn resolved_len(&self) -> usize {
        let slots = self.slots.lock().await;
        slots.values().filter(|cell| cell.get().is_some()).count()
    }
}
