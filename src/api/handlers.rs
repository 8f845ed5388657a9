//! API Handlers
//!
//! HTTP request handlers translating REST calls into cache contract calls.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, Query, Request, State},
    http::header::CONTENT_TYPE,
    response::Html,
    Form, Json,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::{Cache, Closer, ExpiringCache, UnboundedCache};
use crate::config::{CacheMode, Config};
use crate::error::{CacheError, Result};
use crate::models::{ApiResponse, HealthData, KeyQuery, SetForm, StatsData};

/// Application state shared across all handlers.
///
/// Holds the cache behind its capability contracts so either variant can
/// back the server.
#[derive(Clone)]
pub struct AppState {
    /// Cache contract used by the handlers
    pub cache: Arc<dyn Cache<Value>>,
    /// Lifetime owner hook, present for caches with background work
    pub closer: Option<Arc<dyn Closer>>,
    /// Variant reported by the stats endpoint
    pub mode: CacheMode,
}

impl AppState {
    /// Creates a state backed by an unbounded cache.
    pub fn unbounded() -> Self {
        Self {
            cache: Arc::new(UnboundedCache::<Value>::new()),
            closer: None,
            mode: CacheMode::Unbounded,
        }
    }

    /// Creates a state backed by the given expiring cache.
    pub fn expiring(cache: ExpiringCache<Value>) -> Self {
        let cache = Arc::new(cache);
        Self {
            cache: cache.clone(),
            closer: Some(cache),
            mode: CacheMode::Expiring,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Must be called from within a Tokio runtime in expiring mode.
    pub fn from_config(config: &Config) -> Result<Self> {
        match config.cache_mode {
            CacheMode::Unbounded => Ok(Self::unbounded()),
            CacheMode::Expiring => Ok(Self::expiring(ExpiringCache::with_config(
                config.expiring_config(),
            )?)),
        }
    }

    /// Closes the cache if it owns background work.
    pub async fn close(&self) -> Result<()> {
        if let Some(closer) = &self.closer {
            closer.close().await?;
        }
        Ok(())
    }
}

fn required_key(query: &KeyQuery) -> Result<&str> {
    query
        .key()
        .ok_or_else(|| CacheError::InvalidRequest("Key parameter is required".to_string()))
}

/// Reads the value to store from the request body.
///
/// JSON bodies are stored as parsed. Anything else is read as a form with a
/// `value` field, falling back to the `value` query parameter.
async fn extract_value(query: &KeyQuery, request: Request) -> Result<Value> {
    let content_type = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    if content_type.contains("application/json") {
        let Json(value) = Json::<Value>::from_request(request, &())
            .await
            .map_err(|_| CacheError::InvalidRequest("Invalid JSON body".to_string()))?;
        return Ok(value);
    }

    let form = if content_type.contains("application/x-www-form-urlencoded") {
        let Form(form) = Form::<SetForm>::from_request(request, &())
            .await
            .map_err(|_| CacheError::InvalidRequest("Invalid form data".to_string()))?;
        form
    } else {
        SetForm::default()
    };

    form.value()
        .or_else(|| query.value())
        .map(|value| Value::String(value.to_string()))
        .ok_or_else(|| CacheError::InvalidRequest("Value parameter is required".to_string()))
}

/// Handler for POST /api/cache/set?key=...
///
/// Stores the request body under `key`.
pub async fn set_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
    request: Request,
) -> Result<Json<ApiResponse>> {
    let key = required_key(&query)?.to_string();
    let value = extract_value(&query, request).await?;

    state.cache.set(&key, value.clone()).await?;
    debug!("Set key '{}'", key);

    Ok(Json(ApiResponse::success(
        format!("Successfully set key '{}'", key),
        Some(value),
    )))
}

/// Handler for GET /api/cache/get?key=...
///
/// Absent and expired keys both answer 404.
pub async fn get_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<ApiResponse>> {
    let key = required_key(&query)?;

    match state.cache.get(key).await? {
        Some(value) => Ok(Json(ApiResponse::success(
            format!("Found key '{}'", key),
            Some(value),
        ))),
        None => Err(CacheError::KeyNotFound(key.to_string())),
    }
}

/// Handler for DELETE /api/cache/delete?key=...
pub async fn delete_handler(
    State(state): State<AppState>,
    Query(query): Query<KeyQuery>,
) -> Result<Json<ApiResponse>> {
    let key = required_key(&query)?;

    state.cache.delete(key).await?;
    info!("Deleted key '{}'", key);

    Ok(Json(ApiResponse::success(
        format!("Successfully deleted key '{}'", key),
        None,
    )))
}

/// Handler for GET /api/cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<ApiResponse> {
    let stats = StatsData::new(state.mode.as_str());
    Json(ApiResponse::success("Cache stats", serde_json::to_value(stats).ok()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<ApiResponse> {
    Json(ApiResponse::success(
        "OK",
        serde_json::to_value(HealthData::healthy()).ok(),
    ))
}

/// Handler for GET /
///
/// Serves a usage page listing the endpoints with curl examples.
pub async fn root_handler(State(state): State<AppState>) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Cache API Server</title></head>
<body>
    <h1>Cache API Server</h1>
    <h2>Available Endpoints</h2>
    <ul>
        <li><b>POST</b> <code>/api/cache/set?key={{key}}</code>: store the request body (JSON, or form field <code>value</code>)</li>
        <li><b>GET</b> <code>/api/cache/get?key={{key}}</code>: read a value</li>
        <li><b>DELETE</b> <code>/api/cache/delete?key={{key}}</code>: remove a key</li>
        <li><b>GET</b> <code>/api/cache/stats</code>: server and cache information</li>
        <li><b>GET</b> <code>/health</code>: health check</li>
    </ul>
    <h2>Quick Test Commands</h2>
    <pre>
curl -X POST "http://localhost:8080/api/cache/set?key=user" -H "Content-Type: application/json" -d '"Alice"'
curl -X POST "http://localhost:8080/api/cache/set?key=age" -d "value=30"
curl "http://localhost:8080/api/cache/get?key=user"
curl -X DELETE "http://localhost:8080/api/cache/delete?key=age"
    </pre>
    <p><strong>Cache type:</strong> {mode}</p>
</body>
</html>
"#,
        mode = state.mode
    ))
}
