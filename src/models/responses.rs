//! Response DTOs for the cache REST API
//!
//! Every endpoint answers with the same envelope.

use serde::Serialize;
use serde_json::Value;

/// Uniform response envelope: `{success, message|error, data}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    /// Whether the request succeeded
    pub success: bool,
    /// Human readable outcome, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Payload, on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure description, on error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    /// Creates a success envelope
    pub fn success(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data,
            error: None,
        }
    }

    /// Creates an error envelope
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Payload of the stats endpoint (GET /api/cache/stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsData {
    /// Status line
    pub message: String,
    /// Current timestamp in RFC 3339 format
    pub time: String,
    /// Which cache variant backs the server
    #[serde(rename = "type")]
    pub kind: String,
}

impl StatsData {
    /// Creates stats for the given cache kind, stamped with the current time
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            message: "Cache server is running".to_string(),
            time: chrono::Utc::now().to_rfc3339(),
            kind: kind.into(),
        }
    }
}

/// Payload of the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthData {
    /// Health status (e.g., "healthy")
    pub status: String,
}

impl HealthData {
    /// Creates a healthy status
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}
