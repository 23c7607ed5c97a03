//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controller::{Effect, Snapshot};

/// API response structure for command endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub effects: Vec<Effect>,
    pub walkthrough: Snapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(message: String, effects: Vec<Effect>, walkthrough: Snapshot) -> Self {
        let status = if walkthrough.cursor < 0 {
            "idle"
        } else if walkthrough.cursor as usize >= walkthrough.total_steps {
            "complete"
        } else {
            "cooking"
        };
        Self {
            status: status.to_string(),
            message,
            timestamp: Utc::now(),
            effects,
            walkthrough,
        }
    }
}

/// Status response with server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub walkthrough: Snapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
