//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    services::Badge,
    state::TimerSnapshot,
    timer::Outcome,
};

/// API response structure for state-changing commands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: Outcome,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub state: TimerSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: Outcome, message: String, state: TimerSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            state,
        }
    }
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Body of `POST /alarm`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmSettingRequest {
    pub enabled: bool,
}

/// Status response with timer, badge and server information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub state: TimerSnapshot,
    pub badge: Badge,
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
