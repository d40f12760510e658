//! API response and query types.
//!
//! Field names follow the public dashboard contract, so several enums
//! serialize under renamed keys (`type` for device and recommendation
//! kinds).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::DashboardSnapshot;
use crate::catalog::Device;
use crate::recommend::Recommendation;
use crate::series::ConsumptionSample;

/// `GET /health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"healthy"` while the process serves requests.
    pub status: &'static str,
    /// Instant the check ran.
    pub timestamp: DateTime<Utc>,
    /// Crate version.
    pub version: &'static str,
}

/// `GET /` body.
#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub description: &'static str,
    pub version: &'static str,
    pub docs: &'static str,
}

/// `GET /api/dashboard/devices` body.
#[derive(Debug, Serialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
    pub total_devices: usize,
    pub active_devices: usize,
}

/// `GET /api/analytics/consumption` body.
#[derive(Debug, Serialize)]
pub struct ConsumptionResponse {
    /// Hourly samples, oldest first, ending at the request instant.
    pub hourly_data: Vec<ConsumptionSample>,
    /// Period label, `"<hours>h"`.
    pub period: String,
    /// Sum of the rounded per-sample consumption values.
    pub total_consumption: f64,
    /// Sum of the rounded per-sample costs.
    pub total_cost: f64,
}

/// `GET /api/recommendations` body.
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    /// Ranked suggestions, non-increasing priority.
    pub recommendations: Vec<Recommendation>,
    /// Exact sum of the included `potential_savings` values.
    pub total_potential_savings: f64,
    pub generated_at: DateTime<Utc>,
}

/// `GET /api/dashboard/stats` body: the snapshot fields, flattened.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
}

/// Optional query parameters for the consumption endpoint.
#[derive(Debug, Deserialize)]
pub struct ConsumptionQuery {
    /// Series horizon in hours; defaults to the configured horizon.
    pub hours: Option<u32>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
