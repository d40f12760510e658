//! Request handlers for the API endpoints.
//!
//! Every analytics handler captures `Utc::now()` once and threads it
//! through the pipeline, so the core stays free of ambient clock reads.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};

use super::AppState;
use super::types::{
    ConsumptionQuery, ConsumptionResponse, DevicesResponse, ErrorResponse, HealthResponse,
    RecommendationsResponse, RootResponse, StatsResponse,
};
use crate::aggregate::{self, DashboardSnapshot};
use crate::error::Error;
use crate::recommend::{self, RecommendationSet};
use crate::series;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Liveness probe.
///
/// `GET /health` → 200 + `HealthResponse`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        timestamp: Utc::now(),
        version: VERSION,
    })
}

/// Service banner.
///
/// `GET /` → 200 + `RootResponse`
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to the wattwise API",
        description: "Household electricity analytics and bill optimization",
        version: VERSION,
        docs: "/docs",
    })
}

/// Dashboard aggregates for the default horizon.
///
/// `GET /api/dashboard/stats` → 200 + flattened snapshot
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let now = Utc::now();
    let (snapshot, _) = run_pipeline(&state, now, state.config.profile.horizon_hours)
        .map_err(invalid_input)?;
    Ok(Json(StatsResponse { snapshot }))
}

/// Device inventory snapshot.
///
/// `GET /api/dashboard/devices` → 200 + `DevicesResponse`
pub async fn dashboard_devices(State(state): State<Arc<AppState>>) -> Json<DevicesResponse> {
    let devices = state.catalog.snapshot();
    let active_devices = devices.iter().filter(|d| d.is_active()).count();
    Json(DevicesResponse {
        total_devices: devices.len(),
        active_devices,
        devices,
    })
}

/// Hourly consumption series ending at the request instant.
///
/// `GET /api/analytics/consumption` → 200 + `ConsumptionResponse`
/// `GET /api/analytics/consumption?hours=N` → N-hour horizon
/// `GET /api/analytics/consumption?hours=0` → 400 + `ErrorResponse`
pub async fn analytics_consumption(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConsumptionQuery>,
) -> Result<Json<ConsumptionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let now = Utc::now();
    let hours = query
        .hours
        .map_or(state.config.profile.horizon_hours, |h| h as usize);
    let samples = series::generate(
        now,
        hours,
        &state.config.profile.load_profile(),
        state.config.tariff.rate_per_kwh,
    )
    .map_err(invalid_input)?;

    let (total_consumption, total_cost) = aggregate::series_totals(&samples);
    Ok(Json(ConsumptionResponse {
        hourly_data: samples,
        period: format!("{hours}h"),
        total_consumption,
        total_cost,
    }))
}

/// Ranked cost-saving recommendations.
///
/// `GET /api/recommendations` → 200 + `RecommendationsResponse`
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<RecommendationsResponse>, (StatusCode, Json<ErrorResponse>)> {
    let now = Utc::now();
    let (_, set) = run_pipeline(&state, now, state.config.profile.horizon_hours)
        .map_err(invalid_input)?;
    Ok(Json(RecommendationsResponse {
        recommendations: set.recommendations,
        total_potential_savings: set.total_potential_savings,
        generated_at: now,
    }))
}

/// Runs the full derivation pipeline for one request instant.
fn run_pipeline(
    state: &AppState,
    now: DateTime<Utc>,
    horizon_hours: usize,
) -> Result<(DashboardSnapshot, RecommendationSet), Error> {
    let devices = state.catalog.snapshot();
    let rate = state.config.tariff.rate_per_kwh;
    let samples = series::generate(now, horizon_hours, &state.config.profile.load_profile(), rate)?;
    let base = aggregate::summarize(&samples, &devices, now);
    let set = recommend::recommend(&devices, &base, rate);
    let snapshot = base.with_savings_from(set.total_potential_savings);
    Ok((snapshot, set))
}

fn invalid_input(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::catalog::FixtureCatalog;
    use crate::config::AppConfig;

    fn make_test_state() -> Arc<AppState> {
        Arc::new(AppState {
            config: AppConfig::default(),
            catalog: Box::new(FixtureCatalog::household()),
        })
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn health_reports_status_and_version() {
        let (status, json) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["version"], VERSION);
        assert!(json.get("timestamp").is_some());
    }

    #[tokio::test]
    async fn root_returns_banner() {
        let (status, json) = get_json("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("message").is_some());
        assert_eq!(json["docs"], "/docs");
    }

    #[tokio::test]
    async fn stats_returns_flattened_snapshot() {
        let (status, json) = get_json("/api/dashboard/stats").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["devices_active"], 4);
        assert!(json["current_consumption"].as_f64().is_some());
        assert!(json["monthly_usage"].as_f64().is_some());
        assert!(json["monthly_cost"].as_f64().is_some());
        assert!(json["savings_potential"].as_f64().is_some());
        assert!(json.get("generated_at").is_some());
    }

    #[tokio::test]
    async fn devices_lists_the_catalog() {
        let (status, json) = get_json("/api/dashboard/devices").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_devices"], 5);
        assert_eq!(json["active_devices"], 4);
        assert_eq!(json["devices"][0]["type"], "cooling");
    }

    #[tokio::test]
    async fn consumption_returns_default_horizon() {
        let (status, json) = get_json("/api/analytics/consumption").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["period"], "24h");
        assert_eq!(json["hourly_data"].as_array().map(Vec::len), Some(24));
    }

    #[tokio::test]
    async fn consumption_honors_hours_query() {
        let (status, json) = get_json("/api/analytics/consumption?hours=6").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["period"], "6h");
        assert_eq!(json["hourly_data"].as_array().map(Vec::len), Some(6));
    }

    #[tokio::test]
    async fn consumption_rejects_zero_hours() {
        let (status, json) = get_json("/api/analytics/consumption?hours=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["error"]
                .as_str()
                .is_some_and(|m| m.contains("horizon_hours"))
        );
    }

    #[tokio::test]
    async fn consumption_rejects_oversized_hours() {
        let (status, json) = get_json("/api/analytics/consumption?hours=9000").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            json["error"]
                .as_str()
                .is_some_and(|m| m.contains("horizon_hours"))
        );
    }

    #[tokio::test]
    async fn recommendations_keep_the_sum_invariant() {
        let (status, json) = get_json("/api/recommendations").await;
        assert_eq!(status, StatusCode::OK);
        let recs = json["recommendations"].as_array().expect("array");
        let sum: f64 = recs
            .iter()
            .map(|r| r["potential_savings"].as_f64().unwrap())
            .sum();
        let total = json["total_potential_savings"].as_f64().expect("number");
        assert!((total - sum).abs() < 1e-6);
        assert!(json.get("generated_at").is_some());
    }
}
