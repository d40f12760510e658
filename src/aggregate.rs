//! Reduction of the hourly series and device snapshot into the
//! dashboard view.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::Device;
use crate::series::ConsumptionSample;
use crate::tariff::round2;

/// Derived, point-in-time aggregate view. Computed fresh per request,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Sum of instantaneous consumption across active devices (kW).
    /// Independently sourced from the time-series; not the last sample.
    pub current_consumption: f64,
    /// Total series consumption (kWh), the monthly usage proxy.
    pub monthly_usage: f64,
    /// Total series cost, summed over individually rounded sample costs.
    pub monthly_cost: f64,
    /// Count of devices with active status.
    pub devices_active: usize,
    /// Rounded mean efficiency of active devices; 0 when none are active.
    pub efficiency_score: u32,
    /// Percentage of the cost total recoverable via recommendations,
    /// capped at 100.
    pub savings_potential: f64,
    /// Instant this view was derived at.
    pub generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Fills in `savings_potential` from the recommendation engine's
    /// total, as a percentage of the cost total capped at 100.
    pub fn with_savings_from(mut self, total_potential_savings: f64) -> Self {
        self.savings_potential = if self.monthly_cost > 0.0 {
            round2(100.0 * total_potential_savings / self.monthly_cost).min(100.0)
        } else {
            0.0
        };
        self
    }
}

/// Series totals as `(consumption, cost)`, each the sum of the
/// per-sample rounded values passed through `round2` once.
pub fn series_totals(samples: &[ConsumptionSample]) -> (f64, f64) {
    let usage = round2(samples.iter().map(|s| s.consumption).sum());
    let cost = round2(samples.iter().map(|s| s.cost).sum());
    (usage, cost)
}

/// Reduces the series and device snapshot into a `DashboardSnapshot`.
///
/// Totals are sums of the per-sample rounded values, passed through
/// `round2` once to strip accumulated binary noise. `savings_potential`
/// starts at 0; the caller fills it in via
/// [`DashboardSnapshot::with_savings_from`] once recommendations are
/// known. An empty device set or series aggregates to zeros, not an
/// error.
pub fn summarize(
    samples: &[ConsumptionSample],
    devices: &[Device],
    generated_at: DateTime<Utc>,
) -> DashboardSnapshot {
    let (monthly_usage, monthly_cost) = series_totals(samples);

    let active: Vec<&Device> = devices.iter().filter(|d| d.is_active()).collect();
    let current_consumption = round2(active.iter().map(|d| d.current_consumption).sum());

    let efficiency_score = if active.is_empty() {
        0
    } else {
        let mean = active.iter().map(|d| f64::from(d.efficiency)).sum::<f64>() / active.len() as f64;
        // half-up; scores are non-negative so away-from-zero is half-up
        mean.round() as u32
    };

    DashboardSnapshot {
        current_consumption,
        monthly_usage,
        monthly_cost,
        devices_active: active.len(),
        efficiency_score,
        savings_potential: 0.0,
        generated_at,
    }
}
