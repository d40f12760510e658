//! Tariff model: energy quantity to monetary cost, plus the rounding
//! policy shared by every money and consumption value in the pipeline.

use crate::error::Error;

/// Default grid rate per kWh.
pub const DEFAULT_RATE_PER_KWH: f64 = 8.5;

/// Rounds to 2 decimal places, half away from zero (half-up for the
/// non-negative values this pipeline produces).
///
/// Applied once per individual sample value; totals are sums of
/// already-rounded values, never a re-rounding of an unrounded sum.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Computes the monetary cost of an energy quantity.
///
/// # Arguments
///
/// * `consumption_kwh` - Energy quantity (must be >= 0)
/// * `rate_per_kwh` - Tariff rate (must be >= 0)
///
/// # Errors
///
/// Returns `Error::InvalidInput` for a negative quantity or rate.
pub fn cost(consumption_kwh: f64, rate_per_kwh: f64) -> Result<f64, Error> {
    if consumption_kwh < 0.0 {
        return Err(Error::InvalidInput(format!(
            "consumption must be >= 0 kWh, got {consumption_kwh}"
        )));
    }
    if rate_per_kwh < 0.0 {
        return Err(Error::InvalidInput(format!(
            "tariff rate must be >= 0 per kWh, got {rate_per_kwh}"
        )));
    }
    Ok(round2(consumption_kwh * rate_per_kwh))
}
