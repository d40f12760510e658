//! Hourly consumption time-series generator with the day-part model.
//!
//! The series is synthetic: each hourly slot is classified into a
//! day-part and assigned the profile's consumption for that part, then
//! costed through the tariff model. Fully deterministic for a given
//! reference instant, so repeated requests within the same hour window
//! reproduce the same series.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::Serialize;

use crate::error::Error;
use crate::tariff;

/// Longest supported series horizon: one year of hourly slots. Keeps a
/// caller-supplied horizon from driving unbounded allocation.
pub const MAX_HORIZON_HOURS: usize = 8760;

/// Named segment of the 24-hour cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    MorningPeak,
    EveningPeak,
    NightTrough,
    DayBaseline,
}

impl DayPart {
    /// Classifies an hour-of-day (0 to 23) into its day-part.
    ///
    /// Ranges are inclusive on both ends: morning peak 6..=9, evening
    /// peak 18..=22, night trough 23 and 0..=5, baseline otherwise.
    /// Every hour maps to exactly one part.
    pub fn classify(hour: u32) -> Self {
        match hour {
            6..=9 => Self::MorningPeak,
            18..=22 => Self::EveningPeak,
            23 | 0..=5 => Self::NightTrough,
            _ => Self::DayBaseline,
        }
    }
}

/// Day-part consumption rule set, in kW-equivalent per hour.
///
/// Defaults match the documented profile: base 1.5, morning +0.8,
/// evening +1.2, night -0.5.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadProfile {
    /// Baseline hourly consumption.
    pub base_load_kw: f64,
    /// Added on top of the baseline during the morning peak.
    pub morning_delta_kw: f64,
    /// Added on top of the baseline during the evening peak.
    pub evening_delta_kw: f64,
    /// Subtracted from the baseline during the night trough.
    pub night_delta_kw: f64,
}

impl Default for LoadProfile {
    fn default() -> Self {
        Self {
            base_load_kw: 1.5,
            morning_delta_kw: 0.8,
            evening_delta_kw: 1.2,
            night_delta_kw: 0.5,
        }
    }
}

impl LoadProfile {
    /// Hourly consumption for a day-part, before rounding.
    pub fn demand_kw(&self, part: DayPart) -> f64 {
        match part {
            DayPart::MorningPeak => self.base_load_kw + self.morning_delta_kw,
            DayPart::EveningPeak => self.base_load_kw + self.evening_delta_kw,
            DayPart::NightTrough => self.base_load_kw - self.night_delta_kw,
            DayPart::DayBaseline => self.base_load_kw,
        }
    }
}

/// One point of the hourly time-series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsumptionSample {
    /// Slot timestamp, hour granularity, RFC 3339 on the wire.
    pub timestamp: DateTime<Utc>,
    /// Consumption for the slot (kWh, 2-decimal).
    pub consumption: f64,
    /// Cost for the slot (2-decimal, consumption times tariff rate).
    pub cost: f64,
}

/// Generates the hourly series ending at `reference`, oldest first.
///
/// One sample per hour over `horizon_hours` slots; the slot's UTC
/// hour-of-day selects the day-part. Consumption is rounded to 2
/// decimals before cost derivation, per the tariff rounding policy.
///
/// # Errors
///
/// Returns `Error::InvalidInput` when `horizon_hours` is 0 or exceeds
/// [`MAX_HORIZON_HOURS`], or when the profile/rate produce a negative
/// consumption value.
pub fn generate(
    reference: DateTime<Utc>,
    horizon_hours: usize,
    profile: &LoadProfile,
    rate_per_kwh: f64,
) -> Result<Vec<ConsumptionSample>, Error> {
    if horizon_hours < 1 {
        return Err(Error::InvalidInput(
            "horizon_hours must be >= 1".to_string(),
        ));
    }
    if horizon_hours > MAX_HORIZON_HOURS {
        return Err(Error::InvalidInput(format!(
            "horizon_hours must be <= {MAX_HORIZON_HOURS}, got {horizon_hours}"
        )));
    }

    let mut samples = Vec::with_capacity(horizon_hours);
    for slot in 0..horizon_hours {
        let hours_back = (horizon_hours - 1 - slot) as i64;
        let timestamp = reference - Duration::hours(hours_back);
        let part = DayPart::classify(timestamp.hour());
        let consumption = tariff::round2(profile.demand_kw(part));
        let cost = tariff::cost(consumption, rate_per_kwh)?;
        samples.push(ConsumptionSample {
            timestamp,
            consumption,
            cost,
        });
    }
    Ok(samples)
}
