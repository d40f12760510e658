//! Shared test fixtures for integration tests.

// not every test binary uses every fixture
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use wattwise::catalog::{Device, DeviceKind, DeviceStatus, FixtureCatalog};
use wattwise::config::AppConfig;
use wattwise::series::LoadProfile;

/// Fixed reference instant at the given UTC hour (2026-08-26).
pub fn reference_at_hour(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 26, hour, 0, 0).unwrap()
}

/// Default configuration (rate 8.5, documented day-part profile).
pub fn default_config() -> AppConfig {
    AppConfig::default()
}

/// The documented day-part profile (base 1.5, +0.8, +1.2, -0.5).
pub fn default_profile() -> LoadProfile {
    LoadProfile::default()
}

/// The reference household catalog (5 devices, 4 active).
pub fn household_catalog() -> FixtureCatalog {
    FixtureCatalog::household()
}

/// A single active device with the given category and draw.
pub fn active_device(id: u32, kind: DeviceKind, kw: f64, efficiency: u8) -> Device {
    Device {
        id,
        name: format!("Device {id}"),
        kind,
        power_rating: (kw * 1000.0) as u32,
        current_consumption: kw,
        status: DeviceStatus::Active,
        room: "Test Room".to_string(),
        efficiency,
    }
}
