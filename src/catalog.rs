//! Device model and the read-only catalog provider.
//!
//! The catalog is the one injected dependency of the analytics core. It
//! hands out an owned snapshot per request so a concurrently updated
//! inventory source can never be observed mid-write by the pipeline.

use serde::{Deserialize, Serialize};

/// Device category. Recommendations associate with a category, not a
/// device instance, so a category may appear here with no live device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Cooling,
    Heating,
    Appliance,
    Lighting,
    Entertainment,
}

/// Operational status of a monitored device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Inactive,
}

/// A monitored household device.
///
/// Read-only snapshot per request; the core never mutates it. Data
/// producers keep `current_consumption` at 0 exactly when the device is
/// inactive; the core does not re-validate that at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    /// Unique device id.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Device category.
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    /// Rated power draw in watts.
    pub power_rating: u32,
    /// Instantaneous consumption in kW.
    pub current_consumption: f64,
    /// Operational status.
    pub status: DeviceStatus,
    /// Location label.
    pub room: String,
    /// Efficiency score, 0 to 100.
    pub efficiency: u8,
}

impl Device {
    /// Whether the device is currently drawing power.
    pub fn is_active(&self) -> bool {
        self.status == DeviceStatus::Active
    }

    /// Rated power in kW.
    pub fn power_rating_kw(&self) -> f64 {
        f64::from(self.power_rating) / 1000.0
    }
}

/// Read-only source of device snapshots.
///
/// Each call returns an owned, consistent copy so the pipeline works on
/// an atomic view even if the underlying inventory changes between
/// requests.
pub trait DeviceProvider: Send + Sync {
    /// Returns a consistent snapshot of the current device inventory.
    fn snapshot(&self) -> Vec<Device>;
}

/// Fixed in-memory catalog used until a real inventory source exists.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    devices: Vec<Device>,
}

impl FixtureCatalog {
    /// The reference household: five devices across four categories,
    /// four of them active.
    pub fn household() -> Self {
        Self {
            devices: vec![
                Device {
                    id: 1,
                    name: "Air Conditioner".to_string(),
                    kind: DeviceKind::Cooling,
                    power_rating: 1500,
                    current_consumption: 1.45,
                    status: DeviceStatus::Active,
                    room: "Living Room".to_string(),
                    efficiency: 78,
                },
                Device {
                    id: 2,
                    name: "Refrigerator".to_string(),
                    kind: DeviceKind::Appliance,
                    power_rating: 200,
                    current_consumption: 0.18,
                    status: DeviceStatus::Active,
                    room: "Kitchen".to_string(),
                    efficiency: 92,
                },
                Device {
                    id: 3,
                    name: "LED Lights".to_string(),
                    kind: DeviceKind::Lighting,
                    power_rating: 120,
                    current_consumption: 0.12,
                    status: DeviceStatus::Active,
                    room: "All Rooms".to_string(),
                    efficiency: 95,
                },
                Device {
                    id: 4,
                    name: "Washing Machine".to_string(),
                    kind: DeviceKind::Appliance,
                    power_rating: 800,
                    current_consumption: 0.0,
                    status: DeviceStatus::Inactive,
                    room: "Utility Room".to_string(),
                    efficiency: 88,
                },
                Device {
                    id: 5,
                    name: "Television".to_string(),
                    kind: DeviceKind::Entertainment,
                    power_rating: 150,
                    current_consumption: 0.15,
                    status: DeviceStatus::Active,
                    room: "Living Room".to_string(),
                    efficiency: 82,
                },
            ],
        }
    }

    /// An empty catalog, mainly for tests.
    pub fn empty() -> Self {
        Self {
            devices: Vec::new(),
        }
    }

    /// A catalog built from explicit devices.
    pub fn with_devices(devices: Vec<Device>) -> Self {
        Self { devices }
    }
}

impl DeviceProvider for FixtureCatalog {
    fn snapshot(&self) -> Vec<Device> {
        self.devices.clone()
    }
}
