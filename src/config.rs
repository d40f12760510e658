//! TOML-based service configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::series::{LoadProfile, MAX_HORIZON_HOURS};
use crate::tariff::DEFAULT_RATE_PER_KWH;

/// Top-level configuration parsed from TOML.
///
/// All sections have defaults matching the documented constants. Load
/// from TOML with [`AppConfig::from_toml_file`] or use
/// `AppConfig::default()` for the built-in baseline.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// HTTP listener parameters.
    pub server: ServerConfig,
    /// Tariff rate parameters.
    pub tariff: TariffConfig,
    /// Day-part consumption profile.
    pub profile: ProfileConfig,
}

/// HTTP listener parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port (must be > 0).
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

/// Tariff rate parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Monetary cost per kWh (must be > 0).
    pub rate_per_kwh: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            rate_per_kwh: DEFAULT_RATE_PER_KWH,
        }
    }
}

/// Day-part consumption profile and horizon.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Baseline hourly consumption (kW-equivalent).
    pub base_load_kw: f64,
    /// Morning-peak addition.
    pub morning_delta_kw: f64,
    /// Evening-peak addition.
    pub evening_delta_kw: f64,
    /// Night-trough subtraction (must not exceed the baseline).
    pub night_delta_kw: f64,
    /// Default series horizon in hours (1 to 8760).
    pub horizon_hours: usize,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        let p = LoadProfile::default();
        Self {
            base_load_kw: p.base_load_kw,
            morning_delta_kw: p.morning_delta_kw,
            evening_delta_kw: p.evening_delta_kw,
            night_delta_kw: p.night_delta_kw,
            horizon_hours: 24,
        }
    }
}

impl ProfileConfig {
    /// The day-part rule set this configuration describes.
    pub fn load_profile(&self) -> LoadProfile {
        LoadProfile {
            base_load_kw: self.base_load_kw,
            morning_delta_kw: self.morning_delta_kw,
            evening_delta_kw: self.evening_delta_kw,
            night_delta_kw: self.night_delta_kw,
        }
    }
}

impl AppConfig {
    /// Parses configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML
    /// is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains
    /// unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns every violated constraint.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.server.port == 0 {
            errors.push(ConfigError::new("server.port", "must be > 0"));
        }
        if self.tariff.rate_per_kwh <= 0.0 {
            errors.push(ConfigError::new("tariff.rate_per_kwh", "must be > 0"));
        }

        let p = &self.profile;
        if p.base_load_kw < 0.0 {
            errors.push(ConfigError::new("profile.base_load_kw", "must be >= 0"));
        }
        if p.morning_delta_kw < 0.0 {
            errors.push(ConfigError::new("profile.morning_delta_kw", "must be >= 0"));
        }
        if p.evening_delta_kw < 0.0 {
            errors.push(ConfigError::new("profile.evening_delta_kw", "must be >= 0"));
        }
        if p.night_delta_kw < 0.0 {
            errors.push(ConfigError::new("profile.night_delta_kw", "must be >= 0"));
        } else if p.night_delta_kw > p.base_load_kw {
            errors.push(ConfigError::new(
                "profile.night_delta_kw",
                "must not exceed profile.base_load_kw",
            ));
        }
        if p.horizon_hours < 1 {
            errors.push(ConfigError::new("profile.horizon_hours", "must be >= 1"));
        } else if p.horizon_hours > MAX_HORIZON_HOURS {
            errors.push(ConfigError::new(
                "profile.horizon_hours",
                format!("must be <= {MAX_HORIZON_HOURS}"),
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_constants() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.tariff.rate_per_kwh, 8.5);
        assert_eq!(cfg.profile.base_load_kw, 1.5);
        assert_eq!(cfg.profile.morning_delta_kw, 0.8);
        assert_eq!(cfg.profile.evening_delta_kw, 1.2);
        assert_eq!(cfg.profile.night_delta_kw, 0.5);
        assert_eq!(cfg.profile.horizon_hours, 24);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [tariff]
            rate_per_kwh = 6.0
            "#,
        )
        .expect("valid toml");
        assert_eq!(cfg.tariff.rate_per_kwh, 6.0);
        assert_eq!(cfg.profile.base_load_kw, 1.5);
        assert_eq!(cfg.server.port, 8000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str(
            r#"
            [tariff]
            rate_per_kw = 6.0
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("rate_per_kw"));
    }

    #[test]
    fn validate_flags_every_violation() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [tariff]
            rate_per_kwh = 0.0

            [profile]
            base_load_kw = 1.0
            night_delta_kw = 1.5
            horizon_hours = 0
            "#,
        )
        .expect("parseable toml");
        let errors = cfg.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"tariff.rate_per_kwh"));
        assert!(fields.contains(&"profile.night_delta_kw"));
        assert!(fields.contains(&"profile.horizon_hours"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn validate_rejects_an_oversized_horizon() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [profile]
            horizon_hours = 9000
            "#,
        )
        .expect("parseable toml");
        let errors = cfg.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "profile.horizon_hours");
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = AppConfig::from_toml_file(Path::new("/nonexistent/wattwise.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/wattwise.toml"));
    }
}
