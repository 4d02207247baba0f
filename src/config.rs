//! System configuration parameters
//!
//! All tunable thresholds for presence detection and actuator automation.
//! Two presets reproduce the two deployed board variants: the standalone
//! polling loop and the web-served variant.  Values can be overridden by a
//! JSON document; every field is optional and falls back to the preset.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which motion signals count towards presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionSource {
    /// Only the accelerometer check runs.
    Accel,
    /// Only the gyroscope check runs.
    Gyro,
    /// Both checks run independently.
    #[default]
    Both,
}

impl MotionSource {
    pub fn uses_accel(self) -> bool {
        matches!(self, Self::Accel | Self::Both)
    }

    pub fn uses_gyro(self) -> bool {
        matches!(self, Self::Gyro | Self::Both)
    }
}

/// Limits used by the presence detector.  A reading strictly above its
/// limit counts as a sign of presence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceThresholds {
    /// Largest absolute acceleration component (g).
    pub accel_limit: f32,
    /// Largest absolute angular rate component (deg/s).
    pub gyro_limit: f32,
    /// Raw 16-bit microphone ADC level.
    pub mic_limit: u16,
    /// Raw proximity level from the gesture sensor.
    pub proximity_limit: u16,
    /// Which motion checks are enabled.
    pub motion: MotionSource,
}

impl Default for PresenceThresholds {
    fn default() -> Self {
        ControllerConfig::standalone().presence
    }
}

/// Limits used to justify the light and fan once presence is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomationThresholds {
    /// Fan runs above this temperature (Celsius).
    pub temp_limit: f32,
    /// Fan runs above this relative humidity (%).
    pub humidity_limit: f32,
    /// Light runs below this illuminance (lux).
    pub lux_limit: f32,
    /// How long an actuator stays latched on after its last justification.
    pub hold_off_seconds: f32,
}

impl Default for AutomationThresholds {
    fn default() -> Self {
        ControllerConfig::standalone().automation
    }
}

impl AutomationThresholds {
    pub fn hold_off(&self) -> Duration {
        Duration::try_from_secs_f32(self.hold_off_seconds.max(0.0)).unwrap_or(Duration::MAX)
    }
}

/// Complete controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub presence: PresenceThresholds,
    pub automation: AutomationThresholds,
    /// Control loop period (seconds).
    pub cycle_period_seconds: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::standalone()
    }
}

impl ControllerConfig {
    /// Thresholds of the standalone polling board.
    pub fn standalone() -> Self {
        Self {
            presence: PresenceThresholds {
                accel_limit: 1.5,
                gyro_limit: 20.0,
                mic_limit: 3000,
                proximity_limit: 1,
                motion: MotionSource::Both,
            },
            automation: AutomationThresholds {
                temp_limit: 25.0,
                humidity_limit: 80.0,
                lux_limit: 300.0,
                hold_off_seconds: 5.0,
            },
            cycle_period_seconds: 2.0,
        }
    }

    /// Thresholds of the web-served board.  Motion comes from the gyro only.
    pub fn web() -> Self {
        Self {
            presence: PresenceThresholds {
                accel_limit: 1.5,
                gyro_limit: 20.0,
                mic_limit: 15_000,
                proximity_limit: 10,
                motion: MotionSource::Gyro,
            },
            automation: AutomationThresholds {
                temp_limit: 30.0,
                humidity_limit: 70.0,
                lux_limit: 200.0,
                hold_off_seconds: 3.0,
            },
            cycle_period_seconds: 2.0,
        }
    }

    /// Look up a preset by name (`"standalone"` or `"web"`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "standalone" => Some(Self::standalone()),
            "web" => Some(Self::web()),
            _ => None,
        }
    }

    /// Parse a JSON document and validate the result.  Missing fields keep
    /// the standalone preset values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn cycle_period(&self) -> Duration {
        Duration::try_from_secs_f32(self.cycle_period_seconds).unwrap_or(Duration::from_secs(2))
    }

    /// Range-check every field.  Rejects rather than clamps.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.presence;
        let a = &self.automation;

        if !positive(p.accel_limit) {
            return Err(ConfigError::ValidationFailed("accel_limit must be a positive number"));
        }
        if !positive(p.gyro_limit) {
            return Err(ConfigError::ValidationFailed("gyro_limit must be a positive number"));
        }
        if p.mic_limit == 0 {
            return Err(ConfigError::ValidationFailed("mic_limit must be > 0"));
        }
        if p.proximity_limit == 0 {
            return Err(ConfigError::ValidationFailed("proximity_limit must be > 0"));
        }
        if !non_negative(a.temp_limit) {
            return Err(ConfigError::ValidationFailed("temp_limit must be >= 0"));
        }
        if !(0.0..=100.0).contains(&a.humidity_limit) {
            return Err(ConfigError::ValidationFailed("humidity_limit must be 0-100"));
        }
        if !non_negative(a.lux_limit) {
            return Err(ConfigError::ValidationFailed("lux_limit must be >= 0"));
        }
        if !(non_negative(a.hold_off_seconds) && representable(a.hold_off_seconds)) {
            return Err(ConfigError::ValidationFailed("hold_off_seconds must be >= 0"));
        }
        if !(positive(self.cycle_period_seconds) && representable(self.cycle_period_seconds)) {
            return Err(ConfigError::ValidationFailed("cycle_period_seconds must be > 0"));
        }
        Ok(())
    }
}

fn positive(v: f32) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f32) -> bool {
    v.is_finite() && v >= 0.0
}

/// Fits in a [`Duration`].
fn representable(secs: f32) -> bool {
    Duration::try_from_secs_f32(secs).is_ok()
}
