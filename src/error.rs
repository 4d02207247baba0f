//! Unified error types for the room controller.
//!
//! A single [`Error`] enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  Per-cycle errors (sensor and
//! actuator) are non-fatal and never escape [`AutomationEngine::run_cycle`];
//! configuration errors are only raised at startup or on a config update.
//!
//! [`AutomationEngine::run_cycle`]: crate::app::engine::AutomationEngine::run_cycle

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor could not be read or returned an unusable value.
    Sensor(SensorError),
    /// An actuator output could not be driven.
    Actuator(ActuatorWriteError),
    /// Configuration is invalid or could not be parsed.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

/// A single sensor read failed.  Downgrades that snapshot field to absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// I2C / ADC transaction failed.
    Bus,
    /// The device did not answer in time.
    Timeout,
    /// The device answered with an implausible or non-numeric value.
    Malformed,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus => write!(f, "bus error"),
            Self::Timeout => write!(f, "timeout"),
            Self::Malformed => write!(f, "malformed value"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

/// An actuator write failed.  The actuator is assumed to keep its previous
/// output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorWriteError {
    /// GPIO set failed.
    Gpio,
    /// The output driver is not available (not wired, not initialised).
    Unavailable,
}

impl fmt::Display for ActuatorWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpio => write!(f, "GPIO write failed"),
            Self::Unavailable => write!(f, "output unavailable"),
        }
    }
}

impl From<ActuatorWriteError> for Error {
    fn from(e: ActuatorWriteError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Configuration rejected at load or update time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration document could not be deserialised.
    Parse,
    /// A field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => write!(f, "could not parse configuration"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl core::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
