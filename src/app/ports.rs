//! Port traits — the hexagonal boundary between decision logic and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AutomationEngine
//! ```
//!
//! Driven adapters (sensor bus, output pins, log/telemetry sinks) implement
//! these traits.  The [`AutomationEngine`](super::engine::AutomationEngine)
//! consumes them via generics, so the core never touches hardware directly.

use crate::control::hold_off::Actuator;
use crate::error::{ActuatorWriteError, SensorError};
use crate::sensors::Vector3;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one method per sensor, each independently failable.
///
/// Implementations return typed values; any unit parsing belongs in the
/// driver.  A read may block briefly on the bus but must not hang.
pub trait SensorPort {
    /// Air temperature in Celsius.
    fn read_temperature(&mut self) -> Result<f32, SensorError>;

    /// Relative humidity in percent.
    fn read_humidity(&mut self) -> Result<f32, SensorError>;

    /// Illuminance in lux.
    fn read_lux(&mut self) -> Result<f32, SensorError>;

    /// Raw proximity level.
    fn read_proximity(&mut self) -> Result<u16, SensorError>;

    /// Acceleration in g.
    fn read_accel(&mut self) -> Result<Vector3, SensorError>;

    /// Angular rate in deg/s.
    fn read_gyro(&mut self) -> Result<Vector3, SensorError>;

    /// Raw microphone level (0-65535).
    fn read_mic(&mut self) -> Result<u16, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port.
pub trait ActuatorPort {
    /// Drive `actuator` on or off.  Must be idempotent and must not block
    /// indefinitely.
    fn set(&mut self, actuator: Actuator, on: bool) -> Result<(), ActuatorWriteError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The engine emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
