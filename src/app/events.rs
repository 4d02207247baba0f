//! Outbound application events.
//!
//! The [`AutomationEngine`](super::engine::AutomationEngine) emits these
//! through the [`EventSink`](super::ports::EventSink) port.  Adapters on the
//! other side decide what to do with them: log to the console, render a
//! status page, publish elsewhere.

use crate::control::hold_off::Actuator;
use crate::error::{ActuatorWriteError, SensorError};
use crate::sensors::Sensor;

use super::report::StatusReport;

/// Structured events emitted by the application core.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The engine was constructed; carries the initial mode.
    Started { auto_mode: bool },

    /// A sensor read failed this cycle.
    SensorFault { sensor: Sensor, error: SensorError },

    /// Presence flipped.
    PresenceChanged { present: bool },

    /// An actuator output flipped.
    ActuatorChanged { actuator: Actuator, on: bool },

    /// An actuator write failed; the output is assumed unchanged.
    ActuatorWriteFailed {
        actuator: Actuator,
        error: ActuatorWriteError,
    },

    /// Auto/manual mode changed.
    ModeChanged { auto_mode: bool },

    /// A manual override was applied.
    OverrideApplied { actuator: Actuator, on: bool },

    /// End-of-cycle status.
    Cycle(StatusReport),
}
