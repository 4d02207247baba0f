//! Cycle results and the display-oriented status report.
//!
//! Both types are plain values.  Whoever renders or logs them gets a copy,
//! never a view into the engine's live state.

use core::fmt;
use core::time::Duration;

use serde::Serialize;

use crate::config::ControllerConfig;
use crate::control::hold_off::{Actuator, ActuatorPhase, ActuatorState};
use crate::control::presence::Reasons;
use crate::sensors::SensorSnapshot;

/// Marker shown in place of a reading that could not be taken this cycle.
pub const SENSOR_UNAVAILABLE: &str = "sensor unavailable";

// ---------------------------------------------------------------------------
// EvaluationResult
// ---------------------------------------------------------------------------

/// Output of one [`run_cycle`](super::engine::AutomationEngine::run_cycle).
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Monotonic time the cycle ran at.
    pub at: Duration,
    pub present: bool,
    pub reasons: Reasons,
    /// Indexed by [`Actuator::index`].
    pub actuator_states: [ActuatorState; Actuator::COUNT],
    /// Indexed by [`Actuator::index`].
    pub phases: [ActuatorPhase; Actuator::COUNT],
    pub auto_mode: bool,
    pub raw_snapshot: SensorSnapshot,
}

impl EvaluationResult {
    pub fn state(&self, actuator: Actuator) -> ActuatorState {
        self.actuator_states[actuator.index()]
    }

    pub fn is_on(&self, actuator: Actuator) -> bool {
        self.state(actuator).is_on
    }

    pub fn phase(&self, actuator: Actuator) -> ActuatorPhase {
        self.phases[actuator.index()]
    }

    /// Reason strings in rule order.
    pub fn reason_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.reasons.iter().map(|r| r.as_str())
    }
}

// ---------------------------------------------------------------------------
// Display classifications
// ---------------------------------------------------------------------------

/// Human label for an illuminance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Brightness {
    VeryDark,
    Dim,
    Normal,
    Bright,
    Sunny,
}

impl Brightness {
    pub fn classify(lux: f32) -> Self {
        if lux < 10.0 {
            Self::VeryDark
        } else if lux < 50.0 {
            Self::Dim
        } else if lux < 300.0 {
            Self::Normal
        } else if lux < 1000.0 {
            Self::Bright
        } else {
            Self::Sunny
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryDark => "Very Dark",
            Self::Dim => "Dim",
            Self::Normal => "Normal",
            Self::Bright => "Bright",
            Self::Sunny => "Sunny",
        }
    }
}

/// Human label for the microphone level relative to its limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoundLevel {
    Normal,
    Loud,
}

impl SoundLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Loud => "Loud",
        }
    }
}

// ---------------------------------------------------------------------------
// StatusReport
// ---------------------------------------------------------------------------

/// One actuator line of the status report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActuatorStatus {
    pub actuator: Actuator,
    pub on: bool,
    #[serde(serialize_with = "phase_label")]
    pub phase: ActuatorPhase,
}

fn phase_label<S: serde::Serializer>(phase: &ActuatorPhase, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(phase.label())
}

/// Snapshot of everything the status page shows.  Absent readings are
/// `None` and render as [`SENSOR_UNAVAILABLE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    pub auto_mode: bool,
    pub present: bool,
    /// `None` when every motion sensor in use was unavailable.
    pub motion: Option<bool>,
    pub reasons: heapless::Vec<&'static str, 4>,
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    pub lux: Option<f32>,
    pub brightness: Option<Brightness>,
    pub proximity: Option<u16>,
    pub mic_level: Option<u16>,
    pub sound: Option<SoundLevel>,
    pub unavailable: heapless::Vec<&'static str, 7>,
    pub actuators: [ActuatorStatus; Actuator::COUNT],
}

impl StatusReport {
    pub fn new(result: &EvaluationResult, config: &ControllerConfig) -> Self {
        let snap = &result.raw_snapshot;
        let mic_limit = config.presence.mic_limit;
        let source = config.presence.motion;

        let mut reasons = heapless::Vec::new();
        let mut motion = false;
        for r in &result.reasons {
            motion |= r.is_motion();
            let _ = reasons.push(r.as_str());
        }

        let motion_read = (source.uses_accel() && snap.accel.is_some())
            || (source.uses_gyro() && snap.gyro.is_some());
        let motion = motion_read.then_some(motion);

        let mut unavailable = heapless::Vec::new();
        for s in crate::sensors::Sensor::ALL {
            if !snap.has(s) {
                let _ = unavailable.push(s.name());
            }
        }

        let actuators = Actuator::ALL.map(|a| ActuatorStatus {
            actuator: a,
            on: result.is_on(a),
            phase: result.phase(a),
        });

        Self {
            auto_mode: result.auto_mode,
            present: result.present,
            motion,
            reasons,
            temperature_c: snap.temperature_c,
            humidity_pct: snap.humidity_pct,
            lux: snap.lux,
            brightness: snap.lux.map(Brightness::classify),
            proximity: snap.proximity,
            mic_level: snap.mic_level,
            sound: snap.mic_level.map(|m| {
                if m > mic_limit { SoundLevel::Loud } else { SoundLevel::Normal }
            }),
            unavailable,
            actuators,
        }
    }

    pub fn actuator(&self, actuator: Actuator) -> ActuatorStatus {
        self.actuators[actuator.index()]
    }

    /// Temperature formatted for display, or the unavailable marker.
    pub fn temperature_text(&self) -> Reading<f32> {
        Reading::new(self.temperature_c, 1, "\u{00b0}C")
    }

    pub fn humidity_text(&self) -> Reading<f32> {
        Reading::new(self.humidity_pct, 0, "%")
    }

    pub fn lux_text(&self) -> Reading<f32> {
        Reading::new(self.lux, 2, "")
    }

    pub fn proximity_text(&self) -> Reading<u16> {
        Reading::new(self.proximity, 0, "")
    }

    pub fn mic_text(&self) -> Reading<u16> {
        Reading::new(self.mic_level, 0, "")
    }

    /// JSON form for machine consumers.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Display adapter for an optional reading.
#[derive(Debug, Clone, Copy)]
pub struct Reading<T> {
    value: Option<T>,
    precision: usize,
    unit: &'static str,
}

impl<T> Reading<T> {
    fn new(value: Option<T>, precision: usize, unit: &'static str) -> Self {
        Self {
            value,
            precision,
            unit,
        }
    }
}

impl fmt::Display for Reading<f32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{:.*}{}", self.precision, v, self.unit),
            None => f.write_str(SENSOR_UNAVAILABLE),
        }
    }
}

impl fmt::Display for Reading<u16> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(v) => write!(f, "{}{}", v, self.unit),
            None => f.write_str(SENSOR_UNAVAILABLE),
        }
    }
}
