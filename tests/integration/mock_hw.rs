//! Mock hardware adapter for integration tests.
//!
//! Wraps the library's simulated board and records every actuator call so
//! tests can assert on the full command history.

use core::time::Duration;

use roomctl::adapters::sim::SimulatedBoard;
use roomctl::app::engine::AutomationEngine;
use roomctl::app::events::AppEvent;
use roomctl::app::ports::{ActuatorPort, EventSink, SensorPort};
use roomctl::config::ControllerConfig;
use roomctl::control::hold_off::Actuator;
use roomctl::error::{ActuatorWriteError, SensorError};
use roomctl::sensors::Vector3;

// ── MockBoard ─────────────────────────────────────────────────

pub struct MockBoard {
    pub sim: SimulatedBoard,
    pub calls: Vec<(Actuator, bool)>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new() -> Self {
        Self {
            sim: SimulatedBoard::quiet_room(),
            calls: Vec::new(),
        }
    }

    /// Someone is standing close to the gesture sensor.
    pub fn occupied(mut self) -> Self {
        self.sim.proximity = 50;
        self
    }

    pub fn output(&self, actuator: Actuator) -> bool {
        self.sim.output(actuator)
    }

    pub fn writes_to(&self, actuator: Actuator) -> usize {
        self.calls.iter().filter(|(a, _)| *a == actuator).count()
    }
}

impl Default for MockBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for MockBoard {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.sim.read_temperature()
    }
    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        self.sim.read_humidity()
    }
    fn read_lux(&mut self) -> Result<f32, SensorError> {
        self.sim.read_lux()
    }
    fn read_proximity(&mut self) -> Result<u16, SensorError> {
        self.sim.read_proximity()
    }
    fn read_accel(&mut self) -> Result<Vector3, SensorError> {
        self.sim.read_accel()
    }
    fn read_gyro(&mut self) -> Result<Vector3, SensorError> {
        self.sim.read_gyro()
    }
    fn read_mic(&mut self) -> Result<u16, SensorError> {
        self.sim.read_mic()
    }
}

impl ActuatorPort for MockBoard {
    fn set(&mut self, actuator: Actuator, on: bool) -> Result<(), ActuatorWriteError> {
        self.calls.push((actuator, on));
        self.sim.set(actuator, on)
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn has<F: Fn(&AppEvent) -> bool>(&self, pred: F) -> bool {
        self.events.iter().any(pred)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}

// ── Helpers ───────────────────────────────────────────────────

pub fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

pub fn make_engine(config: ControllerConfig) -> (AutomationEngine, MockBoard, RecordingSink) {
    let engine = AutomationEngine::new(config).expect("preset must validate");
    let mut sink = RecordingSink::new();
    engine.start(&mut sink);
    (engine, MockBoard::new(), sink)
}
