//! Simulated board.
//!
//! Implements [`SensorPort`] and [`ActuatorPort`] entirely in memory so the
//! control loop can run on the host.  Readings are plain fields that a test
//! or a scripted scenario sets between cycles; individual sensors and
//! outputs can be made to fail.

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::hold_off::Actuator;
use crate::error::{ActuatorWriteError, SensorError};
use crate::sensors::{Sensor, Vector3};

/// In-memory sensors and outputs.
#[derive(Debug, Clone)]
pub struct SimulatedBoard {
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub lux: f32,
    pub proximity: u16,
    pub accel: Vector3,
    pub gyro: Vector3,
    pub mic_level: u16,
    sensor_faults: [Option<SensorError>; 7],
    output_faults: [Option<ActuatorWriteError>; Actuator::COUNT],
    outputs: [bool; Actuator::COUNT],
    writes: u64,
}

impl SimulatedBoard {
    /// An empty, comfortable, moderately lit room at rest.
    pub fn quiet_room() -> Self {
        Self {
            temperature_c: 21.0,
            humidity_pct: 45.0,
            lux: 120.0,
            proximity: 0,
            accel: Vector3::new(0.0, 0.0, 1.0),
            gyro: Vector3::default(),
            mic_level: 800,
            sensor_faults: [None; 7],
            output_faults: [None; Actuator::COUNT],
            outputs: [false; Actuator::COUNT],
            writes: 0,
        }
    }

    /// Make every read of `sensor` fail with `error` until [`heal`](Self::heal).
    pub fn fail(&mut self, sensor: Sensor, error: SensorError) {
        self.sensor_faults[sensor as usize] = Some(error);
    }

    pub fn heal(&mut self, sensor: Sensor) {
        self.sensor_faults[sensor as usize] = None;
    }

    /// Make every write to `actuator` fail until [`repair_output`](Self::repair_output).
    pub fn fail_output(&mut self, actuator: Actuator, error: ActuatorWriteError) {
        self.output_faults[actuator.index()] = Some(error);
    }

    pub fn repair_output(&mut self, actuator: Actuator) {
        self.output_faults[actuator.index()] = None;
    }

    /// Current level of an output.
    pub fn output(&self, actuator: Actuator) -> bool {
        self.outputs[actuator.index()]
    }

    /// Successful writes so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }

    fn read<T>(&self, sensor: Sensor, value: T) -> Result<T, SensorError> {
        match self.sensor_faults[sensor as usize] {
            Some(e) => Err(e),
            None => Ok(value),
        }
    }
}

impl Default for SimulatedBoard {
    fn default() -> Self {
        Self::quiet_room()
    }
}

impl SensorPort for SimulatedBoard {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.read(Sensor::Temperature, self.temperature_c)
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        self.read(Sensor::Humidity, self.humidity_pct)
    }

    fn read_lux(&mut self) -> Result<f32, SensorError> {
        self.read(Sensor::Lux, self.lux)
    }

    fn read_proximity(&mut self) -> Result<u16, SensorError> {
        self.read(Sensor::Proximity, self.proximity)
    }

    fn read_accel(&mut self) -> Result<Vector3, SensorError> {
        self.read(Sensor::Accel, self.accel)
    }

    fn read_gyro(&mut self) -> Result<Vector3, SensorError> {
        self.read(Sensor::Gyro, self.gyro)
    }

    fn read_mic(&mut self) -> Result<u16, SensorError> {
        self.read(Sensor::Mic, self.mic_level)
    }
}

impl ActuatorPort for SimulatedBoard {
    fn set(&mut self, actuator: Actuator, on: bool) -> Result<(), ActuatorWriteError> {
        if let Some(e) = self.output_faults[actuator.index()] {
            return Err(e);
        }
        self.outputs[actuator.index()] = on;
        self.writes += 1;
        Ok(())
    }
}
