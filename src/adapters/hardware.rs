//! Hardware adapter — bridges a sensor source and three output pins to the
//! domain port traits.
//!
//! Output pins are anything implementing `embedded-hal`'s
//! [`OutputPin`], so the same adapter drives MCU GPIOs, I/O expanders or
//! test doubles.  The sensor side is any [`SensorPort`]; bus drivers live
//! outside this crate.

use embedded_hal::digital::{Error as _, ErrorKind, OutputPin};
use log::debug;

use crate::app::ports::{ActuatorPort, SensorPort};
use crate::control::hold_off::Actuator;
use crate::error::{ActuatorWriteError, SensorError};
use crate::sensors::Vector3;

/// Active-high output pins, one per actuator.
pub struct OutputPins<P, L, F> {
    pub presence: P,
    pub light: L,
    pub fan: F,
}

/// Concrete adapter that combines the sensor source and output pins.
pub struct HardwareAdapter<S, P, L, F> {
    sensors: S,
    pins: OutputPins<P, L, F>,
    /// Last level successfully written, indexed by [`Actuator::index`].
    levels: [Option<bool>; Actuator::COUNT],
}

impl<S, P, L, F> HardwareAdapter<S, P, L, F>
where
    S: SensorPort,
    P: OutputPin,
    L: OutputPin,
    F: OutputPin,
{
    pub fn new(sensors: S, pins: OutputPins<P, L, F>) -> Self {
        Self {
            sensors,
            pins,
            levels: [None; Actuator::COUNT],
        }
    }

    /// Last level written to `actuator`, `None` before the first write.
    pub fn level(&self, actuator: Actuator) -> Option<bool> {
        self.levels[actuator.index()]
    }

    pub fn sensors_mut(&mut self) -> &mut S {
        &mut self.sensors
    }

    pub fn into_parts(self) -> (S, OutputPins<P, L, F>) {
        (self.sensors, self.pins)
    }
}

fn drive<O: OutputPin>(pin: &mut O, on: bool) -> Result<(), ActuatorWriteError> {
    let result = if on { pin.set_high() } else { pin.set_low() };
    result.map_err(|e| match e.kind() {
        ErrorKind::Other => ActuatorWriteError::Gpio,
        _ => ActuatorWriteError::Unavailable,
    })
}

// ── SensorPort implementation ─────────────────────────────────

impl<S: SensorPort, P, L, F> SensorPort for HardwareAdapter<S, P, L, F> {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.sensors.read_temperature()
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        self.sensors.read_humidity()
    }

    fn read_lux(&mut self) -> Result<f32, SensorError> {
        self.sensors.read_lux()
    }

    fn read_proximity(&mut self) -> Result<u16, SensorError> {
        self.sensors.read_proximity()
    }

    fn read_accel(&mut self) -> Result<Vector3, SensorError> {
        self.sensors.read_accel()
    }

    fn read_gyro(&mut self) -> Result<Vector3, SensorError> {
        self.sensors.read_gyro()
    }

    fn read_mic(&mut self) -> Result<u16, SensorError> {
        self.sensors.read_mic()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl<S, P, L, F> ActuatorPort for HardwareAdapter<S, P, L, F>
where
    P: OutputPin,
    L: OutputPin,
    F: OutputPin,
{
    fn set(&mut self, actuator: Actuator, on: bool) -> Result<(), ActuatorWriteError> {
        match actuator {
            Actuator::Presence => drive(&mut self.pins.presence, on)?,
            Actuator::Light => drive(&mut self.pins.light, on)?,
            Actuator::Fan => drive(&mut self.pins.fan, on)?,
        }
        let slot = &mut self.levels[actuator.index()];
        if *slot != Some(on) {
            debug!("{} pin -> {}", actuator, if on { "high" } else { "low" });
        }
        *slot = Some(on);
        Ok(())
    }
}
