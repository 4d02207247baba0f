//! Sensor subsystem — the per-cycle [`SensorSnapshot`] and the
//! [`SensorReader`] that assembles it from a [`SensorPort`].
//!
//! Every sensor is read exactly once per cycle.  A failed read leaves its
//! field absent and sets the sensor's bit in [`SensorFaults`]; the remaining
//! sensors are still read.  There are no retries: the control loop period is
//! the retry interval.

use core::fmt;

use log::warn;

use crate::app::ports::SensorPort;
use crate::error::SensorError;

// ---------------------------------------------------------------------------
// Sensor identity
// ---------------------------------------------------------------------------

/// Every sensor the controller polls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Sensor {
    Temperature = 0,
    Humidity = 1,
    Lux = 2,
    Proximity = 3,
    Accel = 4,
    Gyro = 5,
    Mic = 6,
}

impl Sensor {
    pub const ALL: [Self; 7] = [
        Self::Temperature,
        Self::Humidity,
        Self::Lux,
        Self::Proximity,
        Self::Accel,
        Self::Gyro,
        Self::Mic,
    ];

    /// Bit used in [`SensorFaults`].
    pub const fn mask(self) -> u8 {
        1 << self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
            Self::Lux => "lux",
            Self::Proximity => "proximity",
            Self::Accel => "accel",
            Self::Gyro => "gyro",
            Self::Mic => "mic",
        }
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Bitmask of sensors whose read failed this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SensorFaults(u8);

impl SensorFaults {
    pub fn set(&mut self, sensor: Sensor) {
        self.0 |= sensor.mask();
    }

    pub fn contains(self, sensor: Sensor) -> bool {
        self.0 & sensor.mask() != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over the faulted sensors in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Sensor> {
        Sensor::ALL.into_iter().filter(move |s| self.contains(*s))
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Three-axis reading (accelerometer in g, gyroscope in deg/s).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Largest absolute component.
    pub fn max_abs(&self) -> f32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// A point-in-time snapshot of every sensor.  Absent fields mean the read
/// failed this cycle; consumers must treat them as "does not trigger".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSnapshot {
    /// Air temperature (Celsius).
    pub temperature_c: Option<f32>,
    /// Relative humidity (%).
    pub humidity_pct: Option<f32>,
    /// Illuminance (lux).
    pub lux: Option<f32>,
    /// Raw proximity level.
    pub proximity: Option<u16>,
    /// Acceleration (g).
    pub accel: Option<Vector3>,
    /// Angular rate (deg/s).
    pub gyro: Option<Vector3>,
    /// Raw microphone level, full 16-bit range.
    pub mic_level: Option<u16>,
    /// Sensors whose read failed while producing this snapshot.
    pub faults: SensorFaults,
}

impl SensorSnapshot {
    /// Whether the reading for `sensor` is present.
    pub fn has(&self, sensor: Sensor) -> bool {
        match sensor {
            Sensor::Temperature => self.temperature_c.is_some(),
            Sensor::Humidity => self.humidity_pct.is_some(),
            Sensor::Lux => self.lux.is_some(),
            Sensor::Proximity => self.proximity.is_some(),
            Sensor::Accel => self.accel.is_some(),
            Sensor::Gyro => self.gyro.is_some(),
            Sensor::Mic => self.mic_level.is_some(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Assembles a [`SensorSnapshot`] from a [`SensorPort`], tolerating
/// per-sensor failure.
#[derive(Debug, Default)]
pub struct SensorReader;

impl SensorReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every sensor once.  Never fails; the returned snapshot carries
    /// the per-sensor outcome.  The error for each failed sensor is handed
    /// to `on_fault` so the caller can surface it.
    pub fn read(
        &self,
        port: &mut impl SensorPort,
        mut on_fault: impl FnMut(Sensor, SensorError),
    ) -> SensorSnapshot {
        let mut faults = SensorFaults::default();
        let mut take = Collector {
            faults: &mut faults,
            on_fault: &mut on_fault,
        };

        let temperature_c = take.field(Sensor::Temperature, port.read_temperature().and_then(finite));
        let humidity_pct = take.field(Sensor::Humidity, port.read_humidity().and_then(finite));
        let lux = take.field(Sensor::Lux, port.read_lux().and_then(finite));
        let proximity = take.field(Sensor::Proximity, port.read_proximity());
        let accel = take.field(Sensor::Accel, port.read_accel().and_then(finite_vec));
        let gyro = take.field(Sensor::Gyro, port.read_gyro().and_then(finite_vec));
        let mic_level = take.field(Sensor::Mic, port.read_mic());

        SensorSnapshot {
            temperature_c,
            humidity_pct,
            lux,
            proximity,
            accel,
            gyro,
            mic_level,
            faults,
        }
    }
}

/// Folds per-sensor results into optional fields plus the fault mask.
struct Collector<'a, F> {
    faults: &'a mut SensorFaults,
    on_fault: &'a mut F,
}

impl<F: FnMut(Sensor, SensorError)> Collector<'_, F> {
    fn field<T>(&mut self, sensor: Sensor, result: Result<T, SensorError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("sensor {} unavailable: {}", sensor, e);
                self.faults.set(sensor);
                (self.on_fault)(sensor, e);
                None
            }
        }
    }
}

fn finite(v: f32) -> Result<f32, SensorError> {
    if v.is_finite() { Ok(v) } else { Err(SensorError::Malformed) }
}

fn finite_vec(v: Vector3) -> Result<Vector3, SensorError> {
    if v.is_finite() { Ok(v) } else { Err(SensorError::Malformed) }
}
