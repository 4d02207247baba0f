//! Presence detector.
//!
//! Fuses one [`SensorSnapshot`] into a boolean `present` plus the list of
//! rules that fired.  The rules are independent and OR-ed together:
//!
//! | Rule          | Fires when                                         |
//! |---------------|----------------------------------------------------|
//! | proximity     | `proximity > proximity_limit`                      |
//! | acceleration  | `max(|ax|,|ay|,|az|) > accel_limit`                |
//! | gyro          | `max(|gx|,|gy|,|gz|) > gyro_limit`                 |
//! | sound         | `mic_level > mic_limit`                            |
//!
//! Absent readings are skipped.  The detector holds no state, so the same
//! snapshot and thresholds always produce the same result.

use core::fmt;

use heapless::Vec;

use crate::config::PresenceThresholds;
use crate::sensors::SensorSnapshot;

/// Why presence was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceReason {
    Proximity,
    Acceleration,
    Gyro,
    Sound,
}

impl PresenceReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Proximity => "proximity",
            Self::Acceleration => "acceleration",
            Self::Gyro => "gyro",
            Self::Sound => "sound",
        }
    }

    pub const fn is_motion(self) -> bool {
        matches!(self, Self::Acceleration | Self::Gyro)
    }
}

impl fmt::Display for PresenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every rule that fired, in rule order.
pub type Reasons = Vec<PresenceReason, 4>;

/// Outcome of one presence evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Presence {
    pub present: bool,
    pub reasons: Reasons,
}

impl Presence {
    /// Whether a motion rule (acceleration or gyro) fired.
    pub fn motion(&self) -> bool {
        self.reasons.iter().any(|r| r.is_motion())
    }
}

/// Stateless presence fusion.
pub struct PresenceDetector;

impl PresenceDetector {
    pub fn evaluate(snapshot: &SensorSnapshot, thresholds: &PresenceThresholds) -> Presence {
        let mut reasons = Reasons::new();
        // At most four rules can fire, which is exactly the capacity.
        let mut fire = |reason| {
            let _ = reasons.push(reason);
        };

        if snapshot.proximity.is_some_and(|p| p > thresholds.proximity_limit) {
            fire(PresenceReason::Proximity);
        }
        if thresholds.motion.uses_accel()
            && snapshot.accel.is_some_and(|a| a.max_abs() > thresholds.accel_limit)
        {
            fire(PresenceReason::Acceleration);
        }
        if thresholds.motion.uses_gyro()
            && snapshot.gyro.is_some_and(|g| g.max_abs() > thresholds.gyro_limit)
        {
            fire(PresenceReason::Gyro);
        }
        if snapshot.mic_level.is_some_and(|m| m > thresholds.mic_limit) {
            fire(PresenceReason::Sound);
        }

        Presence {
            present: !reasons.is_empty(),
            reasons,
        }
    }
}
