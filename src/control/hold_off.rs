//! Per-actuator hold-off timer.
//!
//! An actuator turns on as soon as it is justified and stays latched for
//! `hold_off` after the last cycle in which it was justified:
//!
//! ```text
//!          justified                 not justified, within hold-off
//!   OFF ──────────────▶ ON_JUSTIFIED ─────────────────────────────▶ ON_HOLDING
//!    ▲                      ▲  ▲                                        │  │
//!    │                      │  └────────────── justified ───────────────┘  │
//!    └──────────────────────┴──────────── hold-off elapsed ────────────────┘
//! ```
//!
//! Every actuator owns its own [`ActuatorState`], so the timers never
//! interfere with each other.

use core::fmt;
use core::time::Duration;

use serde::{Deserialize, Serialize};

/// The three outputs driven by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Actuator {
    /// Presence indicator LED.
    Presence = 0,
    /// Room light.
    Light = 1,
    /// Fan.
    Fan = 2,
}

impl Actuator {
    pub const COUNT: usize = 3;
    pub const ALL: [Self; Self::COUNT] = [Self::Presence, Self::Light, Self::Fan];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Presence => "presence",
            Self::Light => "light",
            Self::Fan => "fan",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Actuator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hold-off bookkeeping for one actuator.
///
/// `last_justified_at` is `None` until the actuator is justified for the
/// first time, which behaves like a timestamp infinitely far in the past.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActuatorState {
    pub is_on: bool,
    pub last_justified_at: Option<Duration>,
}

impl ActuatorState {
    /// Initial state at startup: off, never justified.
    pub const fn new() -> Self {
        Self {
            is_on: false,
            last_justified_at: None,
        }
    }
}

/// State-machine view of an actuator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorPhase {
    Off,
    OnJustified,
    OnHolding,
}

impl ActuatorPhase {
    pub const fn is_on(self) -> bool {
        !matches!(self, Self::Off)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::OnJustified => "on",
            Self::OnHolding => "on (delay active)",
        }
    }
}

/// Pure hold-off logic shared by every actuator.
pub struct ActuatorTimer;

impl ActuatorTimer {
    /// Advance one actuator by one cycle.
    ///
    /// Returns the new on/off value together with the updated state.  Calling
    /// it twice with the same arguments yields the same result.
    pub fn update(
        state: ActuatorState,
        justified_now: bool,
        now: Duration,
        hold_off: Duration,
    ) -> (bool, ActuatorState) {
        let phase = Self::phase(state, justified_now, now, hold_off);
        let last_justified_at = if justified_now {
            Some(now)
        } else {
            state.last_justified_at
        };
        let next = ActuatorState {
            is_on: phase.is_on(),
            last_justified_at,
        };
        (next.is_on, next)
    }

    /// Phase the actuator will be in after this cycle.
    pub fn phase(
        state: ActuatorState,
        justified_now: bool,
        now: Duration,
        hold_off: Duration,
    ) -> ActuatorPhase {
        if justified_now {
            return ActuatorPhase::OnJustified;
        }
        match state.last_justified_at {
            // A clock that went backwards saturates to zero elapsed, which
            // keeps the actuator latched instead of dropping it.
            Some(at) if now.saturating_sub(at) < hold_off => ActuatorPhase::OnHolding,
            _ => ActuatorPhase::Off,
        }
    }
}
