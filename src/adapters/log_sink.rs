//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events
//! through the `log` facade.  Cycle reports become one status line per
//! cycle at `info` level; a page-style breakdown follows at `debug`.

use log::{debug, info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::app::report::StatusReport;
use crate::control::hold_off::Actuator;
use crate::error::Error;

/// Adapter that logs every [`AppEvent`].
pub struct LogEventSink {
    cycles: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { cycles: 0 }
    }

    /// Cycle reports seen so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    fn status(&mut self, r: &StatusReport) {
        self.cycles += 1;
        let on_off = |a: Actuator| if r.actuator(a).on { "ON" } else { "off" };
        info!(
            "STATUS | mode={} | present={} [{}] | T={} H={} lux={} | mic={} prox={} | \
             presence={} light={} fan={}",
            if r.auto_mode { "auto" } else { "manual" },
            if r.present { "yes" } else { "no" },
            r.reasons.join(","),
            r.temperature_text(),
            r.humidity_text(),
            r.lux_text(),
            r.mic_text(),
            r.proximity_text(),
            on_off(Actuator::Presence),
            on_off(Actuator::Light),
            on_off(Actuator::Fan),
        );
        if let Some(b) = r.brightness {
            debug!("  brightness: {}", b.label());
        }
        if let Some(s) = r.sound {
            debug!("  sound level: {}", s.label());
        }
        for a in Actuator::ALL {
            debug!("  {}: {}", a, r.actuator(a).phase.label());
        }
        if !r.unavailable.is_empty() {
            debug!("  unavailable: {}", r.unavailable.join(", "));
        }
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { auto_mode } => {
                info!("START | auto_mode={}", auto_mode);
            }
            AppEvent::SensorFault { sensor, error } => {
                warn!("FAULT | {} | {}", sensor, Error::from(*error));
            }
            AppEvent::PresenceChanged { present } => {
                info!("PRESENCE | {}", if *present { "detected" } else { "cleared" });
            }
            AppEvent::ActuatorChanged { actuator, on } => {
                info!("ACTUATOR | {} -> {}", actuator, if *on { "on" } else { "off" });
            }
            AppEvent::ActuatorWriteFailed { actuator, error } => {
                warn!("FAULT | {} | {}", actuator, Error::from(*error));
            }
            AppEvent::ModeChanged { auto_mode } => {
                info!("MODE | {}", if *auto_mode { "auto" } else { "manual" });
            }
            AppEvent::OverrideApplied { actuator, on } => {
                info!("OVERRIDE | {} -> {}", actuator, if *on { "on" } else { "off" });
            }
            AppEvent::Cycle(report) => self.status(report),
        }
    }
}
