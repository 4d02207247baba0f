//! Automation engine — the hexagonal core.
//!
//! [`AutomationEngine`] owns the configuration, the per-actuator hold-off
//! state and the auto/manual flag.  All I/O flows through port traits
//! passed in at call sites, so the engine is testable with mock adapters.
//!
//! ```text
//!  SensorPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │       AutomationEngine        │
//! ActuatorPort ◀──│ Presence · HoldOff ×3 · Mode  │ ◀── ControlCommand
//!                 └──────────────────────────────┘
//! ```
//!
//! Cycles run strictly one after another.  Nothing a sensor or actuator
//! does can make [`AutomationEngine::run_cycle`] fail: sensor faults degrade
//! the affected field to absent, actuator faults leave that actuator in its
//! previous state.

use core::time::Duration;

use log::{debug, info, warn};

use crate::config::{AutomationThresholds, ControllerConfig};
use crate::control::hold_off::{Actuator, ActuatorPhase, ActuatorState, ActuatorTimer};
use crate::control::presence::{Presence, PresenceDetector};
use crate::error::{Error, Result};
use crate::sensors::{SensorReader, SensorSnapshot};

use super::commands::ControlCommand;
use super::events::AppEvent;
use super::inbox::Inbox;
use super::ports::{ActuatorPort, EventSink, SensorPort};
use super::report::{EvaluationResult, StatusReport};

/// Whether `actuator` is justified on this cycle.
///
/// - presence: someone is present.
/// - light: present and the room is darker than `lux_limit`.
/// - fan: present and it is hotter than `temp_limit` or more humid than
///   `humidity_limit`.
///
/// A missing lux, temperature or humidity reading never justifies its
/// actuator, even while presence is detected from other sensors.
pub fn justified(
    actuator: Actuator,
    present: bool,
    snapshot: &SensorSnapshot,
    limits: &AutomationThresholds,
) -> bool {
    if !present {
        return false;
    }
    match actuator {
        Actuator::Presence => true,
        Actuator::Light => snapshot.lux.is_some_and(|l| l < limits.lux_limit),
        Actuator::Fan => {
            snapshot.temperature_c.is_some_and(|t| t > limits.temp_limit)
                || snapshot.humidity_pct.is_some_and(|h| h > limits.humidity_limit)
        }
    }
}

/// The engine orchestrates one evaluation per control cycle.
pub struct AutomationEngine {
    config: ControllerConfig,
    reader: SensorReader,
    states: [ActuatorState; Actuator::COUNT],
    phases: [ActuatorPhase; Actuator::COUNT],
    auto_mode: bool,
    present: bool,
    last: Option<EvaluationResult>,
    cycle_count: u64,
}

impl AutomationEngine {
    /// Construct the engine.  Every actuator starts off and never justified;
    /// automation starts enabled.
    pub fn new(config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            reader: SensorReader::new(),
            states: [ActuatorState::new(); Actuator::COUNT],
            phases: [ActuatorPhase::Off; Actuator::COUNT],
            auto_mode: true,
            present: false,
            last: None,
            cycle_count: 0,
        })
    }

    /// Announce the engine on the sink.  Call once before the first cycle.
    pub fn start(&self, sink: &mut impl EventSink) {
        info!(
            "AutomationEngine started (auto_mode={}, hold_off={:?})",
            self.auto_mode,
            self.config.automation.hold_off()
        );
        sink.emit(&AppEvent::Started {
            auto_mode: self.auto_mode,
        });
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one full cycle: read sensors → presence → hold-off × 3 →
    /// actuators.
    ///
    /// In manual mode sensors are still read and presence is still
    /// evaluated for display, but no automated decision is made and no
    /// actuator is written.
    pub fn run_cycle(
        &mut self,
        now: Duration,
        hw: &mut (impl SensorPort + ActuatorPort),
        sink: &mut impl EventSink,
    ) -> EvaluationResult {
        self.cycle_count += 1;

        // 1. Snapshot
        let snapshot = self.reader.read(hw, |sensor, error| {
            sink.emit(&AppEvent::SensorFault { sensor, error });
        });

        // 2. Presence
        let presence = PresenceDetector::evaluate(&snapshot, &self.config.presence);
        if presence.present != self.present {
            info!(
                "presence {} ({})",
                if presence.present { "detected" } else { "cleared" },
                join_reasons(&presence)
            );
            self.present = presence.present;
            sink.emit(&AppEvent::PresenceChanged {
                present: presence.present,
            });
        }

        // 3 + 4. Hold-off decisions and actuator writes
        if self.auto_mode {
            self.automate(now, &presence, &snapshot, hw, sink);
        } else {
            debug!("manual mode, automated decisions skipped");
        }

        // 5. Result
        let result = EvaluationResult {
            at: now,
            present: presence.present,
            reasons: presence.reasons,
            actuator_states: self.states,
            phases: self.phases,
            auto_mode: self.auto_mode,
            raw_snapshot: snapshot,
        };
        sink.emit(&AppEvent::Cycle(StatusReport::new(&result, &self.config)));
        self.last = Some(result.clone());
        result
    }

    fn automate(
        &mut self,
        now: Duration,
        presence: &Presence,
        snapshot: &SensorSnapshot,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let limits = self.config.automation;
        let hold_off = limits.hold_off();

        for actuator in Actuator::ALL {
            let i = actuator.index();
            let prev = self.states[i];
            let justified_now = justified(actuator, presence.present, snapshot, &limits);
            let phase = ActuatorTimer::phase(prev, justified_now, now, hold_off);
            let (on, mut next) = ActuatorTimer::update(prev, justified_now, now, hold_off);

            match hw.set(actuator, on) {
                Ok(()) => self.phases[i] = phase,
                Err(error) => {
                    warn!("{}: {}, keeping previous output", actuator, Error::from(error));
                    next.is_on = prev.is_on;
                    sink.emit(&AppEvent::ActuatorWriteFailed { actuator, error });
                }
            }

            if next.is_on != prev.is_on {
                info!("{} -> {}", actuator, self.phases[i].label());
                sink.emit(&AppEvent::ActuatorChanged {
                    actuator,
                    on: next.is_on,
                });
            }
            self.states[i] = next;
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply an external command between cycles.
    pub fn handle_command(
        &mut self,
        cmd: ControlCommand,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        match cmd {
            ControlCommand::Override { actuator, on } => self.apply_override(actuator, on, hw, sink),
            ControlCommand::SetAutoMode(auto) => self.set_auto_mode(auto, sink),
            ControlCommand::UpdateConfig(config) => {
                if let Err(e) = self.update_config(config) {
                    warn!("rejected configuration update: {}", e);
                }
            }
        }
    }

    /// Apply every queued command.  Returns how many were applied.
    pub fn drain_inbox(
        &mut self,
        inbox: &Inbox,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> usize {
        let mut applied = 0;
        while let Some(cmd) = inbox.try_take() {
            self.handle_command(cmd, hw, sink);
            applied += 1;
        }
        applied
    }

    /// Switch between automated and manual control.
    pub fn set_auto_mode(&mut self, auto: bool, sink: &mut impl EventSink) {
        if self.auto_mode == auto {
            return;
        }
        self.auto_mode = auto;
        if !auto {
            // No hold-off runs in manual mode; a latched output is just on.
            for phase in &mut self.phases {
                if *phase == ActuatorPhase::OnHolding {
                    *phase = ActuatorPhase::OnJustified;
                }
            }
        }
        info!("auto mode {}", if auto { "enabled" } else { "disabled" });
        sink.emit(&AppEvent::ModeChanged { auto_mode: auto });
    }

    /// Replace thresholds.  Actuator timers are kept as they are.
    pub fn update_config(&mut self, config: ControllerConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        info!("configuration updated at runtime");
        Ok(())
    }

    fn apply_override(
        &mut self,
        actuator: Actuator,
        on: bool,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) {
        let i = actuator.index();
        if let Err(error) = hw.set(actuator, on) {
            warn!("override of {} failed: {}", actuator, Error::from(error));
            sink.emit(&AppEvent::ActuatorWriteFailed { actuator, error });
            return;
        }

        let was_on = self.states[i].is_on;
        self.states[i].is_on = on;
        self.phases[i] = if on { ActuatorPhase::OnJustified } else { ActuatorPhase::Off };
        info!("override {} -> {}", actuator, if on { "on" } else { "off" });
        sink.emit(&AppEvent::OverrideApplied { actuator, on });
        if was_on != on {
            sink.emit(&AppEvent::ActuatorChanged { actuator, on });
        }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn auto_mode(&self) -> bool {
        self.auto_mode
    }

    pub fn state(&self, actuator: Actuator) -> ActuatorState {
        self.states[actuator.index()]
    }

    /// Copy of the last cycle's result.
    pub fn last_result(&self) -> Option<EvaluationResult> {
        self.last.clone()
    }

    /// Status of the last cycle, with the current mode and actuator outputs
    /// (which overrides may have changed since).
    pub fn status(&self) -> Option<StatusReport> {
        let mut result = self.last.clone()?;
        result.auto_mode = self.auto_mode;
        result.actuator_states = self.states;
        result.phases = self.phases;
        Some(StatusReport::new(&result, &self.config))
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Cycles executed since startup.
    pub fn cycle_count(&self) -> u64 {
        self.cycle_count
    }
}

fn join_reasons(presence: &Presence) -> heapless::String<48> {
    let mut out = heapless::String::new();
    for (i, r) in presence.reasons.iter().enumerate() {
        if i > 0 {
            let _ = out.push_str(", ");
        }
        let _ = out.push_str(r.as_str());
    }
    out
}
