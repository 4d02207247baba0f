//! Integration tests for the sensors → presence → hold-off → actuators
//! pipeline of `AutomationEngine`.

use crate::mock_hw::{MockBoard, make_engine, secs};

use roomctl::app::commands::{ControlCommand, parse_query};
use roomctl::app::events::AppEvent;
use roomctl::app::inbox::Inbox;
use roomctl::config::ControllerConfig;
use roomctl::control::hold_off::{Actuator, ActuatorPhase};
use roomctl::error::{ActuatorWriteError, SensorError};
use roomctl::sensors::Sensor;

// ── Hold-off on the fan ───────────────────────────────────────

#[test]
fn fan_latches_for_hold_off_after_presence_leaves() {
    let (mut engine, _, mut sink) = make_engine(ControllerConfig::standalone());
    let mut hw = MockBoard::new().occupied();
    hw.sim.temperature_c = 26.0;
    hw.sim.humidity_pct = 50.0;

    let r = engine.run_cycle(secs(100), &mut hw, &mut sink);
    assert!(r.present);
    assert!(r.is_on(Actuator::Fan), "26 C over a 25 C limit should run the fan");
    assert_eq!(r.phase(Actuator::Fan), ActuatorPhase::OnJustified);
    assert_eq!(r.state(Actuator::Fan).last_justified_at, Some(secs(100)));

    // Nobody there any more; hold-off is 5 s.
    hw.sim.proximity = 0;
    let r = engine.run_cycle(secs(104), &mut hw, &mut sink);
    assert!(!r.present);
    assert!(r.is_on(Actuator::Fan), "still inside the hold-off window");
    assert_eq!(r.phase(Actuator::Fan), ActuatorPhase::OnHolding);
    assert!(hw.output(Actuator::Fan));

    let r = engine.run_cycle(secs(106), &mut hw, &mut sink);
    assert!(!r.is_on(Actuator::Fan), "hold-off expired");
    assert_eq!(r.phase(Actuator::Fan), ActuatorPhase::Off);
    assert!(!hw.output(Actuator::Fan));
}

#[test]
fn actuators_have_independent_timers() {
    let (mut engine, _, mut sink) = make_engine(ControllerConfig::standalone());
    let mut hw = MockBoard::new().occupied();
    hw.sim.temperature_c = 28.0;
    hw.sim.lux = 900.0;

    let r = engine.run_cycle(secs(0), &mut hw, &mut sink);
    assert!(r.is_on(Actuator::Presence));
    assert!(r.is_on(Actuator::Fan));
    assert!(!r.is_on(Actuator::Light), "room is bright");

    // Fan loses its justification while presence keeps its own.
    hw.sim.temperature_c = 20.0;
    let r = engine.run_cycle(secs(2), &mut hw, &mut sink);
    assert_eq!(r.phase(Actuator::Presence), ActuatorPhase::OnJustified);
    assert_eq!(r.phase(Actuator::Fan), ActuatorPhase::OnHolding);

    let r = engine.run_cycle(secs(6), &mut hw, &mut sink);
    assert!(r.is_on(Actuator::Presence));
    assert!(!r.is_on(Actuator::Fan));
}

// ── Degraded sensors ──────────────────────────────────────────

#[test]
fn missing_lux_never_justifies_light() {
    let (mut engine, _, mut sink) = make_engine(ControllerConfig::standalone());
    let mut hw = MockBoard::new().occupied();
    hw.sim.fail(Sensor::Lux, SensorError::Timeout);

    for t in 0..5 {
        let r = engine.run_cycle(secs(t * 2), &mut hw, &mut sink);
        assert!(r.present, "presence comes from proximity");
        assert!(r.raw_snapshot.lux.is_none());
        assert!(!r.is_on(Actuator::Light));
    }
    assert!(sink.has(|e| matches!(
        e,
        AppEvent::SensorFault { sensor: Sensor::Lux, error: SensorError::Timeout }
    )));
}

#[test]
fn failing_sensor_does_not_stop_the_cycle() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());
    for s in Sensor::ALL {
        hw.sim.fail(s, SensorError::Bus);
    }

    let r = engine.run_cycle(secs(1), &mut hw, &mut sink);
    assert!(!r.present);
    assert!(r.reasons.is_empty());
    for a in Actuator::ALL {
        assert!(!r.is_on(a));
    }
    let faults = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::SensorFault { .. }))
        .count();
    assert_eq!(faults, Sensor::ALL.len());
}

// ── Presence reasons ──────────────────────────────────────────

#[test]
fn loud_room_is_present_for_sound_only() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::web());
    hw.sim.mic_level = 16_000;

    let r = engine.run_cycle(secs(0), &mut hw, &mut sink);
    assert!(r.present);
    assert_eq!(r.reason_names().collect::<Vec<_>>(), ["sound"]);
    assert!(sink.has(|e| matches!(e, AppEvent::PresenceChanged { present: true })));
}

// ── Manual mode and overrides ─────────────────────────────────

#[test]
fn override_persists_in_manual_mode() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());

    engine.handle_command(ControlCommand::SetAutoMode(false), &mut hw, &mut sink);
    engine.handle_command(
        ControlCommand::Override { actuator: Actuator::Fan, on: true },
        &mut hw,
        &mut sink,
    );
    assert!(hw.output(Actuator::Fan), "override is written immediately");

    let writes_before = hw.calls.len();
    for t in 1..=10 {
        let r = engine.run_cycle(secs(t * 2), &mut hw, &mut sink);
        assert!(!r.auto_mode);
        assert!(r.is_on(Actuator::Fan));
    }
    assert_eq!(hw.calls.len(), writes_before, "manual mode writes nothing");

    engine.handle_command(ControlCommand::SetAutoMode(true), &mut hw, &mut sink);
    let r = engine.run_cycle(secs(30), &mut hw, &mut sink);
    assert!(!r.is_on(Actuator::Fan), "automation takes the fan back");
    assert!(!hw.output(Actuator::Fan));
    assert!(sink.has(|e| matches!(e, AppEvent::ModeChanged { auto_mode: true })));
}

#[test]
fn manual_mode_shows_no_hold_off() {
    let (mut engine, _, mut sink) = make_engine(ControllerConfig::standalone());
    let mut hw = MockBoard::new().occupied();
    hw.sim.temperature_c = 27.0;
    engine.run_cycle(secs(0), &mut hw, &mut sink);

    hw.sim.proximity = 0;
    let r = engine.run_cycle(secs(2), &mut hw, &mut sink);
    assert_eq!(r.phase(Actuator::Fan), ActuatorPhase::OnHolding);

    engine.set_auto_mode(false, &mut sink);
    let report = engine.status().expect("a cycle has run");
    assert_eq!(report.actuator(Actuator::Fan).phase, ActuatorPhase::OnJustified);

    // Long past the hold-off, the fan is still plainly on.
    let r = engine.run_cycle(secs(60), &mut hw, &mut sink);
    assert!(r.is_on(Actuator::Fan));
    assert_eq!(r.phase(Actuator::Fan).label(), "on");
}

#[test]
fn override_in_auto_mode_lasts_one_cycle() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());
    engine.run_cycle(secs(0), &mut hw, &mut sink);

    engine.handle_command(
        ControlCommand::Override { actuator: Actuator::Light, on: true },
        &mut hw,
        &mut sink,
    );
    assert!(engine.state(Actuator::Light).is_on);
    assert!(sink.has(|e| matches!(
        e,
        AppEvent::OverrideApplied { actuator: Actuator::Light, on: true }
    )));

    let r = engine.run_cycle(secs(2), &mut hw, &mut sink);
    assert!(!r.is_on(Actuator::Light));
}

#[test]
fn commands_arrive_through_the_inbox() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());
    let inbox = Inbox::new();

    for cmd in parse_query("GET /?auto=off&presence=on HTTP/1.1").unwrap() {
        assert!(inbox.try_post(cmd));
    }
    assert_eq!(inbox.len(), 2);

    assert_eq!(engine.drain_inbox(&inbox, &mut hw, &mut sink), 2);
    assert!(inbox.is_empty());
    assert!(!engine.auto_mode());
    assert!(engine.state(Actuator::Presence).is_on);
    assert!(hw.output(Actuator::Presence));
}

#[test]
fn invalid_config_update_is_ignored() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());
    let mut bad = ControllerConfig::web();
    bad.automation.lux_limit = -1.0;

    engine.handle_command(ControlCommand::UpdateConfig(bad), &mut hw, &mut sink);
    assert_eq!(engine.config(), &ControllerConfig::standalone());

    engine.handle_command(
        ControlCommand::UpdateConfig(ControllerConfig::web()),
        &mut hw,
        &mut sink,
    );
    assert_eq!(engine.config(), &ControllerConfig::web());
}

// ── Actuator faults ───────────────────────────────────────────

#[test]
fn failed_write_keeps_previous_state() {
    let (mut engine, _, mut sink) = make_engine(ControllerConfig::standalone());
    let mut hw = MockBoard::new().occupied();
    hw.sim.temperature_c = 30.0;

    let r = engine.run_cycle(secs(0), &mut hw, &mut sink);
    assert!(r.is_on(Actuator::Fan));

    // Room empties and the fan output breaks before hold-off expires.
    hw.sim.proximity = 0;
    hw.sim.fail_output(Actuator::Fan, ActuatorWriteError::Gpio);
    sink.clear();

    let r = engine.run_cycle(secs(20), &mut hw, &mut sink);
    assert!(r.is_on(Actuator::Fan), "failed write leaves the fan as it was");
    assert!(hw.output(Actuator::Fan));
    assert!(!r.is_on(Actuator::Light));
    assert!(!r.is_on(Actuator::Presence), "other actuators are unaffected");
    assert!(sink.has(|e| matches!(
        e,
        AppEvent::ActuatorWriteFailed { actuator: Actuator::Fan, error: ActuatorWriteError::Gpio }
    )));
    assert!(!sink.has(|e| matches!(e, AppEvent::ActuatorChanged { actuator: Actuator::Fan, .. })));

    hw.sim.repair_output(Actuator::Fan);
    let r = engine.run_cycle(secs(22), &mut hw, &mut sink);
    assert!(!r.is_on(Actuator::Fan));
    assert!(!hw.output(Actuator::Fan));
}

#[test]
fn failed_override_changes_nothing() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());
    hw.sim.fail_output(Actuator::Light, ActuatorWriteError::Unavailable);

    engine.handle_command(
        ControlCommand::Override { actuator: Actuator::Light, on: true },
        &mut hw,
        &mut sink,
    );
    assert!(!engine.state(Actuator::Light).is_on);
    assert!(!sink.has(|e| matches!(e, AppEvent::OverrideApplied { .. })));
}

// ── Bookkeeping ───────────────────────────────────────────────

#[test]
fn every_cycle_reports_status() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());
    assert!(matches!(sink.events[0], AppEvent::Started { auto_mode: true }));
    assert!(engine.last_result().is_none());

    for t in 0..3 {
        engine.run_cycle(secs(t), &mut hw, &mut sink);
    }
    let reports = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::Cycle(_)))
        .count();
    assert_eq!(reports, 3);
    assert_eq!(engine.cycle_count(), 3);
    assert_eq!(engine.last_result().map(|r| r.at), Some(secs(2)));
    assert_eq!(hw.writes_to(Actuator::Fan), 3);
}
