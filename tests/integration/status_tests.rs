//! Status reporting: engine → report → page / log sink.

use crate::mock_hw::{MockBoard, make_engine, secs};

use roomctl::adapters::log_sink::LogEventSink;
use roomctl::app::commands::ControlCommand;
use roomctl::app::engine::AutomationEngine;
use roomctl::app::report::{Brightness, SENSOR_UNAVAILABLE, SoundLevel};
use roomctl::config::ControllerConfig;
use roomctl::control::hold_off::{Actuator, ActuatorPhase};
use roomctl::error::SensorError;
use roomctl::sensors::{Sensor, Vector3};
use roomctl::web::render_status_page;

#[test]
fn report_marks_unavailable_readings() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());
    hw.sim.fail(Sensor::Humidity, SensorError::Malformed);
    hw.sim.fail(Sensor::Mic, SensorError::Timeout);

    engine.run_cycle(secs(0), &mut hw, &mut sink);
    let report = engine.status().expect("a cycle has run");

    assert_eq!(report.humidity_text().to_string(), SENSOR_UNAVAILABLE);
    assert_eq!(report.mic_text().to_string(), SENSOR_UNAVAILABLE);
    assert_eq!(report.sound, None);
    assert_eq!(report.brightness, Some(Brightness::Normal));
    assert_eq!(report.unavailable.as_slice(), ["humidity", "mic"]);

    let html = render_status_page(&report, 2);
    assert!(html.contains(&format!("Humidity: <span class='na'>{SENSOR_UNAVAILABLE}</span>")));
    assert!(html.contains("Temperature: <span>21.0\u{00b0}C</span>"));
}

#[test]
fn report_shows_motion_and_delay() {
    let (mut engine, _, mut sink) = make_engine(ControllerConfig::web());
    let mut hw = MockBoard::new();
    hw.sim.gyro = Vector3::new(0.0, -45.0, 0.0);
    hw.sim.lux = 5.0;

    engine.run_cycle(secs(10), &mut hw, &mut sink);
    hw.sim.gyro = Vector3::default();
    engine.run_cycle(secs(12), &mut hw, &mut sink);

    let report = engine.status().expect("a cycle has run");
    assert!(!report.present);
    assert_eq!(report.motion, Some(false));
    assert_eq!(report.sound, Some(SoundLevel::Normal));
    assert_eq!(report.brightness, Some(Brightness::VeryDark));
    let light = report.actuator(Actuator::Light);
    assert!(light.on);
    assert_eq!(light.phase, ActuatorPhase::OnHolding);

    let html = render_status_page(&report, 2);
    assert!(html.contains("Light: <span class='on'>ON (DELAY ACTIVE)</span>"));
    assert!(html.contains("Motion Detection: <span class='off'>NO</span>"));
}

#[test]
fn failed_motion_sensors_show_marker() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::web());
    hw.sim.fail(Sensor::Accel, SensorError::Bus);
    hw.sim.fail(Sensor::Gyro, SensorError::Bus);

    engine.run_cycle(secs(0), &mut hw, &mut sink);
    let report = engine.status().expect("a cycle has run");
    assert_eq!(report.motion, None);
    assert_eq!(report.unavailable.as_slice(), ["accel", "gyro"]);

    let html = render_status_page(&report, 2);
    assert!(html.contains(&format!(
        "Motion Detection: <span class='na'>{SENSOR_UNAVAILABLE}</span>"
    )));
    assert!(report.to_json().contains("\"motion\":null"));
}

#[test]
fn status_follows_overrides_between_cycles() {
    let (mut engine, mut hw, mut sink) = make_engine(ControllerConfig::standalone());
    assert!(engine.status().is_none());

    engine.run_cycle(secs(0), &mut hw, &mut sink);
    engine.handle_command(ControlCommand::SetAutoMode(false), &mut hw, &mut sink);
    engine.handle_command(
        ControlCommand::Override { actuator: Actuator::Fan, on: true },
        &mut hw,
        &mut sink,
    );

    let report = engine.status().expect("a cycle has run");
    assert!(!report.auto_mode);
    assert!(report.actuator(Actuator::Fan).on);
    let json = report.to_json();
    assert!(json.contains("\"auto_mode\":false"));
}

#[test]
fn log_sink_counts_cycles() {
    let mut engine = AutomationEngine::new(ControllerConfig::standalone()).unwrap();
    let mut hw = MockBoard::new().occupied();
    let mut sink = LogEventSink::new();

    engine.start(&mut sink);
    for t in 0..4 {
        engine.run_cycle(secs(t * 2), &mut hw, &mut sink);
    }
    assert_eq!(sink.cycles(), 4);
}
