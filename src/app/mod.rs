//! Application core — decision logic orchestration, zero I/O.
//!
//! The [`engine::AutomationEngine`] ties the sensor reader, presence
//! detector and hold-off timers together.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod commands;
pub mod engine;
pub mod events;
pub mod inbox;
pub mod ports;
pub mod report;
