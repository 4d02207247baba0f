//! Room automation controller library.
//!
//! Presence detection from a sensor snapshot, hold-off timers for the
//! presence indicator, light and fan, and the engine that ties them to
//! sensor and actuator ports.  Adapters for real pins, a simulated board
//! and log output live in [`adapters`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod error;
pub mod sensors;
pub mod web;
