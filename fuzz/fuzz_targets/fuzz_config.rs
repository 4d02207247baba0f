//! Fuzz target: `ControllerConfig::from_json`
//!
//! Any document that loads must pass validation and drive an engine
//! without panicking.
//!
//! cargo fuzz run fuzz_config

#![no_main]

use libfuzzer_sys::fuzz_target;
use roomctl::app::engine::AutomationEngine;
use roomctl::config::ControllerConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(config) = ControllerConfig::from_json(text) else {
        return;
    };
    assert!(config.validate().is_ok());
    let _ = config.automation.hold_off();
    let _ = config.cycle_period();
    assert!(AutomationEngine::new(config).is_ok());
});
