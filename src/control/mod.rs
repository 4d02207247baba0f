//! Decision logic: presence fusion and actuator hold-off timing.
//!
//! Both halves are pure functions of their inputs.  The
//! [`AutomationEngine`](crate::app::engine::AutomationEngine) owns the
//! state they operate on.

pub mod hold_off;
pub mod presence;
