//! Inbound commands to the automation engine.
//!
//! These represent actions requested by the outside world (HTTP handler,
//! console) that the [`AutomationEngine`](super::engine::AutomationEngine)
//! applies between cycles.  The textual form is the query string used by
//! the status page buttons: `fan=on`, `light=off`, `presence=on`,
//! `auto=off`.

use core::fmt;

use heapless::Vec;

use crate::config::ControllerConfig;
use crate::control::hold_off::Actuator;

/// Commands that external adapters can send into the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlCommand {
    /// Force an actuator on or off.  In auto mode the next automated
    /// decision overwrites it; in manual mode it persists.
    Override { actuator: Actuator, on: bool },

    /// Enable (`true`) or disable (`false`) automated decisions.
    SetAutoMode(bool),

    /// Hot-swap thresholds.  Rejected if validation fails.
    UpdateConfig(ControllerConfig),
}

/// Commands parsed from one query string, one per pair.
pub type Commands = Vec<ControlCommand, 4>;

/// Why a query string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandParseError {
    /// Key is not an actuator name or `auto`.
    UnknownKey,
    /// Value is not `on` / `off`.
    InvalidValue,
    /// A pair had no `=`.
    Malformed,
    /// More pairs than there are keys.
    TooMany,
}

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKey => write!(f, "unknown key"),
            Self::InvalidValue => write!(f, "value must be on or off"),
            Self::Malformed => write!(f, "expected key=value"),
            Self::TooMany => write!(f, "too many commands"),
        }
    }
}

impl core::error::Error for CommandParseError {}

/// Parse `fan=on&auto=off` into commands.
///
/// Accepts a bare query, a `/?`-prefixed path, or a full HTTP request line
/// such as `GET /?light=off HTTP/1.1`.  An empty query yields no commands.
pub fn parse_query(input: &str) -> Result<Commands, CommandParseError> {
    let mut query = input.trim();
    if let Some(rest) = query.strip_prefix("GET ") {
        query = rest.split_whitespace().next().unwrap_or("");
    }
    if let Some((_, q)) = query.split_once('?') {
        query = q;
    } else if query.starts_with('/') {
        return Ok(Commands::new());
    }

    let mut out = Commands::new();
    for pair in query.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or(CommandParseError::Malformed)?;
        let on = match value.to_ascii_lowercase().as_str() {
            "on" | "1" | "true" => true,
            "off" | "0" | "false" => false,
            _ => return Err(CommandParseError::InvalidValue),
        };
        let cmd = match key {
            "auto" => ControlCommand::SetAutoMode(on),
            other => ControlCommand::Override {
                actuator: Actuator::from_name(other).ok_or(CommandParseError::UnknownKey)?,
                on,
            },
        };
        out.push(cmd).map_err(|_| CommandParseError::TooMany)?;
    }
    Ok(out)
}
