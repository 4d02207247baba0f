//! Command inbox between the request-handling context and the control loop.
//!
//! Uses an `embassy-sync` bounded channel so the HTTP/console side can post
//! commands without holding a reference to the engine.  The control loop
//! drains it at the top of every cycle.
//!
//! ```text
//! ┌──────────────┐ ControlCommand ┌──────────────┐
//! │ HTTP/console │───────────────▶│ Control loop │
//! └──────────────┘                └──────────────┘
//! ```

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use super::commands::ControlCommand;

/// Channel depth: one full page worth of buttons plus slack.
pub const INBOX_DEPTH: usize = 8;

/// Bounded multi-producer command queue.
pub struct Inbox {
    channel: Channel<CriticalSectionRawMutex, ControlCommand, INBOX_DEPTH>,
}

impl Inbox {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Queue a command.  Returns `false` and drops it if the inbox is full.
    pub fn try_post(&self, cmd: ControlCommand) -> bool {
        match self.channel.try_send(cmd) {
            Ok(()) => true,
            Err(_) => {
                warn!("command inbox full, dropping command");
                false
            }
        }
    }

    /// Take the oldest pending command, if any.
    pub fn try_take(&self) -> Option<ControlCommand> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}

impl Default for Inbox {
    fn default() -> Self {
        Self::new()
    }
}
