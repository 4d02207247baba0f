//! Fuzz target: `parse_query` (status page / console commands)
//!
//! Invariants checked:
//! - No panics under any input
//! - Never more commands than the fixed capacity
//! - Every accepted command round-trips through the inbox
//!
//! cargo fuzz run fuzz_query

#![no_main]

use libfuzzer_sys::fuzz_target;
use roomctl::app::commands::parse_query;
use roomctl::app::inbox::{INBOX_DEPTH, Inbox};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(cmds) = parse_query(text) else {
        return;
    };
    assert!(cmds.len() <= 4);

    let inbox = Inbox::new();
    for cmd in cmds.iter().cloned() {
        assert!(inbox.try_post(cmd));
    }
    assert!(inbox.len() <= INBOX_DEPTH);
    for cmd in &cmds {
        assert_eq!(inbox.try_take().as_ref(), Some(cmd));
    }
    assert!(inbox.is_empty());
});
