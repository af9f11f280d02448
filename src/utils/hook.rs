//! Global keyboard hook.
//!
//! Wraps rdev's blocking listener in a dedicated thread and reduces its event
//! stream to the few logical keys the state machine tracks. Everything else
//! is dropped here so the channel only ever carries relevant events.

use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use rdev::{Event, EventType, Key};
use thiserror::Error;
use tracing::error;

use crate::core::hotkey::{KeyEvent, LogicalKey};

/// Exit status used when the OS hook cannot be registered. The utility is
/// useless without the global key feed, so this is fatal.
pub const HOOK_FAILURE_EXIT_CODE: i32 = 2;

#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to register global keyboard hook: {0:?}")]
    Registration(rdev::ListenError),
}

/// Collapse left/right/generic key variants into the logical identity the
/// state machine tracks. Untracked keys map to `None`.
pub fn map_key(key: Key) -> Option<LogicalKey> {
    match key {
        Key::MetaLeft | Key::MetaRight => Some(LogicalKey::Meta),
        Key::ControlLeft | Key::ControlRight => Some(LogicalKey::Control),
        Key::ShiftLeft | Key::ShiftRight => Some(LogicalKey::Shift),
        Key::KeyC => Some(LogicalKey::KeyC),
        Key::KeyE => Some(LogicalKey::KeyE),
        _ => None,
    }
}

fn map_event(event: &Event) -> Option<KeyEvent> {
    match event.event_type {
        EventType::KeyPress(key) => map_key(key).map(KeyEvent::Down),
        EventType::KeyRelease(key) => map_key(key).map(KeyEvent::Up),
        _ => None,
    }
}

/// Start the OS keyboard hook on its own thread, forwarding tracked key
/// events into `events`.
///
/// rdev only reports registration failure from inside the blocking listener,
/// so the fatal-exit policy lives here: if the hook cannot be registered the
/// whole process exits with [`HOOK_FAILURE_EXIT_CODE`].
pub fn spawn_listener(events: Sender<KeyEvent>) -> JoinHandle<()> {
    thread::spawn(move || {
        let result = rdev::listen(move |event: Event| {
            if let Some(key_event) = map_event(&event) {
                // The receiver disappears during shutdown; nothing to do then.
                let _ = events.send(key_event);
            }
        });

        if let Err(listen_error) = result {
            let err = HookError::Registration(listen_error);
            error!("{err}; the application requires global keyboard access");
            std::process::exit(HOOK_FAILURE_EXIT_CODE);
        }
    })
}
