//! Keyboard combo state machine.
//!
//! Consumes the global key-event stream and drives the clipboard history:
//! - Ctrl+C (on release of C) captures the clipboard into history
//! - Win+Shift (Shift pressed while Win held) cycles through history
//! - releasing Win commits the previewed entry back to the clipboard
//! - Win+Shift+E exits
//!
//! The machine is single-threaded: one worker drains the key-event channel
//! and owns all mutable state here. The preview window is driven through the
//! [`HistoryView`] trait, whose production impl marshals onto the UI thread.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use tracing::debug;

use crate::core::history::ClipboardHistory;

/// Key identity with left/right/generic variants already collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalKey {
    /// Windows / super / command key.
    Meta,
    Control,
    Shift,
    KeyC,
    KeyE,
}

/// A single event from the global keyboard hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Down(LogicalKey),
    Up(LogicalKey),
}

/// What the event loop should do after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// User requested exit (Win+Shift+E); the process should terminate
    /// with status 0.
    Exit,
}

/// Preview surface for history entries. Implementations must be safe to call
/// from the worker thread; any UI-thread marshaling is their responsibility.
pub trait HistoryView: Send {
    fn set_visible(&mut self, visible: bool);
    fn display_text(&mut self, text: &str);
}

pub struct HotkeyStateMachine {
    history: ClipboardHistory,
    view: Box<dyn HistoryView>,
    /// Wait before reading the clipboard after Ctrl+C, so the OS has finished
    /// populating it when we read.
    capture_delay: Duration,
    win_held: bool,
    ctrl_held: bool,
    win_shift_confirmed: bool,
    /// 1-based offset from the newest history entry; 0 = no selection.
    cursor: usize,
}

impl HotkeyStateMachine {
    pub fn new(
        history: ClipboardHistory,
        view: Box<dyn HistoryView>,
        capture_delay: Duration,
    ) -> Self {
        Self {
            history,
            view,
            capture_delay,
            win_held: false,
            ctrl_held: false,
            win_shift_confirmed: false,
            cursor: 0,
        }
    }

    /// Drain the key-event channel until the sender hangs up or the user
    /// requests exit.
    pub fn run(&mut self, events: Receiver<KeyEvent>) -> Flow {
        while let Ok(event) = events.recv() {
            if self.handle_event(event) == Flow::Exit {
                return Flow::Exit;
            }
        }
        Flow::Continue
    }

    pub fn handle_event(&mut self, event: KeyEvent) -> Flow {
        match event {
            KeyEvent::Down(LogicalKey::Meta) => self.win_held = true,
            KeyEvent::Down(LogicalKey::Control) => self.ctrl_held = true,
            KeyEvent::Down(LogicalKey::Shift) => {
                if self.win_held {
                    self.cycle_history();
                }
            }
            KeyEvent::Down(LogicalKey::KeyE) => {
                if self.win_shift_confirmed {
                    debug!("exit command received (Win+Shift+E)");
                    self.view.set_visible(false);
                    return Flow::Exit;
                }
            }
            KeyEvent::Down(LogicalKey::KeyC) => {}

            KeyEvent::Up(LogicalKey::Meta) => {
                if self.win_held {
                    self.commit_selection();
                }
                self.win_held = false;
                self.win_shift_confirmed = false;
                self.cursor = 0;
            }
            KeyEvent::Up(LogicalKey::Control) => self.ctrl_held = false,
            KeyEvent::Up(LogicalKey::Shift) => {
                if self.win_held {
                    self.win_shift_confirmed = true;
                }
            }
            KeyEvent::Up(LogicalKey::KeyC) => {
                if self.ctrl_held {
                    self.capture_after_delay();
                    self.ctrl_held = false;
                }
            }
            KeyEvent::Up(LogicalKey::KeyE) => {}
        }
        Flow::Continue
    }

    /// Advance the cursor through history (newest first, wrapping after the
    /// oldest entry) and preview the selected entry. The `cursor >= n` check
    /// also re-clamps a cursor left dangling by a shrunk history.
    fn cycle_history(&mut self) {
        let size = self.history.len();
        if size == 0 {
            debug!("no clipboard history available");
            return;
        }

        self.view.set_visible(false);

        if self.cursor >= size {
            self.cursor = 1;
        } else {
            self.cursor += 1;
        }

        let content = self.history.item_from_end(self.cursor);
        self.view.display_text(&content);
        self.view.set_visible(true);

        debug!(item = self.cursor, of = size, "showing clipboard history item");
    }

    /// Write the previewed entry (if any) back to the OS clipboard and drop
    /// the selection.
    fn commit_selection(&mut self) {
        self.view.set_visible(false);

        if self.cursor > 0 {
            let content = self.history.item_from_end(self.cursor);
            self.history.write_to_clipboard(&content);
            debug!(item = self.cursor, "set clipboard to history item");
        }

        self.cursor = 0;
    }

    /// Ctrl+C was released: give the source application time to finish
    /// writing the clipboard, then capture. The sleep blocks only the worker
    /// thread that runs this machine.
    fn capture_after_delay(&mut self) {
        if !self.capture_delay.is_zero() {
            std::thread::sleep(self.capture_delay);
        }
        self.history.capture();
    }

    #[cfg(test)]
    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }
}
