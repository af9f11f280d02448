//! System clipboard access.
//!
//! Uses the arboard crate behind a small trait so core logic can run against a
//! fake in tests. Clipboard errors here surface as `None`/`Err` and are dealt
//! with by the caller; nothing in this module panics or exits.

use anyhow::{Context, Result};
use arboard::Clipboard;
use tracing::debug;

/// Read/write access to the OS clipboard, text flavor only.
pub trait ClipboardAccess: Send {
    /// Current clipboard text, or `None` when the clipboard holds no text or
    /// is transiently unavailable.
    fn read_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// Production clipboard backed by arboard.
pub struct SystemClipboard;

impl ClipboardAccess for SystemClipboard {
    fn read_text(&mut self) -> Option<String> {
        // arboard requires a new Clipboard instance for each operation
        match Clipboard::new() {
            Ok(mut clipboard) => match clipboard.get_text() {
                Ok(text) => Some(text),
                Err(err) => {
                    debug!("clipboard read returned no text: {err}");
                    None
                }
            },
            Err(err) => {
                debug!("failed to initialize clipboard: {err}");
                None
            }
        }
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("failed to initialize clipboard")?;
        clipboard
            .set_text(text)
            .context("failed to set clipboard text")
    }
}
