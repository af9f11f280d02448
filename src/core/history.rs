//! Bounded clipboard history.
//!
//! Stores captured text snippets in capture order (oldest first) and owns all
//! reads/writes of the OS clipboard. Clipboard access is best-effort: another
//! process can hold or clobber the clipboard at any time, so every failure is
//! logged and treated as a no-op.

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::utils::clipboard::ClipboardAccess;

/// Maximum number of snippets kept by default.
pub const DEFAULT_CAPACITY: usize = 100;

/// Bounded history of captured clipboard snippets.
///
/// Entries are appended by [`capture`](Self::capture) and evicted oldest-first
/// once the capacity is exceeded. Consecutive duplicates are suppressed
/// (checked against the newest entry only).
pub struct ClipboardHistory {
    entries: VecDeque<String>,
    capacity: usize,
    clipboard: Box<dyn ClipboardAccess>,
}

impl ClipboardHistory {
    pub fn new(clipboard: Box<dyn ClipboardAccess>) -> Self {
        Self::with_capacity(clipboard, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(clipboard: Box<dyn ClipboardAccess>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            clipboard,
        }
    }

    /// Capture the current OS clipboard text into history.
    ///
    /// No-op when the clipboard holds no text, when the trimmed text is empty,
    /// or when it equals the newest entry.
    pub fn capture(&mut self) {
        let Some(raw) = self.clipboard.read_text() else {
            debug!("clipboard does not contain text data");
            return;
        };

        let content = raw.trim();
        if content.is_empty() {
            debug!("skipped empty clipboard content");
            return;
        }

        if self.entries.back().map(String::as_str) == Some(content) {
            debug!("skipped duplicate clipboard content");
            return;
        }

        self.entries.push_back(content.to_string());
        if self.entries.len() > self.capacity {
            self.entries.pop_front();
            debug!(capacity = self.capacity, "trimmed clipboard history");
        }
        debug!(chars = content.len(), "captured clipboard content");
    }

    /// Fetch an entry by 1-based offset from the newest entry.
    ///
    /// Returns an empty string for offset 0, offsets past the oldest entry, or
    /// an empty history ("no selection" rather than an error).
    pub fn item_from_end(&self, offset: usize) -> String {
        let size = self.entries.len();
        if size == 0 || offset == 0 || offset > size {
            return String::new();
        }
        self.entries[size - offset].clone()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the OS clipboard contents. Empty text is a no-op; clipboard
    /// failures are logged, never propagated.
    pub fn write_to_clipboard(&mut self, text: &str) {
        if text.is_empty() {
            debug!("skipping empty clipboard set operation");
            return;
        }

        match self.clipboard.write_text(text) {
            Ok(()) => debug!(chars = text.len(), "set system clipboard"),
            Err(err) => warn!("failed to set system clipboard: {err:#}"),
        }
    }

    /// Drop all stored entries. The OS clipboard is untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
        debug!("clipboard history cleared");
    }

    /// Best-effort wipe of the OS clipboard, done once at startup so stale
    /// content from a previous session is not mistaken for a fresh copy.
    pub fn clear_system_clipboard(&mut self) {
        if let Err(err) = self.clipboard.write_text("") {
            debug!("could not clear system clipboard: {err:#}");
        }
    }
}
