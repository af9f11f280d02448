//! Core logic: clipboard history and the hotkey state machine.

pub mod history;
pub mod hotkey;
