//! Utility modules for clipboard access and the global keyboard hook.

pub mod clipboard;
pub mod hook;
