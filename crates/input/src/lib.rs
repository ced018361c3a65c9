//! Terminal input module (engine-facing).
//!
//! Intentionally independent of any UI framework: it maps `crossterm` key
//! events into [`tui_pipes_types::GameAction`] intents. Gating intents on
//! game state (e.g. ignoring input during the removal animation) is the
//! caller's job.

pub mod map;

pub use tui_pipes_types as types;

pub use map::{handle_key_event, should_quit};
