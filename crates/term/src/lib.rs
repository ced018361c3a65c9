//! Terminal front end: turns core snapshots into text and flushes them to a
//! real terminal.
//!
//! [`game_view`] is pure (no I/O) and unit-testable; [`renderer`] owns the
//! terminal session (raw mode, alternate screen) and draws full frames.

pub mod game_view;
pub mod renderer;

pub use tui_pipes_core as core;
pub use tui_pipes_types as types;

pub use game_view::GameView;
pub use renderer::TerminalRenderer;
