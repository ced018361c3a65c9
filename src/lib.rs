//! TUI Pipes (workspace facade crate).
//!
//! This package keeps a stable `tui_pipes::{core,input,term,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.

pub use tui_pipes_core as core;
pub use tui_pipes_input as input;
pub use tui_pipes_term as term;
pub use tui_pipes_types as types;
