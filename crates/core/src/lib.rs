//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Comprehensive unit tests for all game rules
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 connectivity grid with BFS closed-loop detection
//! - [`pieces`]: pipe piece shapes, rotation variants, and the template set
//! - [`placement`]: collision, exact-match and rotation correction checks
//! - [`game`]: complete session state including countdown, scoring, and the
//!   tile-by-tile removal animation
//! - [`rng`]: seedable LCG used for uniform spawn selection
//! - [`snapshot`]: read-only per-frame state for renderers
//!
//! # Game Rules
//!
//! Pieces built from directional pipe tiles hover over the grid. The player
//! moves and rotates the hovering piece and places it before the countdown
//! expires. Tiles that close a loop of mutually connected pipes are removed
//! one at a time, each worth a point. Dropping a piece exactly on top of
//! identical tiles buys their removal at two points per tile. Clearing the
//! whole grid doubles the score.
//!
//! # Example
//!
//! ```
//! use tui_pipes_core::Game;
//!
//! let mut game = Game::new(12345);
//! game.start();
//! game.move_piece(1, 0);
//! game.rotate_piece();
//! game.place_piece();
//! game.update(16);
//! assert!(game.snapshot().running);
//! ```
//!
//! # Timing
//!
//! Call [`Game::update`](game::Game::update) once per frame with a monotonic
//! millisecond timestamp. Calling it twice with the same timestamp advances
//! nothing. The removal animation clears one tile per 150 ms; the countdown
//! is frozen while an animation runs.

pub mod game;
pub mod grid;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod snapshot;

pub use tui_pipes_types as types;

// Re-export commonly used types for convenience
pub use game::{Game, RemovalBatch};
pub use grid::Grid;
pub use pieces::{templates, Piece, PieceTemplate, ShapeGrid};
pub use placement::{clamp_anchor, exact_match, has_collision, resolve_kick};
pub use rng::SimpleRng;
pub use snapshot::{GameSnapshot, PieceSnapshot};
