//! Read-only per-frame state snapshot for renderers and other observers.
//! Observers never mutate core state; they consume a copy.

use tui_pipes_types::{Cell, TileKind, COUNTDOWN_MS, GRID_HEIGHT, GRID_WIDTH};

/// The hovering piece as a renderer sees it: anchor, rotation index, and the
/// absolute grid coordinates of its tiles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceSnapshot {
    pub x: i8,
    pub y: i8,
    pub rotation: usize,
    pub cells: Vec<((i8, i8), TileKind)>,
}

/// Complete session snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Grid contents, indexed `[row][column]`
    pub grid: [[Cell; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
    /// The hovering piece, absent while a removal batch animates or after
    /// game over
    pub piece: Option<PieceSnapshot>,
    pub score: i32,
    pub high_scores: Vec<i32>,
    pub running: bool,
    pub game_over: bool,
    pub countdown_ms: u32,
    pub countdown_duration_ms: u32,
    pub removal_active: bool,
}

impl GameSnapshot {
    /// Countdown remaining as a 0..=1 fraction, for timer bars
    pub fn countdown_fraction(&self) -> f32 {
        if self.countdown_duration_ms == 0 {
            return 0.0;
        }
        self.countdown_ms as f32 / self.countdown_duration_ms as f32
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[None; GRID_WIDTH as usize]; GRID_HEIGHT as usize],
            piece: None,
            score: 0,
            high_scores: Vec::new(),
            running: false,
            game_over: false,
            countdown_ms: COUNTDOWN_MS,
            countdown_duration_ms: COUNTDOWN_MS,
            removal_active: false,
        }
    }
}
