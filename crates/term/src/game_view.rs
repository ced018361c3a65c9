//! GameView: maps a `GameSnapshot` into terminal text lines.
//!
//! Pure (no I/O), so it can be unit-tested. Each grid cell renders as one
//! box-drawing glyph; the hovering piece overlays the placed tiles.

use crate::core::GameSnapshot;
use crate::types::{Cell, TileKind, GRID_HEIGHT, GRID_WIDTH};

/// Glyph for a single cell
fn glyph(cell: Cell) -> char {
    match cell {
        None => '·',
        Some(TileKind::Vertical) => '│',
        Some(TileKind::Horizontal) => '─',
        Some(TileKind::UpLeft) => '┘',
        Some(TileKind::UpRight) => '└',
        Some(TileKind::DownLeft) => '┐',
        Some(TileKind::DownRight) => '┌',
    }
}

/// A lightweight text renderer for the pipe-loop game
#[derive(Debug, Default, Clone, Copy)]
pub struct GameView;

impl GameView {
    /// Render the snapshot into terminal lines, one per row
    pub fn render(&self, snap: &GameSnapshot) -> Vec<String> {
        let width = GRID_WIDTH as usize;
        let mut lines = Vec::with_capacity(GRID_HEIGHT as usize + 5);

        lines.push(format!("┏{}┓", "━".repeat(width)));

        for (y, row) in snap.grid.iter().enumerate() {
            let mut line = String::with_capacity(width + 2);
            line.push('┃');
            for (x, &cell) in row.iter().enumerate() {
                let shown = self
                    .piece_cell_at(snap, x as i8, y as i8)
                    .map(Some)
                    .unwrap_or(cell);
                line.push(glyph(shown));
            }
            line.push('┃');
            lines.push(line);
        }

        lines.push(format!("┗{}┛", "━".repeat(width)));
        lines.push(format!(
            "score {:>6}   time {:>2}s",
            snap.score,
            snap.countdown_ms / 1_000
        ));

        if snap.game_over {
            let best = snap.high_scores.first().copied().unwrap_or(snap.score);
            lines.push(format!("game over - best {best} - press r to restart"));
        } else if snap.removal_active {
            lines.push("clearing...".to_string());
        }

        lines
    }

    /// The hovering piece's tile at an absolute grid coordinate, if any
    fn piece_cell_at(&self, snap: &GameSnapshot, x: i8, y: i8) -> Option<TileKind> {
        let piece = snap.piece.as_ref()?;
        piece
            .cells
            .iter()
            .find(|&&(at, _)| at == (x, y))
            .map(|&(_, kind)| kind)
    }
}
