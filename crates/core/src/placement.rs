//! Placement module - collision, exact-match and rotation correction
//!
//! Pure geometry checks between a hovering [`Piece`] and the [`Grid`].
//! Rotation correction runs in two steps: clamp the occupied bounding box
//! back inside the grid, then search small offsets ("kicks") around the
//! clamped anchor. The kick search checks boundary containment only; a
//! rotated piece may hover over occupied cells, and only final placement
//! enforces collision.

use crate::grid::Grid;
use crate::pieces::{Piece, ShapeGrid};

/// Kick offsets in priority order, tried on each axis independently
/// (X outer loop, Y inner loop; first feasible pair wins)
const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// True if any non-empty footprint cell lies outside grid bounds or overlaps
/// a non-empty grid cell
pub fn has_collision(piece: &Piece, grid: &Grid) -> bool {
    piece.footprint().iter().any(|&((x, y), _)| {
        !matches!(grid.get(x, y), Some(None))
    })
}

/// Exact-match check: `Some(tile_count)` iff every non-empty footprint cell
/// is in bounds and the grid already holds exactly the piece's tile kind
/// there. A piece with no tiles never matches.
pub fn exact_match(piece: &Piece, grid: &Grid) -> Option<usize> {
    let footprint = piece.footprint();
    if footprint.is_empty() {
        return None;
    }
    for &((x, y), kind) in &footprint {
        if grid.get(x, y) != Some(Some(kind)) {
            return None;
        }
    }
    Some(footprint.len())
}

/// Bounding box of a shape's non-empty cells, relative to the shape origin:
/// (min_x, min_y, max_x, max_y). `None` for a shape with no tiles.
fn occupied_bounds(shape: &ShapeGrid) -> Option<(i8, i8, i8, i8)> {
    let mut bounds: Option<(i8, i8, i8, i8)> = None;
    for (x, column) in shape.iter().enumerate() {
        for (y, cell) in column.iter().enumerate() {
            if cell.is_none() {
                continue;
            }
            let (x, y) = (x as i8, y as i8);
            bounds = Some(match bounds {
                None => (x, y, x, y),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
            });
        }
    }
    bounds
}

/// Whether the occupied bounding box of `piece`'s active shape, anchored at
/// (x, y), lies fully inside the grid
fn bounds_fit(piece: &Piece, grid: &Grid, x: i8, y: i8) -> bool {
    match occupied_bounds(piece.shape()) {
        Some((min_x, min_y, max_x, max_y)) => {
            x + min_x >= 0
                && y + min_y >= 0
                && x + max_x < grid.width() as i8
                && y + max_y < grid.height() as i8
        }
        None => false,
    }
}

/// Clamp the anchor after a rotation so the occupied bounding box stays
/// inside the grid. Returns false (rotation must be reverted) if the rotated
/// shape has no occupied cells, which signals a malformed variant table.
pub fn clamp_anchor(piece: &mut Piece, grid: &Grid) -> bool {
    let Some((min_x, min_y, max_x, max_y)) = occupied_bounds(piece.shape()) else {
        return false;
    };
    piece.x = piece.x.clamp(-min_x, grid.width() as i8 - 1 - max_x);
    piece.y = piece.y.clamp(-min_y, grid.height() as i8 - 1 - max_y);
    true
}

/// Search kick offsets around the clamped anchor and accept the first pair
/// that keeps the occupied bounding box inside the grid. Returns false if no
/// offset fits (the caller reverts the rotation).
pub fn resolve_kick(piece: &mut Piece, grid: &Grid) -> bool {
    for dx in KICK_OFFSETS {
        for dy in KICK_OFFSETS {
            if bounds_fit(piece, grid, piece.x + dx, piece.y + dy) {
                piece.x += dx;
                piece.y += dy;
                return true;
            }
        }
    }
    false
}
