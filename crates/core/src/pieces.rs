//! Pieces module - pipe piece shapes and rotation
//!
//! A piece is a table of rotation variants, each an independent `[x][y]`
//! column grid of cells with its own width and height, plus a current
//! rotation index and an (x, y) anchor on the grid.
//!
//! Rotation has two behaviors, depending on how a piece was authored:
//! - more than one variant: advance the rotation index, cycling through the
//!   pre-authored variants;
//! - exactly one variant: rotate that shape matrix 90 degrees clockwise in
//!   place (dimensions swap) and remap every tile kind so its ports turn
//!   with the piece. The rotation index stays 0.
//!
//! A piece never mixes the two behaviors.

use std::sync::OnceLock;

use arrayvec::ArrayVec;
use tui_pipes_types::{Cell, TileKind, MAX_PIECE_TILES};

/// One rotation variant: columns of cells, indexed `[x][y]`
pub type ShapeGrid = Vec<Vec<Cell>>;

/// An authored piece: its full rotation-variant table
#[derive(Debug, Clone)]
pub struct PieceTemplate {
    pub variants: Vec<ShapeGrid>,
}

/// Footprint of a piece: absolute grid coordinates of its non-empty cells
pub type Footprint = ArrayVec<((i8, i8), TileKind), MAX_PIECE_TILES>;

/// The active hovering piece
#[derive(Debug, Clone)]
pub struct Piece {
    variants: Vec<ShapeGrid>,
    rotation: usize,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece from a variant table with the given starting rotation
    /// and anchor position
    pub fn new(variants: Vec<ShapeGrid>, rotation: usize, x: i8, y: i8) -> Self {
        debug_assert!(!variants.is_empty());
        debug_assert!(rotation < variants.len());
        Self {
            variants,
            rotation,
            x,
            y,
        }
    }

    /// The active rotation variant
    pub fn shape(&self) -> &ShapeGrid {
        &self.variants[self.rotation]
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    /// Width and height of the variant at `index` (columns, rows)
    pub fn variant_dims(&self, index: usize) -> (usize, usize) {
        let shape = &self.variants[index];
        (shape.len(), shape.first().map_or(0, Vec::len))
    }

    /// Translate the anchor unconditionally; bounds are the caller's problem
    pub fn move_by(&mut self, dx: i8, dy: i8) {
        self.x += dx;
        self.y += dy;
    }

    /// Rotate the piece: cycle to the next authored variant, or, for a
    /// single-variant piece, self-rotate its sole shape geometrically
    pub fn rotate(&mut self) {
        if self.variants.len() > 1 {
            self.rotation = (self.rotation + 1) % self.variants.len();
        } else {
            self.variants[0] = rotate_shape_cw(&self.variants[0]);
        }
    }

    /// Absolute grid coordinates and kinds of the non-empty cells of the
    /// active variant
    pub fn footprint(&self) -> Footprint {
        let mut cells = Footprint::new();
        for (cx, column) in self.shape().iter().enumerate() {
            for (cy, cell) in column.iter().enumerate() {
                if let Some(kind) = cell {
                    cells.push(((self.x + cx as i8, self.y + cy as i8), *kind));
                }
            }
        }
        cells
    }
}

/// Rotate a shape matrix 90 degrees clockwise. The new shape's width is the
/// old height and vice versa, and each tile kind is remapped so its ports
/// rotate with the matrix.
pub fn rotate_shape_cw(shape: &ShapeGrid) -> ShapeGrid {
    let w = shape.len();
    let h = shape.first().map_or(0, Vec::len);
    let mut rotated: ShapeGrid = vec![vec![None; w]; h];
    for (x, column) in shape.iter().enumerate() {
        for (y, cell) in column.iter().enumerate() {
            rotated[h - 1 - y][x] = cell.map(TileKind::rotated_cw);
        }
    }
    rotated
}

/// Parse an authored shape from pictographic rows. Rows read top to bottom;
/// any character without a tile glyph is an empty cell.
fn shape(rows: &[&str]) -> ShapeGrid {
    let height = rows.len();
    let width = rows
        .iter()
        .map(|row| row.chars().count())
        .max()
        .unwrap_or(0);
    let mut columns: ShapeGrid = vec![vec![None; height]; width];
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            columns[x][y] = tile_from_glyph(ch);
        }
    }
    columns
}

fn tile_from_glyph(ch: char) -> Cell {
    match ch {
        '│' => Some(TileKind::Vertical),
        '─' => Some(TileKind::Horizontal),
        '┘' => Some(TileKind::UpLeft),
        '└' => Some(TileKind::UpRight),
        '┐' => Some(TileKind::DownLeft),
        '┌' => Some(TileKind::DownRight),
        _ => None,
    }
}

static TEMPLATES: OnceLock<Vec<PieceTemplate>> = OnceLock::new();

/// The authored piece set. Spawn picks uniformly among these, then uniformly
/// among each template's variants.
pub fn templates() -> &'static [PieceTemplate] {
    TEMPLATES.get_or_init(build_templates)
}

fn build_templates() -> Vec<PieceTemplate> {
    vec![
        // Single straight tile; self-rotating.
        PieceTemplate {
            variants: vec![shape(&["─"])],
        },
        // Single corner tile; self-rotating.
        PieceTemplate {
            variants: vec![shape(&["┌"])],
        },
        // Straight pair.
        PieceTemplate {
            variants: vec![shape(&["──"]), shape(&["│", "│"])],
        },
        // Corner pair (half ring).
        PieceTemplate {
            variants: vec![
                shape(&["┌┐"]),
                shape(&["┐", "┘"]),
                shape(&["└┘"]),
                shape(&["┌", "└"]),
            ],
        },
        // Elbow triple.
        PieceTemplate {
            variants: vec![
                shape(&["┌─", "│·"]),
                shape(&["─┐", "·│"]),
                shape(&["·│", "─┘"]),
                shape(&["│·", "└─"]),
            ],
        },
        // Straight triple.
        PieceTemplate {
            variants: vec![shape(&["───"]), shape(&["│", "│", "│"])],
        },
        // Closed 2x2 ring; self-rotating (onto itself).
        PieceTemplate {
            variants: vec![shape(&["┌┐", "└┘"])],
        },
    ]
}
