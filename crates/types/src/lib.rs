//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Grid dimensions (columns x rows)
pub const GRID_WIDTH: u8 = 10;
pub const GRID_HEIGHT: u8 = 20;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
/// Full countdown duration for each hovering piece
pub const COUNTDOWN_MS: u32 = 10_000;
/// Interval between tiles cleared during a removal animation
pub const REMOVAL_STEP_MS: u64 = 150;

/// Maximum entries kept in the high-score list
pub const HIGH_SCORE_CAP: usize = 10;

/// Score awarded per tile when a closed loop is removed
pub const LOOP_REWARD_DELTA: i32 = 1;
/// Score charged per tile for a paid exact-match removal
pub const PAID_REMOVAL_DELTA: i32 = -2;
/// Cost per tile the player must be able to afford before a paid removal
pub const PAID_REMOVAL_COST_PER_TILE: i32 = 2;

/// Upper bound on tiles in any authored piece shape
pub const MAX_PIECE_TILES: usize = 8;

/// One of the four compass directions a pipe tile can connect through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in the neighbor-probe order used by loop detection
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction a neighboring tile must expose to connect back
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Coordinate delta of one step in this direction (x grows right, y grows down)
    pub fn offset(self) -> (i8, i8) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Rotate this direction 90 degrees clockwise
    pub fn rotated_cw(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// Pipe tile kinds, named by the pair of ports each one connects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Up-Down
    Vertical,
    /// Left-Right
    Horizontal,
    /// Up-Left corner
    UpLeft,
    /// Up-Right corner
    UpRight,
    /// Down-Left corner
    DownLeft,
    /// Down-Right corner
    DownRight,
}

impl TileKind {
    pub const ALL: [TileKind; 6] = [
        TileKind::Vertical,
        TileKind::Horizontal,
        TileKind::UpLeft,
        TileKind::UpRight,
        TileKind::DownLeft,
        TileKind::DownRight,
    ];

    /// Fixed port lookup: the two directions this kind connects through
    pub fn ports(self) -> [Direction; 2] {
        match self {
            TileKind::Vertical => [Direction::Up, Direction::Down],
            TileKind::Horizontal => [Direction::Left, Direction::Right],
            TileKind::UpLeft => [Direction::Up, Direction::Left],
            TileKind::UpRight => [Direction::Up, Direction::Right],
            TileKind::DownLeft => [Direction::Down, Direction::Left],
            TileKind::DownRight => [Direction::Down, Direction::Right],
        }
    }

    /// Whether this kind exposes a port in the given direction
    pub fn has_port(self, dir: Direction) -> bool {
        let [a, b] = self.ports();
        a == dir || b == dir
    }

    /// The kind this tile becomes after a 90 degree clockwise turn
    /// (both ports rotate with the tile)
    pub fn rotated_cw(self) -> Self {
        match self {
            TileKind::Vertical => TileKind::Horizontal,
            TileKind::Horizontal => TileKind::Vertical,
            TileKind::UpLeft => TileKind::UpRight,
            TileKind::UpRight => TileKind::DownRight,
            TileKind::DownRight => TileKind::DownLeft,
            TileKind::DownLeft => TileKind::UpLeft,
        }
    }
}

/// Cell on the grid (None = empty, Some = a pipe tile)
pub type Cell = Option<TileKind>;

/// Player intents plus session control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Rotate,
    Place,
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_are_symmetric() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_offsets_cancel_with_opposite() {
        for dir in Direction::ALL {
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn test_every_kind_has_two_distinct_ports() {
        for kind in TileKind::ALL {
            let [a, b] = kind.ports();
            assert_ne!(a, b);
            assert!(kind.has_port(a));
            assert!(kind.has_port(b));
        }
    }

    #[test]
    fn test_rotated_cw_rotates_ports() {
        for kind in TileKind::ALL {
            let rotated = kind.rotated_cw();
            for port in kind.ports() {
                assert!(rotated.has_port(port.rotated_cw()));
            }
        }
    }

    #[test]
    fn test_four_cw_turns_are_identity() {
        for kind in TileKind::ALL {
            let back = kind.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, kind);
        }
    }
}
