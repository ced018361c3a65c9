//! Grid module - manages the connectivity grid
//!
//! The grid is a 10x20 board where each cell is empty or holds one directional
//! pipe tile. Uses a flat array for better cache locality.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom).
//!
//! Two adjacent tiles are connected when the tile nearer in direction `d`
//! exposes a port toward `d` and its neighbor exposes the opposite port.
//! [`Grid::detect_loop`] searches for a closed cycle of such connections
//! through a just-placed tile.

use std::collections::VecDeque;

use tui_pipes_types::{Cell, Direction, GRID_HEIGHT, GRID_WIDTH};

/// Total number of cells on the grid
const GRID_SIZE: usize = (GRID_WIDTH as usize) * (GRID_HEIGHT as usize);

/// The game grid - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (GRID_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8
    }

    /// Fill every cell with empty
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// True iff every cell is empty. Checked after a removal batch completes
    /// to trigger the score-doubling bonus.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Whether the tile at (ax, ay) connects one step in `dir` to a mutually
    /// ported neighbor
    fn connects(&self, ax: i8, ay: i8, dir: Direction) -> bool {
        let Some(Some(kind)) = self.get(ax, ay) else {
            return false;
        };
        if !kind.has_port(dir) {
            return false;
        }
        let (dx, dy) = dir.offset();
        matches!(
            self.get(ax + dx, ay + dy),
            Some(Some(neighbor)) if neighbor.has_port(dir.opposite())
        )
    }

    /// Detect whether the just-placed tile at (x, y) participates in a closed
    /// loop of mutually connected tiles.
    ///
    /// Returns the coordinates forming the first cycle found, starting with
    /// (x, y) itself, or `None` if the tile is empty or closes no loop. The
    /// result identifies every tile to remove but callers must deduplicate
    /// before acting on it.
    ///
    /// For each connected neighbor (probed in Up, Down, Left, Right order) a
    /// breadth-first search runs from that neighbor looking for a path back to
    /// the start; the entry edge start->neighbor is consumed and cannot be
    /// walked straight back. Cost is bounded by the grid size per neighbor.
    pub fn detect_loop(&self, x: i8, y: i8) -> Option<Vec<(i8, i8)>> {
        let Some(Some(kind)) = self.get(x, y) else {
            return None;
        };

        for dir in Direction::ALL {
            if !kind.has_port(dir) {
                continue;
            }
            let (dx, dy) = dir.offset();
            let (nx, ny) = (x + dx, y + dy);
            if !self.connects(x, y, dir) {
                continue;
            }
            if let Some(path) = self.search_back_to_start((x, y), (nx, ny)) {
                return Some(path);
            }
        }

        None
    }

    /// BFS from `first` looking for any connected path that returns to
    /// `start`, with the edge first->start banned as the opening step.
    /// Tracks a visited set and a predecessor per visited cell so the cycle
    /// can be reconstructed once `start` is reached again.
    fn search_back_to_start(
        &self,
        start: (i8, i8),
        first: (i8, i8),
    ) -> Option<Vec<(i8, i8)>> {
        let mut visited = [false; GRID_SIZE];
        let mut pred: [Option<(i8, i8)>; GRID_SIZE] = [None; GRID_SIZE];
        let mut queue: VecDeque<(i8, i8)> = VecDeque::with_capacity(GRID_SIZE);

        let first_idx = Self::index(first.0, first.1)?;
        visited[first_idx] = true;
        queue.push_back(first);

        while let Some((cx, cy)) = queue.pop_front() {
            let Some(Some(kind)) = self.get(cx, cy) else {
                continue;
            };

            for dir in Direction::ALL {
                if !kind.has_port(dir) || !self.connects(cx, cy, dir) {
                    continue;
                }
                let (dx, dy) = dir.offset();
                let next = (cx + dx, cy + dy);

                // The entry edge was consumed reaching `first`.
                if (cx, cy) == first && next == start {
                    continue;
                }

                if next == start {
                    // Loop closed: walk predecessors from the closing cell
                    // back to `first`.
                    let mut path = vec![start];
                    let mut cur = (cx, cy);
                    loop {
                        path.push(cur);
                        if cur == first {
                            break;
                        }
                        let idx = Self::index(cur.0, cur.1)?;
                        cur = pred[idx]?;
                    }
                    return Some(path);
                }

                let next_idx = Self::index(next.0, next.1)?;
                if !visited[next_idx] {
                    visited[next_idx] = true;
                    pred[next_idx] = Some((cx, cy));
                    queue.push_back(next);
                }
            }
        }

        None
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_pipes_types::TileKind;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut grid = Grid::new();

        assert!(grid.set(0, 0, Some(TileKind::Vertical)));
        assert!(grid.set(5, 10, Some(TileKind::DownRight)));

        assert_eq!(grid.get(0, 0), Some(Some(TileKind::Vertical)));
        assert_eq!(grid.get(5, 10), Some(Some(TileKind::DownRight)));
        assert_eq!(grid.get(1, 0), Some(None));

        assert!(!grid.set(-1, 0, Some(TileKind::Vertical)));
        assert_eq!(grid.get(10, 0), None);
    }

    #[test]
    fn test_reset_and_is_empty() {
        let mut grid = Grid::new();
        assert!(grid.is_empty());

        grid.set(3, 3, Some(TileKind::Horizontal));
        assert!(!grid.is_empty());

        grid.reset();
        assert!(grid.is_empty());
    }

    /// Minimal 2x2 ring: every corner mutually connected to both neighbors.
    fn ring_2x2(grid: &mut Grid, x: i8, y: i8) {
        grid.set(x, y, Some(TileKind::DownRight));
        grid.set(x + 1, y, Some(TileKind::DownLeft));
        grid.set(x, y + 1, Some(TileKind::UpRight));
        grid.set(x + 1, y + 1, Some(TileKind::UpLeft));
    }

    #[test]
    fn test_detect_loop_on_2x2_ring() {
        let mut grid = Grid::new();
        ring_2x2(&mut grid, 0, 0);

        for &(x, y) in &[(0, 0), (1, 0), (0, 1), (1, 1)] {
            let path = grid.detect_loop(x, y).expect("ring must close a loop");
            let mut cells = path.clone();
            cells.sort_unstable();
            cells.dedup();
            assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
            assert_eq!(path[0], (x, y));
        }
    }

    #[test]
    fn test_detect_loop_none_on_open_path() {
        let mut grid = Grid::new();
        // Three corners of a ring, one gap: no cycle.
        grid.set(0, 0, Some(TileKind::DownRight));
        grid.set(1, 0, Some(TileKind::DownLeft));
        grid.set(0, 1, Some(TileKind::UpRight));

        assert_eq!(grid.detect_loop(0, 0), None);
        assert_eq!(grid.detect_loop(1, 0), None);
    }

    #[test]
    fn test_detect_loop_none_on_empty_cell() {
        let grid = Grid::new();
        assert_eq!(grid.detect_loop(4, 4), None);
    }

    #[test]
    fn test_detect_loop_ignores_touching_but_unported_tiles() {
        let mut grid = Grid::new();
        // Two horizontals stacked: adjacent but no vertical ports.
        grid.set(2, 2, Some(TileKind::Horizontal));
        grid.set(2, 3, Some(TileKind::Horizontal));
        assert_eq!(grid.detect_loop(2, 2), None);
    }

    #[test]
    fn test_detect_loop_larger_rectangle() {
        let mut grid = Grid::new();
        // 3x2 ring with straight runs on the long sides.
        grid.set(0, 0, Some(TileKind::DownRight));
        grid.set(1, 0, Some(TileKind::Horizontal));
        grid.set(2, 0, Some(TileKind::DownLeft));
        grid.set(0, 1, Some(TileKind::UpRight));
        grid.set(1, 1, Some(TileKind::Horizontal));
        grid.set(2, 1, Some(TileKind::UpLeft));

        let path = grid.detect_loop(1, 0).expect("rectangle closes a loop");
        let mut cells = path.clone();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), 6);
    }

    #[test]
    fn test_detect_loop_ring_away_from_origin() {
        let mut grid = Grid::new();
        ring_2x2(&mut grid, 7, 17);

        let path = grid.detect_loop(8, 18).expect("ring must close a loop");
        assert_eq!(path[0], (8, 18));
    }

    #[test]
    fn test_detect_loop_with_dead_end_branch() {
        let mut grid = Grid::new();
        ring_2x2(&mut grid, 3, 3);
        // Branch hanging off the ring's search region; must not break detection.
        grid.set(5, 3, Some(TileKind::Horizontal));

        let path = grid.detect_loop(3, 3).expect("ring still closes");
        let mut cells = path.clone();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), 4);
        assert!(!cells.contains(&(5, 3)));
    }
}
