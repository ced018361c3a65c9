//! Game module - the complete session state machine
//!
//! Ties together grid, pieces, placement checks, and scoring. The session
//! runs frame-driven: an external driver calls [`Game::update`] once per
//! frame with a monotonic millisecond timestamp, which advances the piece
//! countdown and the tile-by-tile removal animation. Player intents
//! (`move_piece`, `rotate_piece`, `place_piece`) are synchronous and are
//! silently rejected when infeasible; they never corrupt state.
//!
//! Exactly one hovering piece and one removal batch can exist at a time.
//! While a batch animates, the countdown is frozen and no piece spawns; the
//! next spawn happens when the batch finishes.

use tui_pipes_types::{
    COUNTDOWN_MS, GRID_HEIGHT, GRID_WIDTH, HIGH_SCORE_CAP, LOOP_REWARD_DELTA,
    PAID_REMOVAL_COST_PER_TILE, PAID_REMOVAL_DELTA, REMOVAL_STEP_MS,
};

use crate::grid::Grid;
use crate::pieces::{templates, Piece};
use crate::placement::{clamp_anchor, exact_match, has_collision, resolve_kick};
use crate::rng::SimpleRng;
use crate::snapshot::{GameSnapshot, PieceSnapshot};

/// A scheduled, animated, sequential clearing of grid cells
#[derive(Debug, Clone)]
pub struct RemovalBatch {
    /// Cells to clear, in animation order
    cells: Vec<(i8, i8)>,
    /// Score applied per cleared tile (positive loop reward or negative
    /// paid-removal charge)
    delta: i32,
    /// Next cell to clear
    cursor: usize,
    /// Timestamp of the last cleared tile (or of scheduling)
    last_step_ms: u64,
}

impl RemovalBatch {
    fn new(cells: Vec<(i8, i8)>, delta: i32, now_ms: u64) -> Self {
        Self {
            cells,
            delta,
            cursor: 0,
            last_step_ms: now_ms,
        }
    }

    pub fn remaining(&self) -> usize {
        self.cells.len() - self.cursor
    }

    pub fn delta(&self) -> i32 {
        self.delta
    }
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    current: Option<Piece>,
    removal: Option<RemovalBatch>,
    score: i32,
    high_scores: Vec<i32>,
    running: bool,
    game_over: bool,
    /// Countdown remaining for the hovering piece
    countdown_ms: u32,
    /// Timestamp of the previous `update` call; `None` until the first frame
    last_update_ms: Option<u64>,
    rng: SimpleRng,
}

impl Game {
    /// Create a fresh idle session with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            current: None,
            removal: None,
            score: 0,
            high_scores: Vec::new(),
            running: false,
            game_over: false,
            countdown_ms: COUNTDOWN_MS,
            last_update_ms: None,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn high_scores(&self) -> &[i32] {
        &self.high_scores
    }

    pub fn countdown_ms(&self) -> u32 {
        self.countdown_ms
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn removal(&self) -> Option<&RemovalBatch> {
        self.removal.as_ref()
    }

    #[cfg(test)]
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[cfg(test)]
    pub fn set_score(&mut self, score: i32) {
        self.score = score;
    }

    /// Start (or restart) a session: reset grid, score, and countdown, then
    /// spawn the first piece
    pub fn start(&mut self) {
        self.grid.reset();
        self.removal = None;
        self.score = 0;
        self.running = true;
        self.game_over = false;
        self.countdown_ms = COUNTDOWN_MS;
        self.last_update_ms = None;
        self.spawn_piece();
    }

    /// Spawn a new hovering piece: uniformly random template, rotation
    /// variant, and anchor. The anchor range comes from the rotation-0
    /// shape's raw dimensions, so after the random rotation is applied the
    /// piece may legally hang outside the grid; that state is corrected by
    /// the next rotation or at placement, not here.
    fn spawn_piece(&mut self) {
        let set = templates();
        let template = &set[self.rng.next_range(set.len() as u32) as usize];
        let rotation = self.rng.next_range(template.variants.len() as u32) as usize;

        let base = &template.variants[0];
        let (w0, h0) = (base.len() as u8, base[0].len() as u8);
        let x = self.rng.next_range((GRID_WIDTH - w0 + 1) as u32) as i8;
        let y = self.rng.next_range((GRID_HEIGHT - h0 + 1) as u32) as i8;

        self.current = Some(Piece::new(template.variants.clone(), rotation, x, y));
        self.countdown_ms = COUNTDOWN_MS;
        // The fresh countdown starts from the next frame.
        self.last_update_ms = None;
    }

    /// Translate the hovering piece. Rejected (no-op) if any footprint cell
    /// would leave the grid; placed tiles do not block movement.
    pub fn move_piece(&mut self, dx: i8, dy: i8) {
        if !self.running || self.game_over {
            return;
        }
        let Some(piece) = &mut self.current else {
            return;
        };

        let mut moved = piece.clone();
        moved.move_by(dx, dy);
        let in_bounds = moved
            .footprint()
            .iter()
            .all(|&((x, y), _)| !self.grid.is_out_of_bounds(x, y));
        if in_bounds {
            *piece = moved;
        }
    }

    /// Rotate the hovering piece, then clamp and kick it back inside the
    /// grid. On failure the pre-rotation rotation and anchor are fully
    /// restored.
    pub fn rotate_piece(&mut self) {
        if !self.running || self.game_over {
            return;
        }
        let Some(piece) = &mut self.current else {
            return;
        };

        let saved = piece.clone();
        piece.rotate();
        if !clamp_anchor(piece, &self.grid) || !resolve_kick(piece, &self.grid) {
            *piece = saved;
        }
    }

    /// Place the hovering piece. In order:
    /// 1. no piece: no-op;
    /// 2. exact match and affordable: schedule a paid removal batch over the
    ///    footprint (the grid is not touched; tiles clear during animation);
    /// 3. otherwise placement requires no collision, else no-op;
    /// 4. write the tiles, collect loop cells found through each of them;
    /// 5. schedule a reward batch for the loop cells, or spawn the next
    ///    piece immediately when no loop closed.
    pub fn place_piece(&mut self) {
        if !self.running || self.game_over {
            return;
        }
        let Some(piece) = self.current.take() else {
            return;
        };

        if let Some(count) = exact_match(&piece, &self.grid) {
            if self.score >= PAID_REMOVAL_COST_PER_TILE * count as i32 {
                self.schedule_paid_removal(&piece);
                return;
            }
        }

        if has_collision(&piece, &self.grid) {
            // Rejected: the piece keeps hovering.
            self.current = Some(piece);
            return;
        }

        self.commit_placement(&piece);
    }

    /// Schedule the paid exact-match removal of the piece's footprint.
    /// Affordability has already been checked by the caller.
    fn schedule_paid_removal(&mut self, piece: &Piece) {
        let cells = piece.footprint().iter().map(|&(at, _)| at).collect();
        self.removal = Some(RemovalBatch::new(
            cells,
            PAID_REMOVAL_DELTA,
            self.last_update_ms.unwrap_or(0),
        ));
    }

    /// Steps 4-5 of placement: write the footprint into the grid, query loop
    /// detection through every written cell, and either schedule the reward
    /// batch or spawn the next piece.
    fn commit_placement(&mut self, piece: &Piece) {
        let footprint = piece.footprint();
        for &((x, y), kind) in &footprint {
            self.grid.set(x, y, Some(kind));
        }

        let mut loop_cells: Vec<(i8, i8)> = Vec::new();
        for &((x, y), _) in &footprint {
            if let Some(path) = self.grid.detect_loop(x, y) {
                for cell in path {
                    if !loop_cells.contains(&cell) {
                        loop_cells.push(cell);
                    }
                }
            }
        }

        if loop_cells.is_empty() {
            self.spawn_piece();
        } else {
            self.removal = Some(RemovalBatch::new(
                loop_cells,
                LOOP_REWARD_DELTA,
                self.last_update_ms.unwrap_or(0),
            ));
        }
    }

    /// Per-frame tick with a monotonically increasing millisecond timestamp.
    /// Calling twice with the same timestamp advances nothing.
    pub fn update(&mut self, now_ms: u64) {
        if !self.running || self.game_over {
            return;
        }

        if self.removal.is_some() {
            // Animation pauses timer decay; the countdown reference is not
            // advanced and elapsed animation time is never charged.
            self.step_removal(now_ms);
            return;
        }

        let last = self.last_update_ms.unwrap_or(now_ms);
        self.last_update_ms = Some(now_ms);
        let elapsed = now_ms.saturating_sub(last);

        self.countdown_ms = self.countdown_ms.saturating_sub(elapsed as u32);
        if self.countdown_ms == 0 {
            self.on_countdown_expired();
        }
    }

    /// Advance the removal animation: clear one tile per interval, apply its
    /// score delta, and when the batch exhausts check the board-empty bonus
    /// and spawn the next piece.
    fn step_removal(&mut self, now_ms: u64) {
        let Some(batch) = &mut self.removal else {
            return;
        };
        if now_ms.saturating_sub(batch.last_step_ms) < REMOVAL_STEP_MS {
            return;
        }

        let (x, y) = batch.cells[batch.cursor];
        batch.cursor += 1;
        batch.last_step_ms = now_ms;
        let delta = batch.delta;
        let done = batch.cursor >= batch.cells.len();

        self.grid.set(x, y, None);
        self.score += delta;

        if done {
            self.removal = None;
            if self.grid.is_empty() {
                // Clearing the whole board doubles the score.
                self.score *= 2;
            }
            self.spawn_piece();
        }
    }

    /// Timeout handling: force the exact-match economics, then a normal
    /// placement. Unlike a player action, failure here is fatal.
    fn on_countdown_expired(&mut self) {
        let Some(piece) = self.current.take() else {
            self.end();
            return;
        };

        if let Some(count) = exact_match(&piece, &self.grid) {
            // An exact match at timeout is pay-or-die: no fallback to
            // normal placement.
            if self.score >= PAID_REMOVAL_COST_PER_TILE * count as i32 {
                self.schedule_paid_removal(&piece);
            } else {
                self.end();
            }
            return;
        }

        if has_collision(&piece, &self.grid) {
            self.end();
            return;
        }

        self.commit_placement(&piece);
    }

    /// Terminate the session: snapshot the score into the bounded high-score
    /// list (top 10, descending)
    pub fn end(&mut self) {
        self.running = false;
        self.game_over = true;
        self.current = None;
        self.high_scores.push(self.score);
        self.high_scores.sort_unstable_by(|a, b| b.cmp(a));
        self.high_scores.truncate(HIGH_SCORE_CAP);
    }

    /// Read-only state snapshot for renderers
    pub fn snapshot(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();

        for y in 0..GRID_HEIGHT as i8 {
            for x in 0..GRID_WIDTH as i8 {
                snapshot.grid[y as usize][x as usize] =
                    self.grid.get(x, y).flatten();
            }
        }

        snapshot.piece = self.current.as_ref().map(|piece| PieceSnapshot {
            x: piece.x,
            y: piece.y,
            rotation: piece.rotation(),
            cells: piece.footprint().into_iter().collect(),
        });

        snapshot.score = self.score;
        snapshot.high_scores = self.high_scores.clone();
        snapshot.running = self.running;
        snapshot.game_over = self.game_over;
        snapshot.countdown_ms = self.countdown_ms;
        snapshot.countdown_duration_ms = COUNTDOWN_MS;
        snapshot.removal_active = self.removal.is_some();
        snapshot
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(1)
    }
}
