//! Terminal pipe-loop runner (default binary).
//!
//! Drives the core once per frame with a monotonic millisecond timestamp and
//! forwards key presses as intents. The core is the sole owner of game
//! state; this loop only renders snapshots and feeds input.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_pipes::core::Game;
use tui_pipes::input::{handle_key_event, should_quit};
use tui_pipes::term::{GameView, TerminalRenderer};
use tui_pipes::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = std::process::id();
    let mut game = Game::new(seed);
    game.start();

    let view = GameView;
    let epoch = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        term.draw(&view.render(&game.snapshot()))?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply(&mut game, action);
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            game.update(epoch.elapsed().as_millis() as u64);
        }
    }
}

fn apply(game: &mut Game, action: GameAction) {
    // Gate piece intents on session state; the core treats stray calls as
    // no-ops anyway, but ignoring input mid-animation feels better.
    let snapshot = game.snapshot();
    let piece_intents_ok = snapshot.running && !snapshot.removal_active;

    match action {
        GameAction::MoveLeft if piece_intents_ok => game.move_piece(-1, 0),
        GameAction::MoveRight if piece_intents_ok => game.move_piece(1, 0),
        GameAction::MoveUp if piece_intents_ok => game.move_piece(0, -1),
        GameAction::MoveDown if piece_intents_ok => game.move_piece(0, 1),
        GameAction::Rotate if piece_intents_ok => game.rotate_piece(),
        GameAction::Place if piece_intents_ok => game.place_piece(),
        GameAction::Restart => game.start(),
        _ => {}
    }
}
