//! Terminal brick game runner (default binary).
//!
//! `brick-tetris` plays in the terminal: crossterm for input and the
//! framebuffer renderer from the `term` crate.
//!
//! `brick-tetris headless` reads script lines from stdin (see
//! [`brick_tetris::script`]) and prints every snapshot as one JSON line.
//!
//! Logging goes to stderr, filtered by `RUST_LOG` (default `warn`).

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use brick_tetris::core::GameSnapshot;
use brick_tetris::engine::{
    Collaborators, EngineConfig, GameHandle, GameRuntime, MemoryScoreStore, ScoreStore,
};
use brick_tetris::input::{handle_key_event, should_quit};
use brick_tetris::script::{parse_line, ScriptCommand};
use brick_tetris::term::{FrameBuffer, GameView, Hud, TerminalRenderer, Viewport};
use brick_tetris::types::Action;

/// Input poll timeout; bounds how stale a drawn frame can be.
const FRAME: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = EngineConfig::from_env().validate()?;
    info!(?config, "starting");

    match std::env::args().nth(1).as_deref() {
        None => interactive(config),
        Some("headless" | "--headless") => headless(config),
        Some(other) => bail!("unknown mode '{other}' (expected: headless)"),
    }
}

fn interactive(config: EngineConfig) -> Result<()> {
    let score = Arc::new(MemoryScoreStore::new());
    let game = GameRuntime::start(
        config,
        Collaborators::default().with_score(score.clone()),
    )?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game.handle(), score.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    game.shutdown();
    result
}

fn run(term: &mut TerminalRenderer, game: &GameHandle, score: &dyn ScoreStore) -> Result<()> {
    let view = GameView::default();
    let mut snapshots = game.subscribe();
    let mut fb = FrameBuffer::new(0, 0);
    let mut dirty = true;

    loop {
        // Render.
        if dirty || snapshots.has_changed()? {
            let snap = snapshots.borrow_and_update().clone();
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            let hud = Hud {
                score: score.score(),
            };
            view.render_into(&snap, hud, Viewport::new(w, h), &mut fb);
            term.draw(&fb)?;
            dirty = false;
        }

        if !event::poll(FRAME)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    game.dispatch(action)?;
                }
            }
            Event::Resize(..) => {
                term.invalidate();
                dirty = true;
            }
            Event::FocusLost => game.dispatch(Action::Background)?,
            Event::FocusGained => game.dispatch(Action::Resume)?,
            _ => {}
        }
    }
}

fn headless(config: EngineConfig) -> Result<()> {
    let game = GameRuntime::start(config, Collaborators::default())?;
    let handle = game.handle().clone();

    // Subscribe before the first dispatch so nothing is missed.
    let mut events = handle.events();
    print_snapshot(&handle.snapshot())?;
    let printer = thread::spawn(move || loop {
        match events.blocking_recv() {
            Ok(snapshot) => {
                if print_snapshot(&snapshot).is_err() {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "snapshot output fell behind"),
            Err(RecvError::Closed) => break,
        }
    });

    for (number, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ScriptCommand::Dispatch(action))) => handle.dispatch(action)?,
            Ok(Some(ScriptCommand::Wait(duration))) => thread::sleep(duration),
            Ok(Some(ScriptCommand::SetDescentInterval(interval))) => {
                handle.set_descent_interval(interval)?
            }
            Err(err) => warn!(line = number + 1, "skipping script line: {err:#}"),
        }
    }

    drop(handle);
    game.shutdown();
    if printer.join().is_err() {
        bail!("snapshot printer panicked");
    }
    Ok(())
}

fn print_snapshot(snapshot: &GameSnapshot) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer(&mut out, snapshot)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
