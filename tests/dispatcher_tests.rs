//! Game loop scenarios with a paused tokio clock.
//!
//! Every test drives a real game loop through its handle and advances time
//! with `tokio::time::sleep`, so timer behaviour is deterministic.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::sleep;

use brick_tetris::core::{Board, GameSnapshot, Piece};
use brick_tetris::engine::{
    spawn_game, spawn_machine, Collaborators, EngineConfig, GameHandle, GameMachine,
    MemoryScoreStore, ScoreStore, SettingsNav, TimingConfig,
};
use brick_tetris::types::{Action, GameStatus, ShapeKind, SoundKind, TransformKind};

#[derive(Default)]
struct CountingSettings(AtomicUsize);

impl SettingsNav for CountingSettings {
    fn open_settings(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

struct Harness {
    game: GameHandle,
    events: broadcast::Receiver<Arc<GameSnapshot>>,
    sounds: Arc<Mutex<Vec<SoundKind>>>,
    score: Arc<MemoryScoreStore>,
    settings: Arc<CountingSettings>,
}

impl Harness {
    fn collaborators() -> (Collaborators, Arc<Mutex<Vec<SoundKind>>>, Arc<MemoryScoreStore>, Arc<CountingSettings>) {
        let sounds = Arc::new(Mutex::new(Vec::new()));
        let score = Arc::new(MemoryScoreStore::new());
        let settings = Arc::new(CountingSettings::default());
        let sink = {
            let sounds = sounds.clone();
            move |sound: SoundKind| sounds.lock().unwrap().push(sound)
        };
        let collab = Collaborators::default()
            .with_sound(Arc::new(sink))
            .with_score(score.clone())
            .with_settings(settings.clone());
        (collab, sounds, score, settings)
    }

    fn new() -> Self {
        let (collab, sounds, score, settings) = Self::collaborators();
        let (game, _task) = spawn_game(EngineConfig::default(), collab).unwrap();
        let events = game.events();
        Self {
            game,
            events,
            sounds,
            score,
            settings,
        }
    }

    fn with_snapshot(snapshot: GameSnapshot) -> Self {
        let (collab, sounds, score, settings) = Self::collaborators();
        let (game, _task) = spawn_machine(GameMachine::new(snapshot), TimingConfig::default(), collab);
        let events = game.events();
        Self {
            game,
            events,
            sounds,
            score,
            settings,
        }
    }

    fn send(&self, action: Action) {
        self.game.dispatch(action).unwrap();
    }

    fn transform(&self, kind: TransformKind) {
        self.send(Action::Transform(kind));
    }

    /// Let the game loop drain everything already queued.
    async fn settle(&self) {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    async fn advance(&self, ms: u64) {
        sleep(Duration::from_millis(ms)).await;
        self.settle().await;
    }

    fn drain(&mut self) -> Vec<Arc<GameSnapshot>> {
        let mut out = Vec::new();
        while let Ok(snapshot) = self.events.try_recv() {
            out.push(snapshot);
        }
        out
    }

    fn take_sounds(&self) -> Vec<SoundKind> {
        std::mem::take(&mut *self.sounds.lock().unwrap())
    }

    fn status(&self) -> GameStatus {
        self.game.snapshot().status
    }
}

fn statuses(snapshots: &[Arc<GameSnapshot>]) -> Vec<GameStatus> {
    snapshots.iter().map(|s| s.status).collect()
}

fn running(board: Board, piece: Piece) -> GameSnapshot {
    GameSnapshot {
        status: GameStatus::Running,
        board,
        ..GameSnapshot::default()
    }
    .with_piece(piece)
}

/// 10x20 board with columns 3..7 stacked from row 1 to the floor.
fn spawn_blocked_board() -> Board {
    let mut rows = vec![".........."];
    rows.extend(std::iter::repeat("...####...").take(19));
    Board::from_rows(&rows).unwrap()
}

#[tokio::test(start_paused = true)]
async fn start_twice_is_a_noop() {
    let mut h = Harness::new();
    h.send(Action::Start);
    h.settle().await;
    assert_eq!(statuses(&h.drain()), vec![GameStatus::Running]);
    let first = h.game.snapshot();

    h.send(Action::Start);
    h.settle().await;
    assert!(h.drain().is_empty());
    assert_eq!(h.game.snapshot(), first);
    assert_eq!(h.take_sounds(), vec![SoundKind::Transform]);
}

#[tokio::test(start_paused = true)]
async fn transform_while_paused_changes_nothing() {
    let mut h = Harness::new();
    h.send(Action::Start);
    h.send(Action::Pause);
    h.settle().await;
    h.drain();
    h.take_sounds();
    let paused = h.game.snapshot();

    for kind in [
        TransformKind::Left,
        TransformKind::Right,
        TransformKind::Rotate,
        TransformKind::FastDown,
        TransformKind::Fall,
    ] {
        h.transform(kind);
    }
    h.advance(5_000).await;

    assert!(h.drain().is_empty());
    assert!(h.take_sounds().is_empty());
    assert_eq!(h.game.snapshot(), paused);
}

#[tokio::test(start_paused = true)]
async fn continue_after_pause_keeps_piece_and_descends_again() {
    let h = Harness::new();
    h.send(Action::Start);
    h.send(Action::Pause);
    h.settle().await;
    let piece = h.game.snapshot().piece.unwrap();

    h.send(Action::Start);
    h.settle().await;
    assert_eq!(h.status(), GameStatus::Running);
    assert_eq!(h.game.snapshot().piece, Some(piece));

    h.advance(500).await;
    assert_eq!(h.game.snapshot().piece.unwrap().y, piece.y + 1);
}

#[tokio::test(start_paused = true)]
async fn nineteen_downs_then_lock_clears_bottom_row() {
    // Row 19 is full except where the I piece will land.
    let board = Board::default().with_cells_filled(
        (0..10)
            .filter(|x| !(3..7).contains(x))
            .map(|x| (x, 19)),
    );
    let mut h = Harness::with_snapshot(running(board, Piece::new(ShapeKind::I, 3, 0)));

    for _ in 0..19 {
        h.transform(TransformKind::Down);
    }
    h.settle().await;
    assert_eq!(h.game.snapshot().piece.unwrap().y, 19);
    h.drain();

    h.transform(TransformKind::Down);
    h.settle().await;

    let after = h.drain();
    assert_eq!(
        statuses(&after),
        vec![GameStatus::LineClearing, GameStatus::Running]
    );
    assert_eq!(after[0].cleared_rows, 1);
    assert_eq!(after[1].cleared_rows, 0);
    assert!(after[0].board.is_row_full(19));
    assert!(after[1].board.is_empty());
    assert!(after[1].piece.is_some());
    assert_eq!(h.take_sounds(), vec![SoundKind::Clear]);
    assert_eq!(h.score.score(), 40);
}

#[tokio::test(start_paused = true)]
async fn game_over_runs_screen_clear_to_empty_board() {
    let mut h = Harness::with_snapshot(running(spawn_blocked_board(), Piece::new(ShapeKind::I, 3, 0)));

    h.transform(TransformKind::Down);
    h.settle().await;
    assert_eq!(h.status(), GameStatus::ScreenClearing);
    assert_eq!(h.take_sounds(), vec![SoundKind::Welcome]);

    // 40 frames 30ms apart, then the tail: still animating just before the end.
    h.advance(1_290).await;
    assert_eq!(h.status(), GameStatus::ScreenClearing);

    h.advance(20).await;
    let snapshots = h.drain();
    let last = snapshots.last().unwrap();
    assert_eq!(last.status, GameStatus::GameOver);
    assert!(last.board.is_empty());
    assert!(last.piece.is_none());

    // GameOver, wipe start, one snapshot per frame, completion.
    assert_eq!(snapshots.len(), 1 + 1 + 40 + 1);
    assert!(snapshots
        .iter()
        .any(|s| s.status == GameStatus::ScreenClearing && s.board.find_full_rows().len() == 20));

    // Nothing fires afterwards.
    h.advance(5_000).await;
    assert!(h.drain().is_empty());
}

#[tokio::test(start_paused = true)]
async fn reset_wipes_to_welcome_and_resets_score() {
    let h = Harness::new();
    h.score.set_score(1_200);
    h.send(Action::Start);
    h.advance(1_000).await;

    h.send(Action::Reset);
    h.settle().await;
    assert_eq!(h.status(), GameStatus::ScreenClearing);

    // Descent never interferes with the wipe.
    h.advance(1_400).await;
    assert_eq!(h.status(), GameStatus::Welcome);
    assert!(h.game.snapshot().board.is_empty());
    assert_eq!(h.score.score(), 0);
}

#[tokio::test(start_paused = true)]
async fn second_reset_restarts_the_wipe() {
    let h = Harness::new();
    h.send(Action::Reset);
    h.advance(600).await;

    h.send(Action::Reset);
    h.settle().await;
    h.advance(1_200).await;
    assert_eq!(h.status(), GameStatus::ScreenClearing, "first wipe must not complete");

    h.advance(200).await;
    assert_eq!(h.status(), GameStatus::Welcome);
}

#[tokio::test(start_paused = true)]
async fn descent_interval_applies_to_next_timer() {
    let h = Harness::new();
    h.game
        .set_descent_interval(Duration::from_millis(100))
        .unwrap();
    h.send(Action::Start);
    h.settle().await;
    let y = h.game.snapshot().piece.unwrap().y;

    h.advance(350).await;
    assert_eq!(h.game.snapshot().piece.unwrap().y, y + 3);
}

#[tokio::test(start_paused = true)]
async fn fast_down_restarts_descent_delay() {
    let h = Harness::new();
    h.send(Action::Start);
    h.settle().await;
    let y = h.game.snapshot().piece.unwrap().y;

    h.advance(400).await;
    h.transform(TransformKind::FastDown);
    h.settle().await;
    assert_eq!(h.game.snapshot().piece.unwrap().y, y + 1);

    // The old timer would have fired at 500ms.
    h.advance(300).await;
    assert_eq!(h.game.snapshot().piece.unwrap().y, y + 1);

    h.advance(250).await;
    assert_eq!(h.game.snapshot().piece.unwrap().y, y + 2);
}

#[tokio::test(start_paused = true)]
async fn toggle_sound_and_open_settings() {
    let h = Harness::new();

    h.send(Action::ToggleSound);
    h.send(Action::Start);
    h.send(Action::OpenSettings);
    h.settle().await;

    assert!(!h.game.snapshot().sound_enabled);
    // Only the toggle itself made a sound.
    assert_eq!(h.take_sounds(), vec![SoundKind::Transform]);
    assert_eq!(h.settings.0.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn toggle_sound_mid_wipe_keeps_wiping() {
    let mut h = Harness::new();
    h.send(Action::Reset);
    h.advance(300).await;
    h.drain();

    h.send(Action::ToggleSound);
    h.settle().await;
    let toggled = h.drain();
    assert_eq!(statuses(&toggled), vec![GameStatus::ScreenClearing]);
    assert!(!toggled[0].sound_enabled);

    // Remaining frames and completion still arrive on the original schedule.
    h.advance(1_100).await;
    let rest = h.drain();
    assert!(rest.len() > 20);
    assert_eq!(rest.last().unwrap().status, GameStatus::Welcome);
    assert!(rest.last().unwrap().board.is_empty());
    assert!(!h.game.snapshot().sound_enabled);
}

#[tokio::test(start_paused = true)]
async fn toggle_sound_while_running_keeps_descent() {
    let h = Harness::new();
    h.send(Action::Start);
    h.settle().await;
    let y = h.game.snapshot().piece.unwrap().y;

    h.advance(250).await;
    h.send(Action::ToggleSound);
    h.settle().await;
    assert_eq!(h.status(), GameStatus::Running);

    h.advance(260).await;
    assert_eq!(h.game.snapshot().piece.unwrap().y, y + 1);
}

#[tokio::test(start_paused = true)]
async fn background_pauses_without_sound() {
    let h = Harness::new();
    h.send(Action::Start);
    h.settle().await;
    h.take_sounds();

    h.send(Action::Background);
    h.send(Action::Resume);
    h.settle().await;
    assert_eq!(h.status(), GameStatus::Paused);
    assert!(h.take_sounds().is_empty());
}
