//! Game state machine
//!
//! `GameMachine` owns the current snapshot and turns actions and timer ticks
//! into new snapshots. It performs no I/O and starts no timers itself: every
//! consequence is returned as an [`Effect`] for the game loop to carry out,
//! in order. This keeps the machine synchronous and testable without a clock.
//!
//! | Status | Accepts |
//! |--------|---------|
//! | Welcome | Start, Welcome/Reset, ToggleSound, OpenSettings |
//! | Running | everything |
//! | Paused | Start (continue), Welcome/Reset, ToggleSound, OpenSettings |
//! | LineClearing | never observed between two dispatches |
//! | ScreenClearing | Welcome/Reset (restarts the wipe), ToggleSound, OpenSettings |
//! | GameOver | Start, Welcome/Reset, ToggleSound, OpenSettings |

use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::core::{attempt_transform, finish_line_clear, line_score, start_game, GameSnapshot};
use crate::scheduler::TimerTick;
use crate::types::{Action, GameStatus, SoundKind, TransformKind};

/// Side effect requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Publish a new snapshot to observers
    Broadcast(Arc<GameSnapshot>),
    /// Play a sound (already filtered by the sound setting)
    Sound(SoundKind),
    /// (Re)start the descent timer
    StartDescent,
    /// Start the screen-clear animation for a board this many rows tall
    StartScreenClear { rows: u8 },
    /// Cancel whichever timer is live
    CancelTimers,
    AddScore(u32),
    ResetScore,
    OpenSettings,
}

/// Sound for a transform that took effect
fn transform_sound(kind: TransformKind) -> Option<SoundKind> {
    match kind {
        TransformKind::Left | TransformKind::Right | TransformKind::FastDown => {
            Some(SoundKind::Transform)
        }
        TransformKind::Fall => Some(SoundKind::Fall),
        TransformKind::Rotate => Some(SoundKind::Rotate),
        TransformKind::Down => None,
    }
}

#[derive(Debug, Clone)]
pub struct GameMachine {
    snapshot: Arc<GameSnapshot>,
    /// Status to land in when the running screen-clear completes
    clear_target: Option<GameStatus>,
}

impl GameMachine {
    pub fn new(initial: GameSnapshot) -> Self {
        Self {
            snapshot: Arc::new(initial),
            clear_target: None,
        }
    }

    /// Welcome state for a validated `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let config = config.clone().validate()?;
        Ok(Self::new(
            GameSnapshot::new(config.width, config.height, config.seed)
                .with_sound_enabled(config.sound_enabled),
        ))
    }

    pub fn snapshot(&self) -> &Arc<GameSnapshot> {
        &self.snapshot
    }

    pub fn status(&self) -> GameStatus {
        self.snapshot.status
    }

    /// Apply an input action.
    ///
    /// Actions that make no sense in the current status return no effects.
    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        let mut out = Vec::new();
        match action {
            Action::Welcome | Action::Reset => self.begin_screen_clear(GameStatus::Welcome, &mut out),
            Action::Start => self.start(&mut out),
            Action::Pause => self.pause(true, &mut out),
            Action::Background => self.pause(false, &mut out),
            Action::Resume => trace!("resume: nothing to do"),
            Action::ToggleSound => {
                // Judged on the setting before the flip.
                self.sound(SoundKind::Transform, &mut out);
                let next = self.snapshot.with_sound_enabled(!self.snapshot.sound_enabled);
                self.publish(next, &mut out);
            }
            Action::OpenSettings => out.push(Effect::OpenSettings),
            Action::Transform(kind) => self.transform(kind, &mut out),
        }
        out
    }

    /// Apply a timer tick that the scheduler accepted as live.
    pub fn on_timer(&mut self, tick: TimerTick) -> Vec<Effect> {
        let mut out = Vec::new();
        match tick {
            TimerTick::Descent => self.transform(TransformKind::Down, &mut out),
            TimerTick::ClearFrame(frame) => self.clear_frame(frame, &mut out),
            TimerTick::ClearDone => self.finish_screen_clear(&mut out),
        }
        out
    }

    fn start(&mut self, out: &mut Vec<Effect>) {
        let status = self.snapshot.status;
        if status.is_paused() {
            self.sound(SoundKind::Transform, out);
            let next = self.snapshot.with_status(GameStatus::Running);
            self.publish(next, out);
            out.push(Effect::StartDescent);
        } else if status.can_start_game() {
            self.sound(SoundKind::Transform, out);
            let next = start_game(&self.snapshot);
            self.continue_with(next, out);
        } else {
            trace!(?status, "start ignored");
        }
    }

    fn pause(&mut self, with_sound: bool, out: &mut Vec<Effect>) {
        if !self.snapshot.status.is_running() {
            trace!(status = ?self.snapshot.status, "pause ignored");
            return;
        }
        out.push(Effect::CancelTimers);
        if with_sound {
            self.sound(SoundKind::Transform, out);
        }
        let next = self.snapshot.with_status(GameStatus::Paused);
        self.publish(next, out);
    }

    fn transform(&mut self, kind: TransformKind, out: &mut Vec<Effect>) {
        if !self.snapshot.status.is_running() {
            trace!(?kind, status = ?self.snapshot.status, "transform ignored");
            return;
        }
        let Some(next) = attempt_transform(&self.snapshot, kind) else {
            return;
        };
        if let Some(sound) = transform_sound(kind) {
            self.sound(sound, out);
        }

        match next.status {
            GameStatus::Running => {
                self.publish(next, out);
                if kind.restarts_descent() {
                    out.push(Effect::StartDescent);
                }
            }
            GameStatus::LineClearing => {
                // One frame with the full rows visible, then straight back to Running.
                self.sound(SoundKind::Clear, out);
                let rows = next.cleared_rows;
                self.publish(next, out);
                out.push(Effect::AddScore(line_score(rows as usize)));
                debug!(rows, "rows cleared");

                let next = finish_line_clear(&self.snapshot);
                self.continue_with(next, out);
            }
            GameStatus::GameOver => {
                self.publish(next, out);
                self.begin_screen_clear(GameStatus::GameOver, out);
            }
            _ => self.publish(next, out),
        }
    }

    /// Publish a freshly spawned snapshot: Running restarts descent, GameOver wipes.
    fn continue_with(&mut self, next: GameSnapshot, out: &mut Vec<Effect>) {
        let over = next.status == GameStatus::GameOver;
        self.publish(next, out);
        if over {
            self.begin_screen_clear(GameStatus::GameOver, out);
        } else {
            out.push(Effect::StartDescent);
        }
    }

    fn begin_screen_clear(&mut self, target: GameStatus, out: &mut Vec<Effect>) {
        debug!(?target, "screen clear started");
        self.clear_target = Some(target);
        self.sound(SoundKind::Welcome, out);

        // Leave Running right away so no transform slips in before the first frame.
        let next = GameSnapshot {
            status: GameStatus::ScreenClearing,
            piece: None,
            cleared_rows: 0,
            ..(*self.snapshot).clone()
        };
        self.publish(next, out);
        out.push(Effect::StartScreenClear {
            rows: self.snapshot.height(),
        });
    }

    fn clear_frame(&mut self, frame: u16, out: &mut Vec<Effect>) {
        if self.clear_target.is_none() {
            trace!(frame, "screen-clear frame without animation");
            return;
        }
        let height = self.snapshot.height() as usize;
        let frame = frame as usize;
        let board = if frame < height {
            self.snapshot.board.with_row_filled(height - 1 - frame)
        } else if frame < height * 2 {
            self.snapshot.board.with_row_cleared(frame - height)
        } else {
            return;
        };

        let next = GameSnapshot {
            status: GameStatus::ScreenClearing,
            board,
            piece: None,
            ..(*self.snapshot).clone()
        };
        self.publish(next, out);
    }

    fn finish_screen_clear(&mut self, out: &mut Vec<Effect>) {
        let Some(target) = self.clear_target.take() else {
            return;
        };
        debug!(?target, "screen clear finished");
        if target == GameStatus::Welcome {
            out.push(Effect::ResetScore);
        }
        let next = self.snapshot.fresh(target);
        self.publish(next, out);
    }

    fn sound(&self, sound: SoundKind, out: &mut Vec<Effect>) {
        if self.snapshot.sound_enabled {
            out.push(Effect::Sound(sound));
        }
    }

    fn publish(&mut self, next: GameSnapshot, out: &mut Vec<Effect>) {
        let next = Arc::new(next);
        self.snapshot = next.clone();
        out.push(Effect::Broadcast(next));
    }
}

impl Default for GameMachine {
    fn default() -> Self {
        Self::new(GameSnapshot::default())
    }
}
