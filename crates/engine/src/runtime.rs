//! Action dispatcher - the async game loop and its handle
//!
//! One task owns the [`GameMachine`] and the [`Scheduler`]. Actions from any
//! number of [`GameHandle`]s and events from the timer tasks are serialized
//! through that task, so no two transitions ever interleave.
//!
//! Observers have two ways in:
//! - [`GameHandle::subscribe`]: a `watch` receiver holding the latest snapshot
//!   (renderers; intermediate frames may be skipped).
//! - [`GameHandle::events`]: a `broadcast` receiver getting every snapshot in
//!   order (loggers, the headless printer).

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Runtime;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::collab::Collaborators;
use crate::config::{EngineConfig, TimingConfig};
use crate::core::GameSnapshot;
use crate::error::EngineError;
use crate::machine::{Effect, GameMachine};
use crate::scheduler::{Scheduler, TimerEvent};
use crate::types::Action;

/// Capacity of the every-snapshot channel; slow receivers see `Lagged`.
pub const EVENT_CAPACITY: usize = 1024;

/// Message into the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Dispatch(Action),
    SetDescentInterval(Duration),
}

/// Cloneable handle to a running game loop
#[derive(Debug, Clone)]
pub struct GameHandle {
    commands: mpsc::UnboundedSender<Command>,
    latest: watch::Receiver<Arc<GameSnapshot>>,
    events: broadcast::Sender<Arc<GameSnapshot>>,
}

impl GameHandle {
    /// Queue an action. Fails only when the game loop has stopped.
    pub fn dispatch(&self, action: Action) -> Result<(), EngineError> {
        self.send(Command::Dispatch(action))
    }

    /// Change the automatic descent interval for timers started from now on.
    pub fn set_descent_interval(&self, interval: Duration) -> Result<(), EngineError> {
        self.send(Command::SetDescentInterval(interval))
    }

    /// Latest snapshot
    pub fn snapshot(&self) -> Arc<GameSnapshot> {
        self.latest.borrow().clone()
    }

    /// Receiver for the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<Arc<GameSnapshot>> {
        self.latest.clone()
    }

    /// Receiver for every snapshot broadcast from now on
    pub fn events(&self) -> broadcast::Receiver<Arc<GameSnapshot>> {
        self.events.subscribe()
    }

    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    fn send(&self, command: Command) -> Result<(), EngineError> {
        self.commands
            .send(command)
            .map_err(|_| EngineError::Stopped)
    }
}

/// Validate `config` and spawn the game loop on the current tokio runtime.
///
/// The loop runs until every [`GameHandle`] is dropped.
pub fn spawn_game(
    config: EngineConfig,
    collab: Collaborators,
) -> Result<(GameHandle, JoinHandle<()>), EngineError> {
    let machine = GameMachine::from_config(&config)?;
    Ok(spawn_machine(machine, config.timing, collab))
}

/// Spawn the game loop around an existing machine.
pub fn spawn_machine(
    machine: GameMachine,
    timing: TimingConfig,
    collab: Collaborators,
) -> (GameHandle, JoinHandle<()>) {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (timer_tx, timer_rx) = mpsc::unbounded_channel();
    let (latest_tx, latest_rx) = watch::channel(machine.snapshot().clone());
    let (events_tx, _) = broadcast::channel(EVENT_CAPACITY);

    let game = GameLoop {
        machine,
        scheduler: Scheduler::new(timing, timer_tx),
        commands: command_rx,
        timers: timer_rx,
        latest: latest_tx,
        events: events_tx.clone(),
        collab,
    };
    let task = tokio::spawn(game.run());

    let handle = GameHandle {
        commands: command_tx,
        latest: latest_rx,
        events: events_tx,
    };
    (handle, task)
}

struct GameLoop {
    machine: GameMachine,
    scheduler: Scheduler,
    commands: mpsc::UnboundedReceiver<Command>,
    timers: mpsc::UnboundedReceiver<TimerEvent>,
    latest: watch::Sender<Arc<GameSnapshot>>,
    events: broadcast::Sender<Arc<GameSnapshot>>,
    collab: Collaborators,
}

impl GameLoop {
    async fn run(mut self) {
        debug!(
            width = self.machine.snapshot().width(),
            height = self.machine.snapshot().height(),
            "game loop started"
        );

        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(Command::Dispatch(action)) => {
                        trace!(action = action.as_str(), "dispatch");
                        let effects = self.machine.dispatch(action);
                        self.apply(effects);
                    }
                    Some(Command::SetDescentInterval(interval)) => {
                        self.scheduler.set_descent_interval(interval);
                    }
                    None => break,
                },
                Some(event) = self.timers.recv() => {
                    if self.scheduler.accept(&event) {
                        let effects = self.machine.on_timer(event.tick);
                        self.apply(effects);
                    }
                }
            }
        }

        self.scheduler.cancel();
        debug!("game loop stopped");
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Broadcast(snapshot) => {
                    debug!(status = snapshot.status.as_str(), "snapshot");
                    // No receivers is fine for both channels.
                    let _ = self.events.send(snapshot.clone());
                    self.latest.send_replace(snapshot);
                }
                Effect::Sound(sound) => self.collab.sound.play(sound),
                Effect::StartDescent => {
                    self.scheduler.start_descent();
                }
                Effect::StartScreenClear { rows } => {
                    self.scheduler.start_screen_clear(rows);
                }
                Effect::CancelTimers => self.scheduler.cancel(),
                Effect::AddScore(points) => {
                    let score = self.collab.score.score().saturating_add(points);
                    self.collab.score.set_score(score);
                    debug!(points, score, "score");
                }
                Effect::ResetScore => self.collab.score.set_score(0),
                Effect::OpenSettings => self.collab.settings.open_settings(),
            }
        }
    }
}

/// Synchronous owner of a tokio runtime running one game
///
/// For callers without their own runtime, such as the terminal loop.
pub struct GameRuntime {
    runtime: Runtime,
    handle: GameHandle,
    task: JoinHandle<()>,
}

impl GameRuntime {
    /// Validate `config`, build a runtime and start the game loop on it.
    pub fn start(config: EngineConfig, collab: Collaborators) -> Result<Self, EngineError> {
        let config = config.validate()?;
        let runtime = Runtime::new()?;
        let (handle, task) = {
            let _guard = runtime.enter();
            spawn_game(config, collab)?
        };
        Ok(Self {
            runtime,
            handle,
            task,
        })
    }

    pub fn handle(&self) -> &GameHandle {
        &self.handle
    }

    /// Stop the game loop and wait for it to exit.
    pub fn shutdown(self) {
        let Self {
            runtime,
            handle,
            task,
        } = self;
        drop(handle);
        if let Err(err) = runtime.block_on(task) {
            warn!(error = %err, "game loop ended abnormally");
        }
    }
}
