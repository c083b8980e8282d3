//! Game engine - state machine, timers and the async dispatcher
//!
//! Builds on the pure rules in `brick-tetris-core`:
//!
//! - [`machine`]: `GameMachine`, a synchronous state machine that turns
//!   actions and timer ticks into snapshots plus a list of [`Effect`]s
//! - [`scheduler`]: the descent and screen-clear timers (tokio tasks, one live
//!   at a time, stale events filtered by id)
//! - [`runtime`]: the game loop task and the [`GameHandle`] used to drive it
//! - [`collab`]: sound, score and settings collaborators
//! - [`config`] / [`error`]
//!
//! # Example
//!
//! ```no_run
//! use brick_tetris_engine::{spawn_game, Collaborators, EngineConfig};
//! use brick_tetris_engine::types::Action;
//!
//! # async fn run() -> Result<(), brick_tetris_engine::EngineError> {
//! let (game, _task) = spawn_game(EngineConfig::default(), Collaborators::default())?;
//! game.dispatch(Action::Start)?;
//!
//! let mut snapshots = game.subscribe();
//! while snapshots.changed().await.is_ok() {
//!     let snapshot = snapshots.borrow_and_update().clone();
//!     println!("{}", snapshot.status.as_str());
//! }
//! # Ok(())
//! # }
//! ```

pub mod collab;
pub mod config;
pub mod error;
pub mod machine;
pub mod runtime;
pub mod scheduler;

pub use brick_tetris_core as core;
pub use brick_tetris_types as types;

pub use collab::{
    Collaborators, LoggedSettings, LoggedSound, MemoryScoreStore, ScoreStore, SettingsNav,
    SoundSink,
};
pub use config::{EngineConfig, TimingConfig};
pub use error::{ConfigError, EngineError};
pub use machine::{Effect, GameMachine};
pub use runtime::{spawn_game, spawn_machine, Command, GameHandle, GameRuntime};
pub use scheduler::{Scheduler, TimerEvent, TimerKind, TimerTick};
