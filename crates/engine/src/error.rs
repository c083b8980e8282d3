//! Error types
//!
//! Gameplay never errors: illegal transforms and out-of-state actions are
//! dropped silently. These cover configuration and the runtime plumbing.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("board width {0} is outside 4..=64")]
    Width(u8),

    #[error("board height {0} is outside 4..=64")]
    Height(u8),

    #[error("{0} interval must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EngineError {
    /// The game loop has exited; the action was not delivered.
    #[error("game loop has stopped")]
    Stopped,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
