//! Engine configuration
//!
//! Defaults match the classic handheld: a 10x20 board, one row every 500ms,
//! 30ms screen-clear frames and a 100ms pause before the wipe completes.
//!
//! # Environment Variables
//!
//! - `TETRIS_WIDTH` / `TETRIS_HEIGHT`: board size (default 10 x 20)
//! - `TETRIS_SEED`: shape sequence seed (default 1)
//! - `TETRIS_SOUND`: `0`/`false` to start muted (default on)
//! - `TETRIS_DESCENT_MS`: automatic descent interval (default 500)
//!
//! Unparsable values fall back to the default with a warning.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::ConfigError;
use crate::types::{
    BOARD_HEIGHT, BOARD_WIDTH, CLEAR_SCREEN_FRAME_MS, CLEAR_SCREEN_TAIL_MS, DEFAULT_DESCENT_MS,
};

/// Smallest board edge (a piece box is 4 cells wide)
pub const MIN_DIMENSION: u8 = 4;

/// Largest board edge
pub const MAX_DIMENSION: u8 = 64;

/// Timer intervals, held by the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub descent_ms: u64,
    pub clear_frame_ms: u64,
    pub clear_tail_ms: u64,
}

impl TimingConfig {
    pub fn descent(&self) -> Duration {
        Duration::from_millis(self.descent_ms)
    }

    pub fn clear_frame(&self) -> Duration {
        Duration::from_millis(self.clear_frame_ms)
    }

    pub fn clear_tail(&self) -> Duration {
        Duration::from_millis(self.clear_tail_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            descent_ms: DEFAULT_DESCENT_MS,
            clear_frame_ms: CLEAR_SCREEN_FRAME_MS,
            clear_tail_ms: CLEAR_SCREEN_TAIL_MS,
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub seed: u32,
    pub sound_enabled: bool,
    pub timing: TimingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: 1,
            sound_enabled: true,
            timing: TimingConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let sound_enabled = env::var("TETRIS_SOUND")
            .map(|v| !(v == "0" || v.eq_ignore_ascii_case("false")))
            .unwrap_or(defaults.sound_enabled);

        Self {
            width: env_or("TETRIS_WIDTH", defaults.width),
            height: env_or("TETRIS_HEIGHT", defaults.height),
            seed: env_or("TETRIS_SEED", defaults.seed),
            sound_enabled,
            timing: TimingConfig {
                descent_ms: env_or("TETRIS_DESCENT_MS", defaults.timing.descent_ms),
                ..defaults.timing
            },
        }
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        let range = MIN_DIMENSION..=MAX_DIMENSION;
        if !range.contains(&self.width) {
            return Err(ConfigError::Width(self.width));
        }
        if !range.contains(&self.height) {
            return Err(ConfigError::Height(self.height));
        }
        if self.timing.descent_ms == 0 {
            return Err(ConfigError::ZeroInterval("descent"));
        }
        if self.timing.clear_frame_ms == 0 {
            return Err(ConfigError::ZeroInterval("screen-clear frame"));
        }
        Ok(self)
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable config value");
            default
        }
    }
}
