//! Core types module - shared vocabulary for the engine, input and views
//!
//! Everything here is plain data: game status, actions, transformation kinds,
//! sound cues, shape kinds and the default constants. No logic beyond parsing
//! and small predicates lives in this crate.
//!
//! # Board Dimensions
//!
//! Classic brick-game playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Both are defaults; a session may pick other dimensions, fixed for its lifetime.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_DESCENT_MS` | 500 | Delay before the automatic Down |
//! | `CLEAR_SCREEN_FRAME_MS` | 30 | Delay between screen-clear frames |
//! | `CLEAR_SCREEN_TAIL_MS` | 100 | Final pause before the screen-clear completes |
//!
//! # Examples
//!
//! ```
//! use brick_tetris_types::{Action, GameStatus, TransformKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let action = Action::from_str("fastDown").unwrap();
//! assert_eq!(action, Action::Transform(TransformKind::FastDown));
//! assert_eq!(action.as_str(), "fastDown");
//!
//! assert!(GameStatus::Welcome.can_start_game());
//! assert!(!GameStatus::Running.can_start_game());
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Default automatic descent interval (500ms per row)
pub const DEFAULT_DESCENT_MS: u64 = 500;

/// Delay between two screen-clear animation frames (30ms)
pub const CLEAR_SCREEN_FRAME_MS: u64 = 30;

/// Pause after the last screen-clear frame, before completion (100ms)
pub const CLEAR_SCREEN_TAIL_MS: u64 = 100;

/// Points credited for clearing N rows with a single lock.
///
/// Classic Nintendo values at level 0. Index 4 (a "Tetris") is the largest
/// possible clear for a four-cell piece.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// A board cell: 0 = empty, 1 = filled.
pub type Cell = u8;

/// Empty cell value
pub const EMPTY: Cell = 0;

/// Filled cell value
pub const FILLED: Cell = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brick_game_timing_defaults() {
        assert_eq!(DEFAULT_DESCENT_MS, 500);
        assert_eq!(CLEAR_SCREEN_FRAME_MS, 30);
        assert_eq!(CLEAR_SCREEN_TAIL_MS, 100);
    }

    #[test]
    fn action_names_parse_back() {
        for action in Action::ALL {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
        assert_eq!(Action::from_str("LEFT"), Some(Action::Transform(TransformKind::Left)));
        assert_eq!(Action::from_str("hold"), None);
    }

    #[test]
    fn only_welcome_and_game_over_can_start() {
        use GameStatus::*;
        for status in [Welcome, Running, Paused, LineClearing, ScreenClearing, GameOver] {
            assert_eq!(
                status.can_start_game(),
                matches!(status, Welcome | GameOver),
                "{:?}",
                status
            );
        }
    }

    #[test]
    fn rotation_counts() {
        assert_eq!(ShapeKind::O.rotation_count(), 1);
        assert_eq!(ShapeKind::I.rotation_count(), 2);
        assert_eq!(ShapeKind::S.rotation_count(), 2);
        assert_eq!(ShapeKind::Z.rotation_count(), 2);
        assert_eq!(ShapeKind::T.rotation_count(), 4);
        assert_eq!(ShapeKind::J.rotation_count(), 4);
        assert_eq!(ShapeKind::L.rotation_count(), 4);
    }
}

/// The seven tetromino shapes
///
/// - **I**: straight bar, 2 orientations
/// - **O**: 2x2 square, 1 orientation
/// - **T**: T-shaped, 4 orientations
/// - **S** / **Z**: skew pieces, 2 orientations each
/// - **J** / **L**: hooks, 4 orientations each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    /// All shapes, in a fixed order used by the random shape source.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    /// Number of distinct orientations of this shape.
    pub fn rotation_count(&self) -> u8 {
        match self {
            ShapeKind::O => 1,
            ShapeKind::I | ShapeKind::S | ShapeKind::Z => 2,
            ShapeKind::T | ShapeKind::J | ShapeKind::L => 4,
        }
    }

    /// Parse shape kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use brick_tetris_types::ShapeKind;
    ///
    /// assert_eq!(ShapeKind::from_str("i"), Some(ShapeKind::I));
    /// assert_eq!(ShapeKind::from_str("T"), Some(ShapeKind::T));
    /// assert_eq!(ShapeKind::from_str("x"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(ShapeKind::I),
            "o" => Some(ShapeKind::O),
            "t" => Some(ShapeKind::T),
            "s" => Some(ShapeKind::S),
            "z" => Some(ShapeKind::Z),
            "j" => Some(ShapeKind::J),
            "l" => Some(ShapeKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "i",
            ShapeKind::O => "o",
            ShapeKind::T => "t",
            ShapeKind::S => "s",
            ShapeKind::Z => "z",
            ShapeKind::J => "j",
            ShapeKind::L => "l",
        }
    }
}

/// Status of the game state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    /// Idle, no active piece
    Welcome,
    /// Piece falling, transforms accepted
    Running,
    /// Descent stopped, transforms ignored
    Paused,
    /// Transient: full rows are on the board, about to be removed
    LineClearing,
    /// Transient: board wipe animation
    ScreenClearing,
    /// Terminal until Welcome/Reset
    GameOver,
}

impl GameStatus {
    /// A new game can be started from here (Welcome or GameOver).
    pub fn can_start_game(&self) -> bool {
        matches!(self, GameStatus::Welcome | GameStatus::GameOver)
    }

    pub fn is_running(&self) -> bool {
        matches!(self, GameStatus::Running)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, GameStatus::Paused)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Welcome => "welcome",
            GameStatus::Running => "running",
            GameStatus::Paused => "paused",
            GameStatus::LineClearing => "lineClearing",
            GameStatus::ScreenClearing => "screenClearing",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Piece transformations requested by the player or the descent timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformKind {
    /// Move one column left
    Left,
    /// Move one column right
    Right,
    /// One row down (descent timer)
    Down,
    /// One row down (player); same rules as `Down`, different sound
    FastDown,
    /// Hard drop: straight down until collision, then lock
    Fall,
    /// Next orientation, no wall kicks
    Rotate,
}

impl TransformKind {
    /// Kinds that reschedule the descent timer after a successful move.
    pub fn restarts_descent(&self) -> bool {
        matches!(self, TransformKind::Down | TransformKind::FastDown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransformKind::Left => "left",
            TransformKind::Right => "right",
            TransformKind::Down => "down",
            TransformKind::FastDown => "fastDown",
            TransformKind::Fall => "fall",
            TransformKind::Rotate => "rotate",
        }
    }
}

/// Input events accepted by the dispatcher
///
/// Actions come from the keyboard, from platform lifecycle hooks
/// (`Background`) and from the descent timer (`Transform(Down)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Wipe the screen and return to the welcome screen
    Welcome,
    /// Same as `Welcome`
    Reset,
    /// Start a new game, or continue a paused one
    Start,
    /// Pause a running game
    Pause,
    /// Host went to background; pauses like `Pause`, without sound
    Background,
    /// Host came back; intentionally does nothing
    Resume,
    /// Flip the sound setting
    ToggleSound,
    /// Ask the host to show its settings screen
    OpenSettings,
    /// Move, rotate or drop the active piece
    Transform(TransformKind),
}

impl Action {
    /// Every action, transforms included.
    pub const ALL: [Action; 14] = [
        Action::Welcome,
        Action::Reset,
        Action::Start,
        Action::Pause,
        Action::Background,
        Action::Resume,
        Action::ToggleSound,
        Action::OpenSettings,
        Action::Transform(TransformKind::Left),
        Action::Transform(TransformKind::Right),
        Action::Transform(TransformKind::Down),
        Action::Transform(TransformKind::FastDown),
        Action::Transform(TransformKind::Fall),
        Action::Transform(TransformKind::Rotate),
    ];

    /// Parse action from string (case-insensitive)
    ///
    /// Transform kinds are addressed by their own name.
    ///
    /// # Examples
    ///
    /// ```
    /// use brick_tetris_types::{Action, TransformKind};
    ///
    /// assert_eq!(Action::from_str("start"), Some(Action::Start));
    /// assert_eq!(Action::from_str("toggleSound"), Some(Action::ToggleSound));
    /// assert_eq!(Action::from_str("rotate"), Some(Action::Transform(TransformKind::Rotate)));
    /// assert_eq!(Action::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "welcome" => Some(Action::Welcome),
            "reset" => Some(Action::Reset),
            "start" => Some(Action::Start),
            "pause" => Some(Action::Pause),
            "background" => Some(Action::Background),
            "resume" => Some(Action::Resume),
            "togglesound" | "sound" => Some(Action::ToggleSound),
            "opensettings" | "settings" => Some(Action::OpenSettings),
            "left" => Some(Action::Transform(TransformKind::Left)),
            "right" => Some(Action::Transform(TransformKind::Right)),
            "down" => Some(Action::Transform(TransformKind::Down)),
            "fastdown" => Some(Action::Transform(TransformKind::FastDown)),
            "fall" => Some(Action::Transform(TransformKind::Fall)),
            "rotate" => Some(Action::Transform(TransformKind::Rotate)),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Welcome => "welcome",
            Action::Reset => "reset",
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Background => "background",
            Action::Resume => "resume",
            Action::ToggleSound => "toggleSound",
            Action::OpenSettings => "openSettings",
            Action::Transform(kind) => kind.as_str(),
        }
    }
}

/// Sound cues handed to the sound sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SoundKind {
    /// Screen wipe / welcome jingle
    Welcome,
    /// Generic move, start, pause and toggle click
    Transform,
    Rotate,
    /// Hard drop thud
    Fall,
    /// Rows removed
    Clear,
}

impl SoundKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundKind::Welcome => "welcome",
            SoundKind::Transform => "transform",
            SoundKind::Rotate => "rotate",
            SoundKind::Fall => "fall",
            SoundKind::Clear => "clear",
        }
    }
}
