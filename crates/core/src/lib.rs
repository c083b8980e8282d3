//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the playfield rules of the brick game: board, pieces,
//! the transformation engine and the immutable snapshot observers see. It has
//! no timers, no I/O and no async code; the state machine in the engine crate
//! drives it.
//!
//! - **Deterministic**: the shape source lives in the snapshot, so a seed
//!   replays the same game
//! - **Value semantics**: boards, pieces and snapshots are never mutated in
//!   place; every transform returns a new value
//!
//! # Module Structure
//!
//! - [`board`]: width x height grid with collision and line detection
//! - [`pieces`]: the seven shapes, their orientations and the piece value
//! - [`rng`]: seeded shape selection
//! - [`scoring`]: points per line clear
//! - [`snapshot`]: the immutable game state
//! - [`transform`]: move / rotate / drop / lock / spawn rules
//!
//! # Game Rules
//!
//! - **Strict rotation**: a rotation that collides is rejected, no wall kicks
//! - **Immediate lock**: a Down that cannot move locks the piece at once
//! - **Hard drop**: Fall moves to the lowest free position and locks
//! - **Game over**: the new piece's spawn position is occupied
//!
//! # Example
//!
//! ```
//! use brick_tetris_core::{attempt_transform, start_game, GameSnapshot};
//! use brick_tetris_types::{GameStatus, TransformKind};
//!
//! let game = start_game(&GameSnapshot::default());
//! assert_eq!(game.status, GameStatus::Running);
//!
//! let moved = attempt_transform(&game, TransformKind::Down).unwrap();
//! assert_eq!(moved.piece.unwrap().y, 1);
//!
//! // The input snapshot is untouched.
//! assert_eq!(game.piece.unwrap().y, 0);
//! ```

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;
pub mod transform;

pub use brick_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use pieces::{get_shape, Piece, PieceShape};
pub use rng::SimpleRng;
pub use scoring::line_score;
pub use snapshot::GameSnapshot;
pub use transform::{
    attempt_transform, can_place, drop_position, finish_line_clear, lock, spawn, start_game,
};
