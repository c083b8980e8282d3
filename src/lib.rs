//! Brick Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates under one roof, `brick_tetris::{core,
//! engine, input, term, types}`, and holds the line-based script format used
//! by the binary's headless mode.

pub mod script;

pub use brick_tetris_core as core;
pub use brick_tetris_engine as engine;
pub use brick_tetris_input as input;
pub use brick_tetris_term as term;
pub use brick_tetris_types as types;
