//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto [`crate::types::Action`]. There is no key
//! repeat handling here: the terminal's own auto-repeat produces one press
//! per repeat and each press becomes one action.

pub mod map;

pub use brick_tetris_types as types;

pub use map::{handle_key_event, should_quit};
