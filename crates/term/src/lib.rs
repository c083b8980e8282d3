//! Terminal "game renderer" module.
//!
//! Renders snapshots into a simple framebuffer that is diffed and flushed to
//! the terminal with crossterm. Rendering sits outside the engine: it only
//! reads snapshots.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot to framebuffer (pure)
//! - [`renderer`]: framebuffer to terminal (I/O)

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use brick_tetris_core as core;
pub use brick_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
