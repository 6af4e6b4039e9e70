//! Terminal renderer for the snake game.
//!
//! Frames are drawn into a plain [`FrameBuffer`] by [`GameView`] and then
//! flushed by [`TerminalRenderer`], which only rewrites cells that changed.
//! Board cells are two columns wide so the grid looks square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Rect, Viewport, HEADER_ROWS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
