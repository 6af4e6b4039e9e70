//! Input module.
//!
//! [`translator`] is host-independent: it turns [`InputEvent`]s (symbols and
//! pointer swipes) into direction changes and restarts on a
//! [`GameState`](crate::core::GameState). [`map`] decodes `crossterm` key and
//! mouse events into those input events.

pub mod map;
pub mod translator;

pub use tui_snake_core as core;
pub use tui_snake_types as types;

pub use map::{input_event, should_quit, symbol_for_key};
pub use translator::{swipe_direction, InputEffect, InputEvent, InputSymbol, InputTranslator};
