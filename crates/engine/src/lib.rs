//! Fixed-timestep driver.
//!
//! The host calls [`GameLoop::on_frame`] once per display frame with a
//! monotonic timestamp. The loop advances the game at most once per call,
//! and only when a full tick interval has elapsed since the previous tick,
//! so simulation speed does not depend on how often frames arrive. Missed
//! ticks are dropped, never replayed.
//!
//! ```
//! use tui_snake_core::{GameState, ScoreStore, TickOutcome};
//! use tui_snake_engine::{FrameOutcome, GameLoop};
//! use tui_snake_types::Grid;
//!
//! let mut game = GameState::new(Grid::new(10, 10).unwrap(), 1, ScoreStore::volatile());
//! let mut game_loop = GameLoop::new(100);
//! let mut ticks = 0;
//!
//! let mut on_tick = |_: &GameState, _: TickOutcome| ticks += 1;
//! assert!(matches!(game_loop.on_frame(1_000, &mut game, &mut on_tick), FrameOutcome::Ticked(_)));
//! assert_eq!(game_loop.on_frame(1_050, &mut game, &mut on_tick), FrameOutcome::Skipped);
//! assert!(matches!(game_loop.on_frame(1_100, &mut game, &mut on_tick), FrameOutcome::Ticked(_)));
//! assert_eq!(ticks, 2);
//! ```

pub use tui_snake_core as core;
pub use tui_snake_types as types;

use log::trace;

use crate::core::{GameState, TickOutcome};
use crate::types::TICK_MS;

/// Receives every tick, typically a renderer.
pub trait TickListener {
    fn on_tick(&mut self, state: &GameState, outcome: TickOutcome);
}

impl<F> TickListener for F
where
    F: FnMut(&GameState, TickOutcome),
{
    fn on_tick(&mut self, state: &GameState, outcome: TickOutcome) {
        (self)(state, outcome)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Not enough time has passed since the last tick.
    Skipped,
    Ticked(TickOutcome),
}

#[derive(Debug, Clone)]
pub struct GameLoop {
    tick_ms: u64,
    last_tick_ms: Option<u64>,
    ticks: u64,
}

impl GameLoop {
    /// A zero interval is raised to 1ms.
    pub fn new(tick_ms: u64) -> Self {
        Self {
            tick_ms: tick_ms.max(1),
            last_tick_ms: None,
            ticks: 0,
        }
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    /// Ticks performed since construction.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Milliseconds until the next tick is due at `now_ms` (0 when due).
    pub fn until_next_tick(&self, now_ms: u64) -> u64 {
        match self.last_tick_ms {
            Some(last) => self.tick_ms.saturating_sub(now_ms.saturating_sub(last)),
            None => 0,
        }
    }

    /// Make the next frame tick immediately.
    pub fn rearm(&mut self) {
        self.last_tick_ms = None;
    }

    pub fn on_frame(
        &mut self,
        now_ms: u64,
        state: &mut GameState,
        listener: &mut impl TickListener,
    ) -> FrameOutcome {
        if let Some(last) = self.last_tick_ms {
            if now_ms.saturating_sub(last) < self.tick_ms {
                return FrameOutcome::Skipped;
            }
        }

        self.last_tick_ms = Some(now_ms);
        self.ticks += 1;

        let outcome = state.advance();
        trace!("tick {} at {}ms: {:?}", self.ticks, now_ms, outcome);
        listener.on_tick(state, outcome);
        FrameOutcome::Ticked(outcome)
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new(TICK_MS as u64)
    }
}
