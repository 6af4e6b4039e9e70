//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the game rules, state management, and the high-score
//! store. Apart from the optional score file it does no I/O:
//!
//! - **Deterministic**: Same seed and inputs produce identical runs
//! - **Testable**: Every rule is reachable through the public API
//! - **Portable**: Runs in the terminal host, in benches, or headless
//!
//! # Module Structure
//!
//! - [`game_state`]: Snake, food, direction, score, and the tick function
//! - [`rng`]: Seeded LCG used for food placement
//! - [`score_store`]: Persistent high score over a key-value medium
//! - [`snapshot`]: Read-only view handed to renderers
//!
//! # Game Rules
//!
//! - The snake starts as a single segment at (5, 5) heading right
//! - Each tick moves the head one cell; the tail follows unless food was eaten
//! - Food is worth 10 points and respawns on a free cell
//! - Leaving the grid or running into the snake ends the run
//! - A 180° turn is ignored
//!
//! # Example
//!
//! ```
//! use tui_snake_core::{GameState, ScoreStore, TickOutcome};
//! use tui_snake_types::{Direction, Grid, Position};
//!
//! let mut game = GameState::new(Grid::new(10, 10).unwrap(), 12345, ScoreStore::volatile());
//! game.place_food(Position::new(6, 5));
//!
//! assert_eq!(game.advance(), TickOutcome::Ate);
//! assert_eq!(game.score(), 10);
//!
//! game.set_direction(Direction::Down);
//! game.advance();
//! assert_eq!(game.head(), Position::new(6, 6));
//! ```

pub mod game_state;
pub mod rng;
pub mod score_store;
pub mod snapshot;

pub use tui_snake_types as types;

// Re-export commonly used types for convenience
pub use game_state::{GameState, TickOutcome};
pub use rng::SimpleRng;
pub use score_store::{parse_score, JsonFileBackend, KvBackend, MemoryBackend, ScoreStore, StoreError};
pub use snapshot::GameSnapshot;
