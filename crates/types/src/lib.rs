//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! Everything here is plain data with no I/O, so it can be shared by the game
//! core, the input layer and the terminal renderer alike.
//!
//! # Grid
//!
//! The playfield is a `width x height` grid of cells addressed by
//! [`Position`]. `(0, 0)` is the top-left cell; `x` grows to the right and
//! `y` grows downward.
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Simulation step interval |
//! | `FRAME_MS` | 16 | Host frame cadence (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use tui_snake_types::{Direction, Grid, Position};
//!
//! let grid = Grid::new(10, 10).unwrap();
//! let head = Position::new(5, 5);
//!
//! let next = head.step(Direction::Right);
//! assert_eq!(next, Position::new(6, 5));
//! assert!(grid.contains(next));
//!
//! assert_eq!(Direction::Up.opposite(), Direction::Down);
//! assert!(Direction::Left.is_opposite(Direction::Right));
//! ```

use thiserror::Error;

/// Simulation step interval in milliseconds (100ms = 10 moves per second)
pub const TICK_MS: u32 = 100;

/// Host frame interval in milliseconds (16ms ≈ 60 FPS)
pub const FRAME_MS: u32 = 16;

/// Points awarded for each piece of food eaten
pub const FOOD_REWARD: u32 = 10;

/// Spawn cell of the snake head after a reset
pub const SPAWN: Position = Position::new(5, 5);

/// Smallest accepted grid dimension (the spawn cell must be on the grid)
pub const MIN_GRID_CELLS: u16 = 6;

/// Rejection-sampling budget for food placement, per grid cell
pub const FOOD_SAMPLE_ATTEMPTS_PER_CELL: u32 = 4;

/// Storage slot holding the decimal high score
pub const HIGH_SCORE_KEY: &str = "snakeGameHighScore";

/// A cell coordinate on (or just off) the grid.
///
/// Coordinates are signed so that a move through a wall produces a
/// representable, out-of-bounds position instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring cell one step in `dir`.
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }
}

/// The four grid directions
///
/// Each direction is a unit vector:
/// - **Up**: `(0, -1)`
/// - **Down**: `(0, 1)`
/// - **Left**: `(-1, 0)`
/// - **Right**: `(1, 0)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector `(dx, dy)` for this direction
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_snake_types::Direction;
    ///
    /// assert_eq!(Direction::Up.delta(), (0, -1));
    /// assert_eq!(Direction::Right.delta(), (1, 0));
    /// ```
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True when turning from `self` to `other` would be a 180° reversal.
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid {width}x{height} is smaller than the {min}x{min} minimum")]
    TooSmall { width: u16, height: u16, min: u16 },
}

/// Validated grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Result<Self, GridError> {
        if width < MIN_GRID_CELLS || height < MIN_GRID_CELLS {
            return Err(GridError::TooSmall {
                width,
                height,
                min: MIN_GRID_CELLS,
            });
        }
        Ok(Self { width, height })
    }

    /// Clamp arbitrary dimensions up to the minimum grid.
    pub fn clamped(width: u16, height: u16) -> Self {
        Self {
            width: width.max(MIN_GRID_CELLS),
            height: height.max(MIN_GRID_CELLS),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width as i32 && pos.y < self.height as i32
    }

    /// Position for a row-major cell index in `0..cell_count()`.
    pub fn position_at(&self, index: u32) -> Position {
        let w = self.width as u32;
        Position::new((index % w) as i32, (index / w) as i32)
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            width: 20,
            height: 15,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionKind {
    /// The head left the grid
    Wall,
    /// The head entered a cell occupied by the snake
    SelfHit,
}

impl CollisionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionKind::Wall => "wall",
            CollisionKind::SelfHit => "self",
        }
    }
}
