use crate::types::{Direction, Grid, Position};

/// Read-only view of a game handed to renderers once per tick.
///
/// Hosts keep one snapshot and refill it with
/// [`GameState::snapshot_into`](crate::GameState::snapshot_into) so the
/// segment buffer is reused across frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    /// Head first.
    pub snake: Vec<Position>,
    pub food: Position,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub game_over: bool,
    pub grid_width: u16,
    pub grid_height: u16,
    pub run_id: u32,
    pub ticks: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        let grid = Grid::default();
        self.snake.clear();
        self.food = Position::default();
        self.direction = Direction::Right;
        self.score = 0;
        self.high_score = 0;
        self.game_over = false;
        self.grid_width = grid.width();
        self.grid_height = grid.height();
        self.run_id = 0;
        self.ticks = 0;
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            snake: Vec::new(),
            food: Position::default(),
            direction: Direction::Right,
            score: 0,
            high_score: 0,
            game_over: false,
            grid_width: 0,
            grid_height: 0,
            run_id: 0,
            ticks: 0,
        };
        s.clear();
        s
    }
}
