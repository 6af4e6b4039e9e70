//! Game state module - manages the complete game state
//!
//! This module ties together the snake, food placement, scoring and the
//! high-score store. One call to [`GameState::advance`] is one tick.

use std::collections::VecDeque;

use log::{debug, info};

use crate::rng::SimpleRng;
use crate::score_store::ScoreStore;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// What a single [`GameState::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The run is over; nothing moved.
    Idle,
    /// The snake moved one cell.
    Moved,
    /// The snake moved onto the food and grew.
    Ate,
    /// The move was blocked and the run ended.
    Collided(CollisionKind),
}

/// Complete game state
#[derive(Debug)]
pub struct GameState {
    grid: Grid,
    /// Grid requested by the host (terminal resize); applied on reset.
    pending_grid: Option<Grid>,
    /// Head at the front.
    snake: VecDeque<Position>,
    food: Position,
    /// Direction the next tick will move in.
    direction: Direction,
    score: u32,
    /// Display copy of the stored high score.
    high_score: u32,
    game_over: bool,
    /// Monotonic run id (increments on reset).
    run_id: u32,
    /// Ticks advanced in the current run.
    ticks: u32,
    rng: SimpleRng,
    store: ScoreStore,
}

impl GameState {
    /// Create a new game on `grid` with the given RNG seed.
    pub fn new(grid: Grid, seed: u32, store: ScoreStore) -> Self {
        let high_score = store.get();
        let mut state = Self {
            grid,
            pending_grid: None,
            snake: VecDeque::from([SPAWN]),
            food: SPAWN,
            direction: Direction::Right,
            score: 0,
            high_score,
            game_over: false,
            run_id: 0,
            ticks: 0,
            rng: SimpleRng::new(seed),
            store,
        };
        state.spawn_food();
        state
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn snake(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.snake.iter()
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn food(&self) -> Position {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn run_id(&self) -> u32 {
        self.run_id
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn store(&self) -> &ScoreStore {
        &self.store
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.snake.clear();
        out.snake.extend(self.snake.iter().copied());
        out.food = self.food;
        out.direction = self.direction;
        out.score = self.score;
        out.high_score = self.high_score;
        out.game_over = self.game_over;
        out.grid_width = self.grid.width();
        out.grid_height = self.grid.height();
        out.run_id = self.run_id;
        out.ticks = self.ticks;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Advance the game by one tick.
    ///
    /// Collisions are checked against the snake as it was before the move,
    /// bounds first. A blocked move ends the run and changes nothing else.
    pub fn advance(&mut self) -> TickOutcome {
        if self.game_over {
            return TickOutcome::Idle;
        }

        let new_head = self.head().step(self.direction);

        if let Some(kind) = self.collision_at(new_head) {
            self.end_run(kind);
            return TickOutcome::Collided(kind);
        }

        let ate_food = new_head == self.food;

        self.snake.push_front(new_head);
        self.ticks = self.ticks.wrapping_add(1);

        if ate_food {
            self.score += FOOD_REWARD;
            self.record_high_score();
            self.spawn_food();
            TickOutcome::Ate
        } else {
            self.snake.pop_back();
            TickOutcome::Moved
        }
    }

    /// Queue a turn for the next tick.
    ///
    /// The exact reverse of the current direction is refused. Returns whether
    /// the turn was taken.
    pub fn set_direction(&mut self, dir: Direction) -> bool {
        if dir.is_opposite(self.direction) {
            return false;
        }
        self.direction = dir;
        true
    }

    /// Start a fresh run. The high score survives.
    pub fn reset(&mut self) {
        if let Some(grid) = self.pending_grid.take() {
            self.grid = grid;
        }
        self.snake.clear();
        self.snake.push_back(SPAWN);
        self.direction = Direction::Right;
        self.score = 0;
        self.game_over = false;
        self.ticks = 0;
        self.run_id = self.run_id.wrapping_add(1);
        self.spawn_food();
        self.high_score = self.store.get();
        debug!(
            "run {} started on {}x{} grid",
            self.run_id,
            self.grid.width(),
            self.grid.height()
        );
    }

    /// Request a new grid size. It takes effect on the next [`reset`](Self::reset).
    pub fn resize(&mut self, grid: Grid) {
        self.pending_grid = if grid == self.grid { None } else { Some(grid) };
    }

    /// Forget the stored high score.
    pub fn clear_high_score(&mut self) {
        self.store.clear();
        self.high_score = 0;
    }

    /// Replace the snake (head first). An empty sequence is refused.
    ///
    /// Positions are not validated: this is how tests and tooling stage
    /// edge cases such as a head sitting on the wall.
    pub fn place_snake(&mut self, segments: impl IntoIterator<Item = Position>) -> bool {
        let segments: VecDeque<Position> = segments.into_iter().collect();
        if segments.is_empty() {
            return false;
        }
        self.snake = segments;
        true
    }

    pub fn place_food(&mut self, pos: Position) {
        self.food = pos;
    }

    /// Set the direction unconditionally, reversals included.
    pub fn force_direction(&mut self, dir: Direction) {
        self.direction = dir;
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }

    fn collision_at(&self, pos: Position) -> Option<CollisionKind> {
        if !self.grid.contains(pos) {
            return Some(CollisionKind::Wall);
        }
        if self.occupies(pos) {
            return Some(CollisionKind::SelfHit);
        }
        None
    }

    fn end_run(&mut self, kind: CollisionKind) {
        self.game_over = true;
        self.record_high_score();
        info!(
            "run {} over ({}) after {} ticks: score {}, high score {}",
            self.run_id,
            kind.as_str(),
            self.ticks,
            self.score,
            self.high_score
        );
    }

    /// Persist the score when it beats the stored record, then refresh the
    /// displayed copy.
    fn record_high_score(&mut self) {
        if self.score > self.store.get() {
            self.store.set(self.score);
        }
        self.high_score = self.store.get();
    }

    fn spawn_food(&mut self) {
        if let Some(pos) = self.pick_free_cell() {
            self.food = pos;
        }
    }

    /// Uniform rejection sampling over the grid with a bounded budget, then
    /// a uniform pick among the free cells. `None` only on a full grid.
    fn pick_free_cell(&mut self) -> Option<Position> {
        let cells = self.grid.cell_count();
        let attempts = cells.saturating_mul(FOOD_SAMPLE_ATTEMPTS_PER_CELL);

        for _ in 0..attempts {
            let pos = self.grid.position_at(self.rng.next_below(cells));
            if !self.occupies(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..cells)
            .map(|i| self.grid.position_at(i))
            .filter(|&pos| !self.occupies(pos))
            .collect();
        if free.is_empty() {
            return None;
        }
        let pick = self.rng.next_below(free.len() as u32) as usize;
        Some(free[pick])
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Grid::default(), 1, ScoreStore::volatile())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score_store::MemoryBackend;

    fn grid(w: u16, h: u16) -> Grid {
        Grid::new(w, h).unwrap()
    }

    fn game(w: u16, h: u16) -> GameState {
        GameState::new(grid(w, h), 12345, ScoreStore::volatile())
    }

    fn body(state: &GameState) -> Vec<Position> {
        state.snake().copied().collect()
    }

    #[test]
    fn test_new_game_state() {
        let state = game(10, 10);

        assert_eq!(body(&state), vec![Position::new(5, 5)]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert_eq!(state.run_id, 0);
        assert!(state.grid.contains(state.food));
        assert!(!state.occupies(state.food));
    }

    #[test]
    fn test_new_game_shows_stored_high_score() {
        let store = ScoreStore::new(Some(Box::new(MemoryBackend::with_slot(
            HIGH_SCORE_KEY,
            "90",
        ))));
        let state = GameState::new(grid(10, 10), 1, store);
        assert_eq!(state.high_score(), 90);
    }

    #[test]
    fn test_move_without_food_keeps_length() {
        let mut state = game(10, 10);
        state.place_food(Position::new(0, 0));

        assert_eq!(state.advance(), TickOutcome::Moved);
        assert_eq!(body(&state), vec![Position::new(6, 5)]);
        assert_eq!(state.score, 0);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_eating_food_grows_and_scores() {
        let mut state = game(10, 10);
        state.place_food(Position::new(6, 5));

        assert_eq!(state.advance(), TickOutcome::Ate);
        assert_eq!(body(&state), vec![Position::new(6, 5), Position::new(5, 5)]);
        assert_eq!(state.score, FOOD_REWARD);
        assert!(!state.game_over);
        assert!(!state.occupies(state.food));
    }

    #[test]
    fn test_eating_raises_high_score_immediately() {
        let mut state = game(10, 10);
        state.place_food(Position::new(6, 5));
        state.advance();
        assert_eq!(state.high_score(), 10);
        assert_eq!(state.store().get(), 10);
    }

    #[test]
    fn test_wall_collision_changes_nothing_else() {
        let mut state = game(10, 10);
        state.place_snake([Position::new(9, 3), Position::new(8, 3)]);
        state.place_food(Position::new(0, 0));

        assert_eq!(
            state.advance(),
            TickOutcome::Collided(CollisionKind::Wall)
        );
        assert!(state.game_over);
        assert_eq!(body(&state), vec![Position::new(9, 3), Position::new(8, 3)]);
        assert_eq!(state.food, Position::new(0, 0));
        assert_eq!(state.ticks, 0);
    }

    #[test]
    fn test_walls_on_every_side() {
        let cases = [
            (Position::new(0, 4), Direction::Left),
            (Position::new(9, 4), Direction::Right),
            (Position::new(4, 0), Direction::Up),
            (Position::new(4, 9), Direction::Down),
        ];
        for (head, dir) in cases {
            let mut state = game(10, 10);
            state.place_snake([head]);
            state.force_direction(dir);
            assert_eq!(
                state.advance(),
                TickOutcome::Collided(CollisionKind::Wall),
                "{:?} {:?}",
                head,
                dir
            );
        }
    }

    #[test]
    fn test_moving_into_tail_cell_is_a_collision() {
        // A 2x2 loop: the head wants the cell the tail is about to vacate.
        let mut state = game(10, 10);
        state.place_snake([
            Position::new(3, 3),
            Position::new(3, 4),
            Position::new(4, 4),
            Position::new(4, 3),
        ]);
        state.force_direction(Direction::Right);
        state.place_food(Position::new(0, 0));

        assert_eq!(
            state.advance(),
            TickOutcome::Collided(CollisionKind::SelfHit)
        );
        assert!(state.game_over);
    }

    #[test]
    fn test_bounds_checked_before_body() {
        // Head off-grid and the target cell also listed in the body.
        let mut state = game(10, 10);
        state.place_snake([Position::new(10, 0), Position::new(11, 0)]);
        state.force_direction(Direction::Right);
        assert_eq!(
            state.advance(),
            TickOutcome::Collided(CollisionKind::Wall)
        );
    }

    #[test]
    fn test_game_over_stops_game() {
        let mut state = game(10, 10);
        state.place_snake([Position::new(9, 0)]);
        state.advance();
        assert!(state.game_over);

        let before = body(&state);
        assert_eq!(state.advance(), TickOutcome::Idle);
        assert_eq!(body(&state), before);
    }

    #[test]
    fn test_collision_persists_better_score() {
        let mut state = game(10, 10);
        state.set_score(100);
        state.place_snake([Position::new(9, 0)]);
        state.advance();
        assert!(state.game_over);
        assert_eq!(state.high_score(), 100);
        assert_eq!(state.store().get(), 100);
    }

    #[test]
    fn test_record_compares_against_the_store() {
        let mut state = game(10, 10);
        state.place_food(Position::new(6, 5));
        state.advance();
        assert_eq!(state.high_score(), 10);

        // The record was wiped behind the game's back; the displayed 10 is
        // stale, so a score of 5 is still a new record.
        state.store.clear();
        state.set_score(5);
        state.place_snake([Position::new(9, 0)]);
        state.advance();
        assert!(state.game_over);
        assert_eq!(state.store().get(), 5);
        assert_eq!(state.high_score(), 5);
    }

    #[test]
    fn test_record_not_lowered_by_stale_display() {
        let mut state = game(10, 10);
        state.store.set(500);
        state.set_score(300);
        state.place_snake([Position::new(9, 0)]);
        state.advance();
        assert_eq!(state.store().get(), 500);
        assert_eq!(state.high_score(), 500);
    }

    #[test]
    fn test_set_direction_refuses_reversal() {
        let mut state = game(10, 10);
        assert!(!state.set_direction(Direction::Left));
        assert_eq!(state.direction, Direction::Right);

        assert!(state.set_direction(Direction::Up));
        assert_eq!(state.direction, Direction::Up);
        assert!(!state.set_direction(Direction::Down));
        assert_eq!(state.direction, Direction::Up);
    }

    #[test]
    fn test_two_turns_within_one_tick_fold_into_body() {
        let mut state = game(10, 10);
        state.place_snake([Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)]);
        state.place_food(Position::new(0, 0));

        // Only the queued direction is checked, so Left after Up is taken
        // and the next tick runs into the neck.
        assert!(state.set_direction(Direction::Up));
        assert!(state.set_direction(Direction::Left));
        assert_eq!(state.direction, Direction::Left);
        assert_eq!(
            state.advance(),
            TickOutcome::Collided(CollisionKind::SelfHit)
        );
        assert!(state.game_over);
        assert_eq!(state.head(), Position::new(5, 5));
    }

    #[test]
    fn test_latest_turn_before_tick_wins() {
        let mut state = game(10, 10);
        state.place_food(Position::new(0, 0));
        assert!(state.set_direction(Direction::Up));
        assert!(state.set_direction(Direction::Right));
        assert!(state.set_direction(Direction::Down));
        state.advance();
        assert_eq!(state.head(), Position::new(5, 6));
    }

    #[test]
    fn test_reset_restores_initial_run() {
        let mut state = game(10, 10);
        state.place_food(Position::new(6, 5));
        state.advance();
        state.place_snake([Position::new(9, 9)]);
        state.advance();
        assert!(state.game_over);

        state.reset();
        assert_eq!(body(&state), vec![SPAWN]);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert_eq!(state.run_id, 1);
        assert_eq!(state.high_score, 10);
    }

    #[test]
    fn test_resize_applies_on_reset() {
        let mut state = game(10, 10);
        state.resize(grid(20, 12));
        assert_eq!(state.grid, grid(10, 10));
        state.reset();
        assert_eq!(state.grid, grid(20, 12));
    }

    #[test]
    fn test_food_never_lands_on_snake() {
        let mut state = game(6, 6);
        // Fill everything except two cells.
        let mut cells: Vec<Position> = (0..36).map(|i| state.grid.position_at(i)).collect();
        cells.retain(|&p| p != Position::new(0, 0) && p != Position::new(5, 5));
        state.place_snake(cells);
        for _ in 0..50 {
            state.spawn_food();
            assert!(
                state.food == Position::new(0, 0) || state.food == Position::new(5, 5),
                "{:?}",
                state.food
            );
        }
    }

    #[test]
    fn test_full_grid_keeps_previous_food() {
        let mut state = game(6, 6);
        state.place_food(Position::new(2, 2));
        let cells: Vec<Position> = (0..36).map(|i| state.grid.position_at(i)).collect();
        state.place_snake(cells);
        state.spawn_food();
        assert_eq!(state.food, Position::new(2, 2));
    }

    #[test]
    fn test_place_snake_rejects_empty() {
        let mut state = game(10, 10);
        assert!(!state.place_snake(std::iter::empty()));
        assert_eq!(state.snake_len(), 1);
    }

    #[test]
    fn test_clear_high_score() {
        let mut state = game(10, 10);
        state.place_food(Position::new(6, 5));
        state.advance();
        state.clear_high_score();
        assert_eq!(state.high_score(), 0);
        assert_eq!(state.store().get(), 0);
    }

    #[test]
    fn test_same_seed_same_food() {
        let a = game(10, 10);
        let b = game(10, 10);
        assert_eq!(a.food, b.food);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        let mut state = game(12, 8);
        state.place_food(Position::new(6, 5));
        state.advance();
        let snap = state.snapshot();
        assert_eq!(snap.snake, vec![Position::new(6, 5), Position::new(5, 5)]);
        assert_eq!(snap.head(), Some(Position::new(6, 5)));
        assert_eq!(snap.food, state.food);
        assert_eq!(snap.score, 10);
        assert_eq!(snap.high_score, 10);
        assert_eq!((snap.grid_width, snap.grid_height), (12, 8));
        assert!(snap.playable());
    }
}
