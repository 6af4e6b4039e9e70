//! Turns input symbols and swipes into game commands.

use crate::core::GameState;
use crate::types::Direction;

/// A discrete, host-independent input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    Up,
    Down,
    Left,
    Right,
    /// Alias for [`InputSymbol::Up`]
    W,
    /// Alias for [`InputSymbol::Left`]
    A,
    /// Alias for [`InputSymbol::Down`]
    S,
    /// Alias for [`InputSymbol::Right`]
    D,
    /// Start a new run; only honoured once the current one is over.
    Restart,
    Quit,
}

impl InputSymbol {
    /// Direction bound to this symbol, if any.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            InputSymbol::Up | InputSymbol::W => Some(Direction::Up),
            InputSymbol::Down | InputSymbol::S => Some(Direction::Down),
            InputSymbol::Left | InputSymbol::A => Some(Direction::Left),
            InputSymbol::Right | InputSymbol::D => Some(Direction::Right),
            InputSymbol::Restart | InputSymbol::Quit => None,
        }
    }
}

/// Raw input after host decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Symbol(InputSymbol),
    /// Start of a swipe/drag.
    PointerDown { x: i32, y: i32 },
    /// Pointer moved while pressed; the first move after a press decides the swipe.
    PointerMove { x: i32, y: i32 },
    PointerUp,
}

/// What an input did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEffect {
    None,
    Turned(Direction),
    Restarted,
    Quit,
}

/// Direction of a swipe with displacement `(dx, dy)`.
///
/// The axis with the larger magnitude wins; ties go to the vertical axis.
/// No displacement means no swipe.
pub fn swipe_direction(dx: i32, dy: i32) -> Option<Direction> {
    if dx == 0 && dy == 0 {
        return None;
    }
    if dx.abs() > dy.abs() {
        Some(if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else {
        Some(if dy > 0 { Direction::Down } else { Direction::Up })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputTranslator {
    swipe_start: Option<(i32, i32)>,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn swipe_pending(&self) -> bool {
        self.swipe_start.is_some()
    }

    /// Apply one input to `game`.
    pub fn translate(&mut self, event: InputEvent, game: &mut GameState) -> InputEffect {
        match event {
            InputEvent::Symbol(InputSymbol::Quit) => InputEffect::Quit,
            InputEvent::Symbol(InputSymbol::Restart) => {
                if game.game_over() {
                    game.reset();
                    InputEffect::Restarted
                } else {
                    InputEffect::None
                }
            }
            InputEvent::Symbol(symbol) => match symbol.direction() {
                Some(dir) => Self::steer(dir, game),
                None => InputEffect::None,
            },
            InputEvent::PointerDown { x, y } => {
                self.swipe_start = Some((x, y));
                InputEffect::None
            }
            InputEvent::PointerMove { x, y } => {
                let Some((sx, sy)) = self.swipe_start.take() else {
                    return InputEffect::None;
                };
                match swipe_direction(x - sx, y - sy) {
                    Some(dir) => Self::steer(dir, game),
                    None => InputEffect::None,
                }
            }
            InputEvent::PointerUp => {
                self.swipe_start = None;
                InputEffect::None
            }
        }
    }

    fn steer(dir: Direction, game: &mut GameState) -> InputEffect {
        if dir.is_opposite(game.direction()) {
            return InputEffect::None;
        }
        if game.set_direction(dir) {
            InputEffect::Turned(dir)
        } else {
            InputEffect::None
        }
    }
}
