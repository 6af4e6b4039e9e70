//! Key and mouse mapping from terminal events to input symbols.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
};

use crate::translator::{InputEvent, InputSymbol};

/// Terminal glyphs are roughly twice as tall as they are wide, so a row
/// counts double when comparing drag displacement.
const ROW_ASPECT: i32 = 2;

/// Map a key press to an input symbol.
pub fn symbol_for_key(key: KeyEvent) -> Option<InputSymbol> {
    if should_quit(key) {
        return Some(InputSymbol::Quit);
    }
    match key.code {
        KeyCode::Up => Some(InputSymbol::Up),
        KeyCode::Down => Some(InputSymbol::Down),
        KeyCode::Left => Some(InputSymbol::Left),
        KeyCode::Right => Some(InputSymbol::Right),

        KeyCode::Char('w') | KeyCode::Char('W') => Some(InputSymbol::W),
        KeyCode::Char('a') | KeyCode::Char('A') => Some(InputSymbol::A),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(InputSymbol::S),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(InputSymbol::D),

        KeyCode::Char(' ') => Some(InputSymbol::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(
        key.code,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
    ) || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Translate a raw crossterm event.
///
/// Left-button mouse drags stand in for touch swipes. Key repeats and
/// releases are ignored.
pub fn input_event(event: &Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            symbol_for_key(*key).map(InputEvent::Symbol)
        }
        Event::Mouse(mouse) => {
            let x = mouse.column as i32;
            let y = mouse.row as i32 * ROW_ASPECT;
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(InputEvent::PointerDown { x, y }),
                MouseEventKind::Drag(MouseButton::Left) => Some(InputEvent::PointerMove { x, y }),
                MouseEventKind::Up(MouseButton::Left) => Some(InputEvent::PointerUp),
                _ => None,
            }
        }
        _ => None,
    }
}
