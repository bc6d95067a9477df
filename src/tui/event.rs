use crossterm::event::{self, Event, KeyCode, KeyModifiers, MouseEventKind};

use crate::core::key::{Key, UnaryOp};
use crate::core::math::Op;

/// TUI-specific input events
pub enum TuiEvent {
    // Keypad presses (passed to core::key::update)
    Press(Key),

    // TUI-local events (handled directly in the event loop)
    ToggleHistory,
    ToggleMemory,
    MouseMove(u16, u16),
    MouseClick(u16, u16),
    CursorUp,
    CursorDown,
    Resize,
    Escape,
    ForceQuit,
}

/// Poll for an event with timeout (blocks up to the given duration)
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    if !event::poll(timeout).unwrap_or(false) {
        return None;
    }
    let Ok(event) = event::read() else {
        return None;
    };
    match event {
        Event::Key(key_event) => {
            log::debug!(
                "Key event: {:?} with modifiers {:?}",
                key_event.code,
                key_event.modifiers
            );
            translate_key(key_event.modifiers, key_event.code)
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::Moved => {
                Some(TuiEvent::MouseMove(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::Down(_) => {
                Some(TuiEvent::MouseClick(mouse_event.column, mouse_event.row))
            }
            MouseEventKind::ScrollUp => Some(TuiEvent::CursorUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::CursorDown),
            _ => None,
        },
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Map a terminal key chord to a TUI event.
///
/// The bindings follow the desktop-calculator conventions: `r` for `1/x`,
/// `q` for `x²`, `@` for `√x`, and the Ctrl chords for the memory row
/// (Ctrl+P `M+`, Ctrl+Q `M−`, Ctrl+M `MS`, Ctrl+R `MR`, Ctrl+L `MC`).
fn translate_key(modifiers: KeyModifiers, code: KeyCode) -> Option<TuiEvent> {
    match (modifiers, code) {
        // Ctrl+C always quits
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::ForceQuit),

        // Memory chords
        (KeyModifiers::CONTROL, KeyCode::Char('p')) => Some(TuiEvent::Press(Key::MemoryAdd)),
        (KeyModifiers::CONTROL, KeyCode::Char('q')) => Some(TuiEvent::Press(Key::MemorySubtract)),
        (KeyModifiers::CONTROL, KeyCode::Char('m')) => Some(TuiEvent::Press(Key::MemoryStore)),
        (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(TuiEvent::Press(Key::MemoryRecall)),
        (KeyModifiers::CONTROL, KeyCode::Char('l')) => Some(TuiEvent::Press(Key::MemoryClear)),

        (_, KeyCode::Char(c @ '0'..='9')) => Some(TuiEvent::Press(Key::Digit(c as u8 - b'0'))),
        (_, KeyCode::Char('.')) => Some(TuiEvent::Press(Key::Decimal)),
        (_, KeyCode::Char('+')) => Some(TuiEvent::Press(Key::Op(Op::Add))),
        (_, KeyCode::Char('-')) => Some(TuiEvent::Press(Key::Op(Op::Subtract))),
        (_, KeyCode::Char('*')) => Some(TuiEvent::Press(Key::Op(Op::Multiply))),
        (_, KeyCode::Char('/')) => Some(TuiEvent::Press(Key::Op(Op::Divide))),
        (_, KeyCode::Char('=')) | (_, KeyCode::Enter) => Some(TuiEvent::Press(Key::Equals)),
        (_, KeyCode::Char('%')) => Some(TuiEvent::Press(Key::Percent)),

        (_, KeyCode::Char('r')) => Some(TuiEvent::Press(Key::Unary(UnaryOp::Reciprocal))),
        (_, KeyCode::Char('q')) => Some(TuiEvent::Press(Key::Unary(UnaryOp::Square))),
        (_, KeyCode::Char('@')) => Some(TuiEvent::Press(Key::Unary(UnaryOp::Sqrt))),
        (_, KeyCode::Char('n')) | (_, KeyCode::F(9)) => Some(TuiEvent::Press(Key::Negate)),

        (_, KeyCode::Char('c')) | (_, KeyCode::Char('C')) => Some(TuiEvent::Press(Key::Clear)),
        (_, KeyCode::Delete) => Some(TuiEvent::Press(Key::ClearEntry)),
        (_, KeyCode::Backspace) => Some(TuiEvent::Press(Key::Backspace)),

        (_, KeyCode::Char('h')) => Some(TuiEvent::ToggleHistory),
        (_, KeyCode::Char('m')) => Some(TuiEvent::ToggleMemory),

        (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        _ => None,
    }
}
