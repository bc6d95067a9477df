//! # Keypad Component
//!
//! The button grid: a memory-command row on top of the classic 6×4
//! calculator layout. Buttons highlight under the mouse and dispatch their
//! `Key` on click; hit testing runs against the rect cache filled in during
//! the render pass, so the event loop never recomputes the layout.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::core::key::{Key, UnaryOp};
use crate::core::math::Op;
use crate::tui::component::Component;

struct Button {
    caption: &'static str,
    key: Key,
}

const fn button(caption: &'static str, key: Key) -> Button {
    Button { caption, key }
}

/// Keypad rows, top to bottom: the classic desktop layout with the memory
/// commands above it.
const ROWS: &[&[Button]] = &[
    &[
        button("MC", Key::MemoryClear),
        button("MR", Key::MemoryRecall),
        button("M+", Key::MemoryAdd),
        button("M−", Key::MemorySubtract),
        button("MS", Key::MemoryStore),
    ],
    &[
        button("%", Key::Percent),
        button("CE", Key::ClearEntry),
        button("C", Key::Clear),
        button("⌫", Key::Backspace),
    ],
    &[
        button("1/x", Key::Unary(UnaryOp::Reciprocal)),
        button("x²", Key::Unary(UnaryOp::Square)),
        button("√x", Key::Unary(UnaryOp::Sqrt)),
        button("÷", Key::Op(Op::Divide)),
    ],
    &[
        button("7", Key::Digit(7)),
        button("8", Key::Digit(8)),
        button("9", Key::Digit(9)),
        button("×", Key::Op(Op::Multiply)),
    ],
    &[
        button("4", Key::Digit(4)),
        button("5", Key::Digit(5)),
        button("6", Key::Digit(6)),
        button("−", Key::Op(Op::Subtract)),
    ],
    &[
        button("1", Key::Digit(1)),
        button("2", Key::Digit(2)),
        button("3", Key::Digit(3)),
        button("+", Key::Op(Op::Add)),
    ],
    &[
        button("±", Key::Negate),
        button("0", Key::Digit(0)),
        button(".", Key::Decimal),
        button("=", Key::Equals),
    ],
];

/// Persistent keypad state: the button-rect cache and the hover target.
pub struct KeypadState {
    /// (screen rect, key) per button, refreshed every render.
    rects: Vec<(Rect, Key)>,
    hovered: Option<usize>,
}

impl KeypadState {
    pub fn new() -> Self {
        Self {
            rects: Vec::new(),
            hovered: None,
        }
    }

    /// Update the hover target from a mouse position. Returns true when the
    /// highlighted button changed (i.e. a redraw is due).
    pub fn hover_at(&mut self, x: u16, y: u16) -> bool {
        let hit = self.index_at(x, y);
        let changed = hit != self.hovered;
        self.hovered = hit;
        changed
    }

    /// The key under a mouse position, if any.
    pub fn key_at(&self, x: u16, y: u16) -> Option<Key> {
        self.index_at(x, y).map(|i| self.rects[i].1)
    }

    fn index_at(&self, x: u16, y: u16) -> Option<usize> {
        self.rects
            .iter()
            .position(|(rect, _)| rect.contains(ratatui::layout::Position { x, y }))
    }
}

impl Default for KeypadState {
    fn default() -> Self {
        Self::new()
    }
}

/// Transient render wrapper borrowing the persistent state.
pub struct Keypad<'a> {
    state: &'a mut KeypadState,
    memory_empty: bool,
}

impl<'a> Keypad<'a> {
    pub fn new(state: &'a mut KeypadState, memory_empty: bool) -> Self {
        Self {
            state,
            memory_empty,
        }
    }

    fn button_style(&self, button: &Button, index: usize) -> Style {
        // MC and MR have nothing to act on while the bank is empty; the
        // original hides them, we dim them.
        let inactive = self.memory_empty
            && matches!(button.key, Key::MemoryClear | Key::MemoryRecall);

        let base = match button.key {
            _ if inactive => Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            Key::Op(_) | Key::Equals => Style::default().fg(Color::Cyan),
            Key::Digit(_) | Key::Decimal => Style::default().add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::Gray),
        };

        if self.state.hovered == Some(index) {
            base.bg(Color::DarkGray)
        } else {
            base
        }
    }
}

impl Component for Keypad<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.rects.clear();

        let row_areas = Layout::vertical(vec![
            Constraint::Ratio(1, ROWS.len() as u32);
            ROWS.len()
        ])
        .split(area);

        let mut index = 0;
        for (row, row_area) in ROWS.iter().zip(row_areas.iter()) {
            let col_areas = Layout::horizontal(vec![
                Constraint::Ratio(1, row.len() as u32);
                row.len()
            ])
            .split(*row_area);

            for (btn, btn_area) in row.iter().zip(col_areas.iter()) {
                let style = self.button_style(btn, index);
                let widget = Paragraph::new(btn.caption)
                    .alignment(Alignment::Center)
                    .style(style)
                    .block(Block::bordered().border_style(style));
                frame.render_widget(widget, *btn_area);
                self.state.rects.push((*btn_area, btn.key));
                index += 1;
            }
        }
    }
}
