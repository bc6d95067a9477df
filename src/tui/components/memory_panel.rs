//! # Memory Panel Component
//!
//! Overlay listing the memory registers, most recent first. Same shape as
//! the history panel: persistent state in `TuiState`, transient wrapper per
//! frame.

use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use super::centered_rect;
use super::history_panel::PanelEvent;
use crate::tui::event::TuiEvent;

pub struct MemoryPanelState {
    pub selected: usize,
    pub list_state: ListState,
}

impl MemoryPanelState {
    pub fn new(entry_count: usize) -> Self {
        let mut list_state = ListState::default();
        if entry_count > 0 {
            list_state.select(Some(0));
        }
        Self {
            selected: 0,
            list_state,
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent, entry_count: usize) -> Option<PanelEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::ToggleMemory => Some(PanelEvent::Dismiss),
            TuiEvent::Press(crate::core::key::Key::Clear) => Some(PanelEvent::ClearAll),
            TuiEvent::CursorUp => {
                if entry_count > 0 {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if entry_count > 0 {
                    self.selected = (self.selected + 1).min(entry_count - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            _ => None,
        }
    }
}

pub struct MemoryPanel<'a> {
    state: &'a mut MemoryPanelState,
    entries: &'a VecDeque<String>,
}

impl<'a> MemoryPanel<'a> {
    pub fn new(state: &'a mut MemoryPanelState, entries: &'a VecDeque<String>) -> Self {
        Self { state, entries }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(50, 60, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Memory ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" c Clear all  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        if self.entries.is_empty() {
            let empty = Paragraph::new("No stored values.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(entry.as_str(), style).right_aligned())
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}
