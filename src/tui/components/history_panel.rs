//! # History Panel Component
//!
//! Overlay listing completed calculations, newest first. Opened with `h`,
//! dismissed with Esc (or `h` again), cleared with `x`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HistoryPanelState` lives in `TuiState`
//! - `HistoryPanel` is created each frame with borrowed state

use std::collections::VecDeque;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph};

use super::centered_rect;
use crate::core::history::HistoryRecord;
use crate::tui::event::TuiEvent;

/// Persistent state for the history overlay.
pub struct HistoryPanelState {
    pub selected: usize,
    pub list_state: ListState,
}

impl HistoryPanelState {
    pub fn new(record_count: usize) -> Self {
        let mut list_state = ListState::default();
        if record_count > 0 {
            list_state.select(Some(0));
        }
        Self {
            selected: 0,
            list_state,
        }
    }

    /// Handle a key event, returning a PanelEvent if the overlay should act.
    pub fn handle_event(&mut self, event: &TuiEvent, record_count: usize) -> Option<PanelEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::ToggleHistory => Some(PanelEvent::Dismiss),
            TuiEvent::Press(crate::core::key::Key::Clear) => Some(PanelEvent::ClearAll),
            TuiEvent::CursorUp => {
                if record_count > 0 {
                    self.selected = self.selected.saturating_sub(1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::CursorDown => {
                if record_count > 0 {
                    self.selected = (self.selected + 1).min(record_count - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            _ => None,
        }
    }
}

/// Events emitted by either side panel.
pub enum PanelEvent {
    ClearAll,
    Dismiss,
}

/// Transient render wrapper for the history overlay.
pub struct HistoryPanel<'a> {
    state: &'a mut HistoryPanelState,
    records: &'a VecDeque<HistoryRecord>,
}

impl<'a> HistoryPanel<'a> {
    pub fn new(state: &'a mut HistoryPanelState, records: &'a VecDeque<HistoryRecord>) -> Self {
        Self { state, records }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 70, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" History ")
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(" c Clear all  Esc Close ").centered())
            .padding(Padding::horizontal(1));

        if self.records.is_empty() {
            let empty = Paragraph::new("Nothing calculated yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, overlay);
            return;
        }

        let items: Vec<ListItem> = self
            .records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let style = if i == self.state.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::styled(record.display(), style))
            })
            .collect();

        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, overlay, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn records() -> VecDeque<HistoryRecord> {
        VecDeque::from(vec![
            HistoryRecord {
                expression: "2 × 3".into(),
                result: "6".into(),
            },
            HistoryRecord {
                expression: "1 + 1".into(),
                result: "2".into(),
            },
        ])
    }

    fn render_to_text(records: &VecDeque<HistoryRecord>) -> String {
        let backend = TestBackend::new(60, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = HistoryPanelState::new(records.len());
        terminal
            .draw(|f| HistoryPanel::new(&mut state, records).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_records_newest_first() {
        let text = render_to_text(&records());
        assert!(text.contains("2 × 3 = 6"));
        assert!(text.contains("1 + 1 = 2"));
        assert!(text.find("2 × 3 = 6").unwrap() < text.find("1 + 1 = 2").unwrap());
    }

    #[test]
    fn renders_placeholder_when_empty() {
        let text = render_to_text(&VecDeque::new());
        assert!(text.contains("Nothing calculated yet."));
    }

    #[test]
    fn escape_dismisses() {
        let mut state = HistoryPanelState::new(2);
        assert!(matches!(
            state.handle_event(&TuiEvent::Escape, 2),
            Some(PanelEvent::Dismiss)
        ));
    }

    #[test]
    fn cursor_keys_move_the_selection_within_bounds() {
        let mut state = HistoryPanelState::new(2);
        assert!(state.handle_event(&TuiEvent::CursorDown, 2).is_none());
        assert_eq!(state.selected, 1);
        state.handle_event(&TuiEvent::CursorDown, 2);
        assert_eq!(state.selected, 1);
        state.handle_event(&TuiEvent::CursorUp, 2);
        assert_eq!(state.selected, 0);
        state.handle_event(&TuiEvent::CursorUp, 2);
        assert_eq!(state.selected, 0);
    }
}
