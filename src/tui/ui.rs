use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::core::state::Calculator;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Display, HistoryPanel, Keypad, MemoryPanel};

pub fn draw_ui(frame: &mut Frame, calc: &Calculator, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(4), Min(0), Length(1)]);
    let [display_area, keypad_area, status_area] = layout.areas(frame.area());

    let snapshot = calc.display();
    Display::new(&snapshot.expression_text, &snapshot.result_text).render(frame, display_area);

    Keypad::new(&mut tui.keypad, calc.memory_list().is_empty()).render(frame, keypad_area);

    draw_status_bar(frame, status_area, calc);

    // Overlays draw last, over the whole frame
    if let Some(ref mut panel) = tui.history_panel {
        HistoryPanel::new(panel, calc.history_list()).render(frame, frame.area());
    }
    if let Some(ref mut panel) = tui.memory_panel {
        MemoryPanel::new(panel, calc.memory_list()).render(frame, frame.area());
    }
}

fn draw_status_bar(frame: &mut Frame, area: Rect, calc: &Calculator) {
    let hint_style = Style::default().fg(Color::DarkGray);
    let mut spans = vec![Span::styled(
        " h History  m Memory  c Clear  Esc Quit",
        hint_style,
    )];

    // Register count indicator, right after the hints
    if !calc.memory_list().is_empty() {
        spans.push(Span::styled(
            format!("  |  M:{}", calc.memory_list().len()),
            Style::default().fg(Color::Cyan),
        ));
    }

    frame.render_widget(Line::from(spans), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::key::Key;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(calc: &Calculator, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(60, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, calc, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_draw_ui() {
        let calc = Calculator::new();
        let mut tui = TuiState::default();
        let text = render_to_text(&calc, &mut tui);
        assert!(text.contains('0')); // result line placeholder
        assert!(text.contains("h History"));
    }

    #[test]
    fn status_bar_counts_memory_registers() {
        let mut calc = Calculator::new();
        calc.handle_key(Key::Digit(5));
        calc.handle_key(Key::MemoryStore);
        calc.handle_key(Key::MemoryStore);
        let mut tui = TuiState::default();
        let text = render_to_text(&calc, &mut tui);
        assert!(text.contains("M:2"));
    }

    #[test]
    fn history_overlay_draws_on_top() {
        let mut calc = Calculator::new();
        crate::test_support::press_all(&mut calc, "1+1=");
        let mut tui = TuiState::default();
        tui.history_panel = Some(crate::tui::components::HistoryPanelState::new(
            calc.history_list().len(),
        ));
        let text = render_to_text(&calc, &mut tui);
        assert!(text.contains(" History "));
        assert!(text.contains("1 + 1 = 2"));
    }
}
