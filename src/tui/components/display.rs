//! # Display Component
//!
//! The calculator's two-line readout: the expression line (what has been
//! committed so far, e.g. `5 +`) above the result line (the numeral being
//! entered or the latest result). Purely presentational: both lines arrive
//! as props straight from the core's `DisplayState`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::tui::component::Component;

pub struct Display<'a> {
    pub expression: &'a str,
    pub result: &'a str,
}

impl<'a> Display<'a> {
    pub fn new(expression: &'a str, result: &'a str) -> Self {
        Self { expression, result }
    }
}

impl Component for Display<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let result_style = if self.result == "Error" {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };

        let lines = vec![
            Line::styled(self.expression, Style::default().fg(Color::DarkGray)),
            Line::styled(self.result, result_style),
        ];

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Right)
            .block(Block::bordered().padding(Padding::horizontal(1)));

        frame.render_widget(paragraph, area);
    }
}
