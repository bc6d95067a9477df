//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! Two patterns, both borrowed data, no globals:
//!
//! - **Stateless (props-based)**: `Display` receives the two display lines
//!   each frame and just paints them.
//! - **Stateful (event-driven)**: `Keypad` keeps a button-rect cache for
//!   mouse hit testing; `HistoryPanel`/`MemoryPanel` keep list selection
//!   state and emit `PanelEvent`s back to the event loop.
//!
//! Components receive core data as parameters (snapshots from the
//! `Calculator`), never by reaching into shared state.

pub mod display;
pub mod history_panel;
pub mod keypad;
pub mod memory_panel;

pub use display::Display;
pub use history_panel::{HistoryPanel, HistoryPanelState, PanelEvent};
pub use keypad::{Keypad, KeypadState};
pub use memory_panel::{MemoryPanel, MemoryPanelState};

use ratatui::layout::{Constraint, Layout, Rect};

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
