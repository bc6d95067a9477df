//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard and mouse events into core `Key` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//! The core never calls into rendering; the loop here reads a fresh
//! snapshot after every handled event and paints it.
//!
//! ## Redraw Strategy
//!
//! The event loop only redraws after an input event arrived; idle polls
//! (250ms) cost nothing. All pending events are drained before the next
//! draw so a burst of keypresses renders once.
//!
//! ## Event Routing
//!
//! An open panel owns the event stream: keys go to it until it is
//! dismissed. Core mutation always commits before the next draw is
//! attempted, so a rendering failure can never corrupt calculator state.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;

use crate::core::config::ResolvedConfig;
use crate::core::state::Calculator;
use crate::tui::components::{HistoryPanelState, KeypadState, MemoryPanelState, PanelEvent};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core calculator logic)
#[derive(Default)]
pub struct TuiState {
    pub keypad: KeypadState,
    /// History overlay (None = hidden)
    pub history_panel: Option<HistoryPanelState>,
    /// Memory overlay (None = hidden)
    pub memory_panel: Option<MemoryPanelState>,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            keypad: KeypadState::new(),
            history_panel: config.show_history.then(|| HistoryPanelState::new(0)),
            memory_panel: config.show_memory.then(|| MemoryPanelState::new(0)),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse capture)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut calc = Calculator::new();
    let mut tui = TuiState::new(&config);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let mut needs_redraw = true; // Force first frame
    let mut should_quit = false;

    while !should_quit {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &calc, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(std::time::Duration::from_millis(250));
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // Ctrl+C always quits regardless of open panels
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit = true;
                continue;
            }

            // When a panel is open, route all events to it
            if let Some(ref mut panel) = tui.memory_panel {
                if let Some(panel_event) = panel.handle_event(&event, calc.memory_list().len()) {
                    match panel_event {
                        PanelEvent::ClearAll => {
                            info!("Memory cleared from panel");
                            calc.clear_memory();
                            tui.memory_panel = Some(MemoryPanelState::new(0));
                        }
                        PanelEvent::Dismiss => tui.memory_panel = None,
                    }
                }
                continue;
            }
            if let Some(ref mut panel) = tui.history_panel {
                if let Some(panel_event) = panel.handle_event(&event, calc.history_list().len()) {
                    match panel_event {
                        PanelEvent::ClearAll => {
                            info!("History cleared from panel");
                            calc.clear_history();
                            tui.history_panel = Some(HistoryPanelState::new(0));
                        }
                        PanelEvent::Dismiss => tui.history_panel = None,
                    }
                }
                continue;
            }

            match event {
                TuiEvent::Press(key) => {
                    let display = calc.handle_key(key);
                    debug!("display: {:?} | {:?}", display.expression_text, display.result_text);
                }
                TuiEvent::MouseMove(x, y) => {
                    tui.keypad.hover_at(x, y);
                }
                TuiEvent::MouseClick(x, y) => {
                    if let Some(key) = tui.keypad.key_at(x, y) {
                        calc.handle_key(key);
                    }
                }
                TuiEvent::ToggleHistory => {
                    tui.history_panel = Some(HistoryPanelState::new(calc.history_list().len()));
                }
                TuiEvent::ToggleMemory => {
                    tui.memory_panel = Some(MemoryPanelState::new(calc.memory_list().len()));
                }
                TuiEvent::Escape => should_quit = true,
                // Cursor keys only matter inside a panel
                TuiEvent::CursorUp | TuiEvent::CursorDown => {}
                TuiEvent::Resize | TuiEvent::ForceQuit => {}
            }
        }
    }

    ratatui::restore();
    Ok(())
}
