//! # Core Calculator Logic
//!
//! This module contains Tally's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (Calculator)   │
//!                    │  • Key (keypad events)  │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │    GUI     │      │   tests    │
//!     │  Adapter   │      │  Adapter   │      │            │
//!     │ (ratatui)  │      │  (future)  │      │            │
//!     └────────────┘      └────────────┘      └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `Calculator` struct — all calculator state in one place
//! - [`key`]: The `Key` enum (every keypad press) and the `update` reducer
//! - [`math`]: Pure arithmetic, number parsing, display formatting
//! - [`memory`]: The MS/M+/M−/MR/MC register stack
//! - [`history`]: The completed-calculations log
//! - [`config`]: TOML configuration with CLI overrides

pub mod config;
pub mod history;
pub mod key;
pub mod math;
pub mod memory;
pub mod state;
