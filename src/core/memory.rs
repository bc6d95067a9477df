//! # Memory Register Stack
//!
//! An ordered stack of stored values, most-recent-first, driven by the
//! `MS`/`M+`/`M−`/`MR`/`MC` keypad commands. Entries are kept as formatted
//! numeral strings, so stored precision is exactly display precision.
//! Every operation is O(1).

use std::collections::VecDeque;

use crate::core::math::{format_number, parse_number};

/// The calculator's memory registers.
#[derive(Debug, Default)]
pub struct MemoryBank {
    /// Most-recent entry at the front.
    entries: VecDeque<String>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// `MS`: push a new register holding `value`.
    pub fn store(&mut self, value: f64) {
        self.entries.push_front(format_number(value));
    }

    /// `M+`: add `value` into the most-recent register, or store it if the
    /// bank is empty.
    pub fn add(&mut self, value: f64) {
        match self.entries.front_mut() {
            Some(top) => {
                if let Ok(current) = parse_number(top) {
                    *top = format_number(current + value);
                }
            }
            None => self.store(value),
        }
    }

    /// `M−`: subtract `value` from the most-recent register, or store the
    /// negated value if the bank is empty.
    pub fn subtract(&mut self, value: f64) {
        match self.entries.front_mut() {
            Some(top) => {
                if let Ok(current) = parse_number(top) {
                    *top = format_number(current - value);
                }
            }
            None => self.store(-value),
        }
    }

    /// `MR`: the most-recent register, if any.
    pub fn recall(&self) -> Option<&str> {
        self.entries.front().map(String::as_str)
    }

    /// `MC`: drop every register.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read-only snapshot, most-recent-first.
    pub fn list(&self) -> &VecDeque<String> {
        &self.entries
    }
}
