//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use crate::core::key::{Key, UnaryOp};
use crate::core::math::Op;
use crate::core::state::{Calculator, DisplayState};

/// Translate one test-script character into a keypad key.
///
/// Digits and the arithmetic characters map directly; the rest use
/// mnemonics: `n` = `±`, `r` = `1/x`, `q` = `x²`, `s` = `√x`,
/// `C` = clear, `E` = clear entry, `<` = backspace.
pub fn key_for(c: char) -> Key {
    match c {
        '0'..='9' => Key::Digit(c as u8 - b'0'),
        '.' => Key::Decimal,
        '+' => Key::Op(Op::Add),
        '-' => Key::Op(Op::Subtract),
        '*' => Key::Op(Op::Multiply),
        '/' => Key::Op(Op::Divide),
        '=' => Key::Equals,
        '%' => Key::Percent,
        'n' => Key::Negate,
        'r' => Key::Unary(UnaryOp::Reciprocal),
        'q' => Key::Unary(UnaryOp::Square),
        's' => Key::Unary(UnaryOp::Sqrt),
        'C' => Key::Clear,
        'E' => Key::ClearEntry,
        '<' => Key::Backspace,
        other => panic!("no key mapping for test character {other:?}"),
    }
}

/// Feed a whole key script through the calculator, returning the final
/// display snapshot.
pub fn press_all(calc: &mut Calculator, script: &str) -> DisplayState {
    let mut display = calc.display();
    for c in script.chars() {
        display = calc.handle_key(key_for(c));
    }
    display
}
