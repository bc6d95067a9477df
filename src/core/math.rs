//! # Arithmetic Engine
//!
//! Pure numeric operations for the calculator. Every function here is
//! stateless: same inputs, same outputs, including the display formatting.
//! Failures come back as [`MathError`] values; the entry controller turns
//! them into the `"Error"` display sentinel, so nothing in this module ever
//! reaches the screen as a raw NaN or infinity.

use std::fmt;

/// A binary keypad operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Op {
    /// Display glyph, matching the keypad captions.
    pub fn glyph(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Subtract => "−",
            Op::Multiply => "×",
            Op::Divide => "÷",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Why an arithmetic operation could not produce a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Division (or reciprocal) with a zero divisor.
    DivisionByZero,
    /// Input outside the operation's domain, e.g. `sqrt` of a negative.
    Domain,
    /// The display text could not be parsed as a number.
    InvalidNumber,
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DivisionByZero => write!(f, "division by zero"),
            MathError::Domain => write!(f, "input outside operation domain"),
            MathError::InvalidNumber => write!(f, "not a valid number"),
        }
    }
}

impl std::error::Error for MathError {}

/// Evaluate `a op b` with IEEE-754 double arithmetic.
///
/// Division by zero is reported as an error instead of the native infinity.
pub fn evaluate_binary(a: f64, op: Op, b: f64) -> Result<f64, MathError> {
    match op {
        Op::Add => Ok(a + b),
        Op::Subtract => Ok(a - b),
        Op::Multiply => Ok(a * b),
        Op::Divide => {
            if b == 0.0 {
                Err(MathError::DivisionByZero)
            } else {
                Ok(a / b)
            }
        }
    }
}

/// `1/x`; zero has no reciprocal.
pub fn reciprocal(x: f64) -> Result<f64, MathError> {
    if x == 0.0 {
        Err(MathError::DivisionByZero)
    } else {
        Ok(1.0 / x)
    }
}

/// `x²`.
pub fn square(x: f64) -> f64 {
    x * x
}

/// `√x`; negative inputs are a domain error, never NaN.
pub fn sqrt(x: f64) -> Result<f64, MathError> {
    if x < 0.0 {
        Err(MathError::Domain)
    } else {
        Ok(x.sqrt())
    }
}

/// `-x`.
pub fn toggle_sign(x: f64) -> f64 {
    -x
}

/// `x / 100`.
pub fn percentage(x: f64) -> f64 {
    x / 100.0
}

/// Parse a displayed numeral back into a value.
///
/// Accepts exactly the strings the entry controller builds (`"0."`, `"-4"`,
/// `"12.5"`). Anything else is `InvalidNumber`.
pub fn parse_number(text: &str) -> Result<f64, MathError> {
    text.parse::<f64>().map_err(|_| MathError::InvalidNumber)
}

/// Format a value for display.
///
/// Integral values render without a fractional part (`"4"`, not `"4.0"`).
/// Everything else renders with up to 10 decimal places, trailing zeros and
/// a dangling decimal point stripped. Pure function of the value, so history
/// and memory entries always agree with the display.
pub fn format_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        format!("{}", x as i64)
    } else {
        let formatted = format!("{:.10}", x);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    }
}
