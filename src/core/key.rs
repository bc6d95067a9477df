//! # Keys
//!
//! Every keypad press becomes a `Key`.
//! User taps `7`? That's `Key::Digit(7)`.
//! User taps `√x`? That's `Key::Unary(UnaryOp::Sqrt)`.
//!
//! The `update()` function takes the current state and a key, applies the
//! transition, and returns the new display snapshot. No I/O here. Rendering
//! happens elsewhere.
//!
//! ```text
//! State + Key  →  update()  →  DisplayState
//! ```
//!
//! This makes every transition testable in isolation, and debuggable: log
//! every key, replay the exact session.
//!
//! ## The entry state machine
//!
//! Four states cover the whole keypad grammar:
//!
//! - **Start**: nothing entered, the result line shows `"0"`.
//! - **Typing**: the result line is a numeral being built.
//! - **OperatorPending**: an operator is chosen, its left side is stored,
//!   the next digit starts the right side.
//! - **Evaluated**: `=` or a unary op just finished; the next digit starts
//!   a brand-new calculation.
//!
//! The states are not reified as an enum; they are the reachable
//! combinations of the `typing` / `just_evaluated` / `pending_op` fields on
//! [`Calculator`], which keeps every transition a plain field update.

use log::debug;

use crate::core::math::{
    self, Op, evaluate_binary, format_number, parse_number, percentage, square,
};
use crate::core::state::{Calculator, DisplayState, ERROR_SENTINEL};

/// A unary keypad function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Reciprocal,
    Square,
    Sqrt,
}

impl UnaryOp {
    /// Function notation used on the expression line: `1/(x)`, `sqr(x)`, `√(x)`.
    fn notation(self) -> &'static str {
        match self {
            UnaryOp::Reciprocal => "1/",
            UnaryOp::Square => "sqr",
            UnaryOp::Sqrt => "√",
        }
    }

    fn apply(self, x: f64) -> Result<f64, math::MathError> {
        match self {
            UnaryOp::Reciprocal => math::reciprocal(x),
            UnaryOp::Square => Ok(square(x)),
            UnaryOp::Sqrt => math::sqrt(x),
        }
    }
}

/// The calculator's input alphabet: one variant per keypad button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `0`–`9`.
    Digit(u8),
    /// `.`
    Decimal,
    /// `+`, `−`, `×`, `÷`.
    Op(Op),
    /// `=`
    Equals,
    /// `1/x`, `x²`, `√x`.
    Unary(UnaryOp),
    /// `±`
    Negate,
    /// `%`
    Percent,
    /// `C`: full reset.
    Clear,
    /// `CE`: clear the current entry only.
    ClearEntry,
    /// `⌫`
    Backspace,
    /// `MS`
    MemoryStore,
    /// `MR`
    MemoryRecall,
    /// `M+`
    MemoryAdd,
    /// `M−`
    MemorySubtract,
    /// `MC`
    MemoryClear,
}

impl Calculator {
    /// Handle one keypad press and return the new display snapshot.
    ///
    /// The single inbound entry point for the presentation layer; never
    /// panics and never propagates an arithmetic failure (those surface as
    /// the `"Error"` sentinel on the result line).
    pub fn handle_key(&mut self, key: Key) -> DisplayState {
        update(self, key)
    }
}

/// Apply `key` to `calc`.
///
/// Free function form of [`Calculator::handle_key`], kept separate so the
/// whole transition table lives in this module.
pub fn update(calc: &mut Calculator, key: Key) -> DisplayState {
    debug!("key {:?}", key);

    // While "Error" shows, only digits, decimal and the clears are live.
    // The failed operation left everything else untouched, so clearing the
    // sentinel is enough to resume.
    if calc.in_error() {
        match key {
            Key::Digit(_) | Key::Decimal => {
                calc.result = String::from("0");
                calc.typing = false;
            }
            Key::Clear | Key::ClearEntry => {}
            _ => return calc.display(),
        }
    }

    match key {
        Key::Digit(d) => press_digit(calc, d),
        Key::Decimal => press_decimal(calc),
        Key::Op(op) => press_operator(calc, op),
        Key::Equals => press_equals(calc),
        Key::Unary(u) => press_unary(calc, u),
        Key::Negate => press_negate(calc),
        Key::Percent => press_percent(calc),
        Key::Clear => press_clear(calc),
        Key::ClearEntry => press_clear_entry(calc),
        Key::Backspace => press_backspace(calc),
        Key::MemoryStore => with_current_value(calc, |calc, x| calc.memory.store(x)),
        Key::MemoryAdd => with_current_value(calc, |calc, x| calc.memory.add(x)),
        Key::MemorySubtract => with_current_value(calc, |calc, x| calc.memory.subtract(x)),
        Key::MemoryRecall => press_memory_recall(calc),
        Key::MemoryClear => calc.memory.clear(),
    }

    calc.display()
}

fn press_digit(calc: &mut Calculator, d: u8) {
    if calc.just_evaluated {
        // A finished result is discarded; this digit starts a fresh
        // calculation with an empty expression line.
        calc.expression.clear();
        calc.stored_operand = None;
        calc.just_evaluated = false;
        calc.result = d.to_string();
        calc.typing = true;
    } else if calc.typing {
        if calc.result == "0" {
            // Replace the placeholder instead of producing "07".
            calc.result = d.to_string();
        } else {
            calc.result.push_str(&d.to_string());
        }
    } else {
        calc.result = d.to_string();
        calc.typing = true;
    }
}

fn press_decimal(calc: &mut Calculator) {
    if calc.just_evaluated {
        calc.expression.clear();
        calc.stored_operand = None;
        calc.just_evaluated = false;
        calc.result = String::from("0.");
        calc.typing = true;
    } else if calc.typing {
        if !calc.result.contains('.') {
            calc.result.push('.');
        }
    } else {
        calc.result = String::from("0.");
        calc.typing = true;
    }
}

fn press_operator(calc: &mut Calculator, op: Op) {
    // Two operators in a row: replace the pending one, nothing is evaluated.
    if calc.pending_op.is_some() && !calc.typing && !calc.just_evaluated {
        calc.pending_op = Some(op);
        if let Some(a) = calc.stored_operand {
            calc.expression = format!("{} {}", format_number(a), op.glyph());
        }
        return;
    }

    let value = match parse_number(&calc.result) {
        Ok(v) => v,
        Err(err) => return enter_error(calc, err),
    };

    // Chained operation: the typed right side closes out the pending
    // operator before the new one takes over. Left-to-right, no precedence.
    if let (Some(pending), Some(a)) = (calc.pending_op, calc.stored_operand)
        && calc.typing
    {
        match evaluate_binary(a, pending, value) {
            Ok(v) => {
                calc.stored_operand = Some(v);
                calc.pending_op = Some(op);
                calc.expression = format!("{} {}", format_number(v), op.glyph());
                calc.result = format_number(v);
                calc.typing = false;
            }
            Err(err) => enter_error(calc, err),
        }
        return;
    }

    // First operator of a chain: capture the displayed value as the left
    // side. Reached from Start, Typing, and Evaluated (where the finished
    // result seeds the new chain).
    calc.stored_operand = Some(value);
    calc.pending_op = Some(op);
    calc.expression = format!("{} {}", format_number(value), op.glyph());
    calc.result = format_number(value);
    calc.typing = false;
    calc.just_evaluated = false;
    calc.last_repeat = None;
}

fn press_equals(calc: &mut Calculator) {
    if let (Some(op), Some(a)) = (calc.pending_op, calc.stored_operand) {
        // Fresh evaluation. Without a typed right operand the displayed
        // value (== the stored operand) is used, so "5 + =" gives 10.
        let b = match parse_number(&calc.result) {
            Ok(v) => v,
            Err(err) => return enter_error(calc, err),
        };
        match evaluate_binary(a, op, b) {
            Ok(v) => {
                let expression =
                    format!("{} {} {}", format_number(a), op.glyph(), format_number(b));
                commit_evaluation(calc, expression, v);
                calc.last_repeat = Some((op, b));
                calc.pending_op = None;
            }
            Err(err) => enter_error(calc, err),
        }
    } else if let Some((op, b)) = calc.last_repeat {
        // Repeat-equals: re-apply the last operation to whatever is on
        // display now.
        let a = match parse_number(&calc.result) {
            Ok(v) => v,
            Err(err) => return enter_error(calc, err),
        };
        match evaluate_binary(a, op, b) {
            Ok(v) => {
                let expression =
                    format!("{} {} {}", format_number(a), op.glyph(), format_number(b));
                commit_evaluation(calc, expression, v);
            }
            Err(err) => enter_error(calc, err),
        }
    }
    // No pending operator and nothing to repeat: "=" is a no-op.
}

/// Shared tail of every successful `=`: display lines, history record,
/// Evaluated state, result seeded as the next chain's left side.
fn commit_evaluation(calc: &mut Calculator, expression: String, value: f64) {
    let result = format_number(value);
    calc.expression = format!("{} =", expression);
    calc.history.append(expression, result.clone());
    calc.result = result;
    calc.stored_operand = Some(value);
    calc.typing = false;
    calc.just_evaluated = true;
}

fn press_unary(calc: &mut Calculator, u: UnaryOp) {
    let x = match parse_number(&calc.result) {
        Ok(v) => v,
        Err(err) => return enter_error(calc, err),
    };
    match u.apply(x) {
        Ok(v) => {
            // A completed calculation in its own right: recorded to history
            // immediately, and any pending chain is consumed. The
            // repeat-equals memory survives.
            let expression = format!("{}({})", u.notation(), calc.result);
            let result = format_number(v);
            calc.history.append(expression.clone(), result.clone());
            calc.expression = expression;
            calc.result = result;
            calc.pending_op = None;
            calc.stored_operand = None;
            calc.typing = false;
            calc.just_evaluated = true;
        }
        Err(err) => enter_error(calc, err),
    }
}

fn press_negate(calc: &mut Calculator) {
    // In-place sign toggle; does not end an entry and does not leave the
    // Evaluated state.
    if calc.result == "0" {
        return;
    }
    if calc.typing {
        // Textual toggle keeps a partial entry like "5." intact.
        if let Some(rest) = calc.result.strip_prefix('-') {
            calc.result = rest.to_string();
        } else {
            calc.result.insert(0, '-');
        }
    } else if let Ok(x) = parse_number(&calc.result) {
        calc.result = format_number(math::toggle_sign(x));
    }
}

fn press_percent(calc: &mut Calculator) {
    let x = match parse_number(&calc.result) {
        Ok(v) => v,
        Err(err) => return enter_error(calc, err),
    };
    // Keeps the pending operator and the Evaluated flag; the scaled value
    // stays an entry so a following operator chains through it.
    calc.result = format_number(percentage(x));
    calc.typing = true;
}

fn press_clear(calc: &mut Calculator) {
    calc.expression.clear();
    calc.result = String::from("0");
    calc.typing = false;
    calc.just_evaluated = false;
    calc.pending_op = None;
    calc.stored_operand = None;
    calc.last_repeat = None;
}

fn press_clear_entry(calc: &mut Calculator) {
    // Only the current numeral goes; stored operand, pending operator and
    // the expression line stay.
    calc.result = String::from("0");
    calc.typing = false;
}

fn press_backspace(calc: &mut Calculator) {
    // A finished result is not editable; the next digit starts fresh.
    if calc.just_evaluated || !calc.typing {
        return;
    }
    calc.result.pop();
    if calc.result.is_empty() || calc.result == "-" {
        calc.result = String::from("0");
    }
}

fn press_memory_recall(calc: &mut Calculator) {
    if let Some(stored) = calc.memory.recall() {
        // Recall acts like typing the stored numeral.
        calc.result = stored.to_string();
        calc.typing = true;
        calc.just_evaluated = false;
    }
}

/// Run a memory command with the parsed display value; parse failures
/// surface as the error sentinel like any other arithmetic failure.
fn with_current_value(calc: &mut Calculator, f: impl FnOnce(&mut Calculator, f64)) {
    match parse_number(&calc.result) {
        Ok(x) => f(calc, x),
        Err(err) => enter_error(calc, err),
    }
}

/// Surface an arithmetic failure as the display sentinel.
///
/// The expression line and the internal entry flags are deliberately left
/// alone so the user can correct the input and retry.
fn enter_error(calc: &mut Calculator, err: math::MathError) {
    debug!("arithmetic error: {err}");
    calc.result = String::from(ERROR_SENTINEL);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::press_all;
    use test_case::test_case;

    #[test_case("12" => "12")]
    #[test_case("007" => "7"; "zero placeholder is replaced not appended")]
    #[test_case("1.5.5" => "1.55"; "second decimal point ignored")]
    #[test_case("." => "0."; "decimal first starts a zero entry")]
    #[test_case("12<" => "1")]
    #[test_case("1<" => "0"; "backspace clamps to zero")]
    #[test_case("1<5" => "5"; "digit after clamp replaces placeholder")]
    fn entry_editing(seq: &str) -> String {
        let mut calc = Calculator::new();
        press_all(&mut calc, seq).result_text
    }

    #[test_case("5+3=" => "8")]
    #[test_case("5+3==" => "11"; "repeat equals reapplies the operand")]
    #[test_case("5+3===" => "14")]
    #[test_case("5+3=9=" => "12"; "repeat applies to a newly typed value")]
    #[test_case("5+-3=" => "2"; "second operator replaces the first")]
    #[test_case("5+=" => "10"; "equals without right operand doubles up")]
    #[test_case("1+2+3=" => "6"; "chained operators evaluate left to right")]
    #[test_case("2+3*4=" => "20"; "no precedence")]
    #[test_case("5+3=*2=" => "16"; "operator after equals chains from the result")]
    #[test_case("=" => "0"; "equals with no history is a no-op")]
    #[test_case("5+3C=" => "0"; "clear forgets the pending operation")]
    fn binary_chains(seq: &str) -> String {
        let mut calc = Calculator::new();
        press_all(&mut calc, seq).result_text
    }

    #[test_case("7q" => "49")]
    #[test_case("49s" => "7")]
    #[test_case("4r" => "0.25")]
    #[test_case("5n" => "-5")]
    #[test_case("5nn" => "5")]
    #[test_case("0n" => "0"; "negating zero is a no-op")]
    #[test_case("50%" => "0.5")]
    fn unary_keys(seq: &str) -> String {
        let mut calc = Calculator::new();
        press_all(&mut calc, seq).result_text
    }

    #[test_case("1/0=" => "Error")]
    #[test_case("0r" => "Error"; "reciprocal of zero")]
    #[test_case("3ns" => "Error"; "square root of a negative")]
    #[test_case("1/0=5" => "5"; "a digit clears the sentinel")]
    #[test_case("1/0=2=" => "0.5"; "pending operation survives the error")]
    #[test_case("1/0=+" => "Error"; "operators are ignored while in error")]
    #[test_case("1/0=E" => "0"; "clear entry leaves the error state")]
    fn error_sentinel(seq: &str) -> String {
        let mut calc = Calculator::new();
        press_all(&mut calc, seq).result_text
    }

    #[test]
    fn division_by_zero_leaves_state_untouched() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "5/0");
        let before = calc.display().expression_text;
        let display = press_all(&mut calc, "=");
        assert_eq!(display.result_text, "Error");
        assert_eq!(display.expression_text, before);
        assert_eq!(calc.pending_op, Some(Op::Divide));
        assert_eq!(calc.stored_operand, Some(5.0));
    }

    #[test]
    fn operator_press_fills_the_expression_line() {
        let mut calc = Calculator::new();
        assert_eq!(press_all(&mut calc, "5+").expression_text, "5 +");
        assert_eq!(press_all(&mut calc, "3=").expression_text, "5 + 3 =");
    }

    #[test]
    fn digit_after_equals_starts_a_fresh_calculation() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "5+3=");
        let display = press_all(&mut calc, "9");
        assert_eq!(display.expression_text, "");
        assert_eq!(display.result_text, "9");
    }

    #[test]
    fn backspace_after_equals_is_a_no_op() {
        let mut calc = Calculator::new();
        let display = press_all(&mut calc, "5+3=<");
        assert_eq!(display.result_text, "8");
    }

    #[test]
    fn clear_entry_keeps_the_pending_operation() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "5+9E");
        assert_eq!(calc.display().result_text, "0");
        assert_eq!(press_all(&mut calc, "3=").result_text, "8");
    }

    #[test]
    fn unary_consumes_the_pending_chain() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "5+9q");
        assert_eq!(calc.pending_op, None);
        assert_eq!(calc.stored_operand, None);
        assert_eq!(calc.display().result_text, "81");
    }

    #[test]
    fn unary_records_history_immediately() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "7q=");
        assert_eq!(calc.display().result_text, "49");
        let history = calc.history_list();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].display(), "sqr(7) = 49");
    }

    #[test]
    fn percent_chains_through_a_following_operator() {
        let mut calc = Calculator::new();
        assert_eq!(press_all(&mut calc, "200+50%=").result_text, "200.5");
    }

    #[test]
    fn equals_pushes_history_newest_first() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "1+1=");
        press_all(&mut calc, "2*3=");
        let lines: Vec<String> = calc.history_list().iter().map(|r| r.display()).collect();
        assert_eq!(lines, ["2 × 3 = 6", "1 + 1 = 2"]);
    }

    #[test]
    fn memory_keys_drive_the_bank() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "5");
        update(&mut calc, Key::MemoryStore);
        press_all(&mut calc, "C2");
        update(&mut calc, Key::MemoryAdd);
        assert_eq!(calc.memory_list(), &["7"]);
        update(&mut calc, Key::MemorySubtract);
        assert_eq!(calc.memory_list(), &["5"]);

        press_all(&mut calc, "C");
        let display = update(&mut calc, Key::MemoryRecall);
        assert_eq!(display.result_text, "5");

        update(&mut calc, Key::MemoryClear);
        assert!(calc.memory_list().is_empty());
    }

    #[test]
    fn memory_recall_on_empty_bank_is_a_no_op() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "42");
        let display = update(&mut calc, Key::MemoryRecall);
        assert_eq!(display.result_text, "42");
    }

    #[test]
    fn recalled_value_acts_as_a_typed_operand() {
        let mut calc = Calculator::new();
        press_all(&mut calc, "9");
        update(&mut calc, Key::MemoryStore);
        press_all(&mut calc, "C1+");
        update(&mut calc, Key::MemoryRecall);
        assert_eq!(press_all(&mut calc, "=").result_text, "10");
    }
}
