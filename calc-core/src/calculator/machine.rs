//! Immediate-execution calculator state machine.
//!
//! Operators are applied strictly in entry order: pressing a second operator
//! evaluates the pending one first, so `2 + 3 × 4 =` yields `20`.
//!
//! # Example
//!
//! ```
//! use calc_core::calculator::Calculator;
//! use calc_core::engine::Operation;
//!
//! let mut calculator = Calculator::new();
//! calculator.input_digit('2');
//! calculator.input_operation(Operation::Add);
//! calculator.input_digit('3');
//! calculator.input_operation(Operation::Multiply);
//! calculator.input_digit('4');
//! let completed = calculator.calculate().unwrap();
//!
//! assert_eq!(calculator.display(), "20");
//! assert_eq!(completed.description, "5 × 4");
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{CalculatorState, Key, PendingOperation};
use crate::engine::{self, NumberFormatter, Operation};

/// Buffer length limit for money-entry fields.
///
/// The limit bounds typed digits only. Results of `=`, `%` and `±` are
/// written in full. Typing then starts a new entry that is limited again.
pub const MONEY_ENTRY_MAX_LENGTH: usize = 10;

/// Outcome of an `=` press, ready to hand to a history service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedCalculation {
    /// Human-readable expression, e.g. `"5 + 3"`.
    pub description: String,
    /// The result as shown on the display.
    pub result: String,
    pub value: f64,
}

/// Owns a [`CalculatorState`] and applies keypad input to it.
#[derive(Debug, Clone, Default)]
pub struct Calculator {
    state: CalculatorState,
    formatter: NumberFormatter,
    max_length: Option<usize>,
    /// Summary of the last `=` while its result is still showing.
    last_summary: Option<String>,
}

impl Calculator {
    /// Free calculator: unbounded buffer, default locale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calculator for a money-entry field limited to [`MONEY_ENTRY_MAX_LENGTH`] characters.
    pub fn money_entry() -> Self {
        Self::new().with_max_length(MONEY_ENTRY_MAX_LENGTH)
    }

    pub fn with_formatter(
        mut self,
        formatter: NumberFormatter,
    ) -> Self {
        self.formatter = formatter;
        self
    }

    /// Limits typed input to `max_length` characters. Computed results are
    /// not truncated.
    pub fn with_max_length(
        mut self,
        max_length: usize,
    ) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Raw buffer contents: `.` decimal point, no grouping.
    pub fn buffer(&self) -> &str {
        &self.state.display_buffer
    }

    /// Buffer rendered for the user with locale separators.
    pub fn display(&self) -> String {
        self.formatter.group_edit_text(&self.state.display_buffer)
    }

    /// Numeric value of the buffer; `0` when the buffer shows an error.
    pub fn value(&self) -> f64 {
        engine::parse_edit(&self.state.display_buffer)
    }

    /// Exact decimal value of the buffer, `None` when it shows an error.
    pub fn decimal_value(&self) -> Option<Decimal> {
        if self.is_error() {
            return None;
        }
        self.state
            .display_buffer
            .parse::<Decimal>()
            .ok()
            .or_else(|| Decimal::try_from(self.value()).ok())
    }

    pub fn is_error(&self) -> bool {
        self.state.display_buffer == engine::ERROR_TEXT
    }

    /// Trace of the expression being built, e.g. `"5 +"`, `"5 + 3"`, or
    /// `"5 + 3 ="` right after evaluation. Empty when there is nothing to show.
    pub fn expression_summary(&self) -> String {
        match self.state.pending {
            Some(pending) if self.state.is_fresh_entry => {
                format!(
                    "{} {}",
                    self.formatter.format(pending.operand),
                    pending.operation
                )
            }
            Some(pending) => {
                format!(
                    "{} {} {}",
                    self.formatter.format(pending.operand),
                    pending.operation,
                    self.display()
                )
            }
            None => self.last_summary.clone().unwrap_or_default(),
        }
    }

    /// Replaces the buffer with `value`, as if it were a result.
    pub fn set_value(
        &mut self,
        value: f64,
    ) {
        self.write_result(value);
        self.last_summary = None;
    }

    /// Dispatches a keypad press.
    ///
    /// Returns the completed calculation when the key was `=` and there was
    /// something to evaluate.
    pub fn press(
        &mut self,
        key: Key,
    ) -> Option<CompletedCalculation> {
        match key {
            Key::Digit(d) => self.input_digit(d),
            Key::Operation(op) => self.input_operation(op),
            Key::Equals => return self.calculate(),
            Key::Percent => self.percentage(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Backspace => self.backspace(),
            Key::Clear => self.clear(),
        }
        None
    }

    /// Appends a digit or the decimal point to the current entry.
    ///
    /// Anything other than `'0'..='9'` and `'.'` is ignored, as are a second
    /// decimal point and input beyond the buffer's length limit.
    pub fn input_digit(
        &mut self,
        d: char,
    ) {
        if !(d.is_ascii_digit() || d == '.') {
            trace!(key = %d, "ignoring non-digit input");
            return;
        }

        if self.state.is_fresh_entry || !self.is_editable() {
            self.state.display_buffer = if d == '.' {
                "0.".to_string()
            } else {
                d.to_string()
            };
            self.state.is_fresh_entry = false;
            self.last_summary = None;
            return;
        }

        let buffer = &mut self.state.display_buffer;
        if d == '.' {
            if buffer.contains('.') {
                trace!("ignoring second decimal point");
                return;
            }
        } else if buffer == "0" || buffer == "-0" {
            buffer.pop();
            buffer.push(d);
            return;
        }

        if self
            .max_length
            .is_some_and(|max| buffer.chars().count() >= max)
        {
            trace!(key = %d, "buffer full, dropping input");
            return;
        }

        buffer.push(d);
    }

    /// Registers `op`, first evaluating any pending operation against the
    /// current entry.
    pub fn input_operation(
        &mut self,
        op: Operation,
    ) {
        let operand = match self.state.pending.take() {
            Some(pending) => {
                let rhs = self.value();
                let result = engine::calculate(pending.operand, pending.operation, rhs);
                debug!(
                    lhs = pending.operand,
                    op = %pending.operation,
                    rhs,
                    result,
                    "chained evaluation"
                );
                self.write_result(result);
                result
            }
            None => self.value(),
        };

        self.last_summary = None;
        self.state.is_fresh_entry = true;
        // a non-finite operand keeps propagating until `=` shows "Error"
        self.state.pending = Some(PendingOperation {
            operand,
            operation: op,
        });
    }

    /// The `=` key. A no-op unless an operation is pending.
    pub fn calculate(&mut self) -> Option<CompletedCalculation> {
        let pending = self.state.pending.take()?;
        let rhs = self.value();
        let value = engine::calculate(pending.operand, pending.operation, rhs);

        let description = format!(
            "{} {} {}",
            self.formatter.format(pending.operand),
            pending.operation,
            self.formatter.format(rhs)
        );
        debug!(%description, value, "evaluated");

        self.write_result(value);
        self.last_summary = Some(format!("{description} ="));

        Some(CompletedCalculation {
            description,
            result: self.formatter.format(value),
            value,
        })
    }

    /// Divides the current entry by 100.
    pub fn percentage(&mut self) {
        let value = self.value() / 100.0;
        self.state.display_buffer = self.formatter.format_edit(value);
    }

    /// Negates the current entry. Zero stays zero.
    pub fn toggle_sign(&mut self) {
        let value = -self.value();
        self.state.display_buffer = self.formatter.format_edit(value);
    }

    /// Removes the last character, falling back to a fresh `"0"`.
    pub fn backspace(&mut self) {
        if !self.is_editable() {
            self.reset_buffer();
            return;
        }

        let buffer = &mut self.state.display_buffer;
        buffer.pop();
        if buffer.is_empty() || buffer == "-" {
            self.reset_buffer();
        }
    }

    /// Resets everything to the initial state.
    pub fn clear(&mut self) {
        self.state = CalculatorState::default();
        self.last_summary = None;
    }

    fn write_result(
        &mut self,
        value: f64,
    ) {
        self.state.display_buffer = self.formatter.format_edit(value);
        self.state.is_fresh_entry = true;
    }

    fn reset_buffer(&mut self) {
        self.state.display_buffer = "0".to_string();
        self.state.is_fresh_entry = true;
    }

    /// True while the buffer holds plain typed digits rather than an error or
    /// scientific notation.
    fn is_editable(&self) -> bool {
        let unsigned = self
            .state
            .display_buffer
            .strip_prefix('-')
            .unwrap_or(&self.state.display_buffer);
        !unsigned.is_empty() && unsigned.chars().all(|c| c.is_ascii_digit() || c == '.')
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::engine::FormatConfig;

    fn press_all(
        calculator: &mut Calculator,
        keys: &str,
    ) -> Option<CompletedCalculation> {
        let mut completed = None;
        for c in keys.chars().filter(|c| !c.is_whitespace()) {
            let key = Key::from_char(c).unwrap();
            if let Some(done) = calculator.press(key) {
                completed = Some(done);
            }
        }
        completed
    }

    fn run(keys: &str) -> Calculator {
        let mut calculator = Calculator::new();
        press_all(&mut calculator, keys);
        calculator
    }

    // =========================================================================
    // input_digit tests
    // =========================================================================

    #[test]
    fn digits_accumulate() {
        assert_eq!(run("123").display(), "123");
    }

    #[test]
    fn fresh_decimal_point_starts_with_zero() {
        let calculator = run(".5");

        assert_eq!(calculator.buffer(), "0.5");
    }

    #[test]
    fn second_decimal_point_is_ignored() {
        assert_eq!(run("1.2.3").buffer(), "1.23");
    }

    #[test]
    fn leading_zero_is_replaced() {
        assert_eq!(run("05").buffer(), "5");
        assert_eq!(run("0005").buffer(), "5");
    }

    #[test]
    fn zero_then_decimal_keeps_zero() {
        assert_eq!(run("0.05").buffer(), "0.05");
    }

    #[test]
    fn non_digit_characters_are_ignored() {
        let mut calculator = Calculator::new();
        calculator.input_digit('7');
        calculator.input_digit('a');

        assert_eq!(calculator.buffer(), "7");
    }

    #[test]
    fn money_entry_drops_input_past_limit() {
        let mut calculator = Calculator::money_entry();
        press_all(&mut calculator, "123456789012");

        assert_eq!(calculator.buffer(), "1234567890");
    }

    #[test]
    fn money_entry_limit_applies_to_typed_input_only() {
        let mut calculator = Calculator::money_entry();
        press_all(&mut calculator, "1234567890±");
        assert_eq!(calculator.buffer(), "-1234567890");

        // the full buffer drops more digits
        press_all(&mut calculator, "1");
        assert_eq!(calculator.buffer(), "-1234567890");

        let mut calculator = Calculator::money_entry();
        press_all(&mut calculator, "1234567÷7=");
        assert_eq!(calculator.buffer(), "176366.71428571");

        // a fresh result is replaced by the next digit
        press_all(&mut calculator, "5");
        assert_eq!(calculator.buffer(), "5");
    }

    #[test]
    fn money_entry_still_ignores_second_decimal_point_when_full() {
        let mut calculator = Calculator::new().with_max_length(4);
        press_all(&mut calculator, "1.23.");

        assert_eq!(calculator.buffer(), "1.23");
    }

    #[test]
    fn display_groups_buffer() {
        let calculator = run("1234567.50");

        assert_eq!(calculator.buffer(), "1234567.50");
        assert_eq!(calculator.display(), "1,234,567.50");
    }

    // =========================================================================
    // input_operation / calculate tests
    // =========================================================================

    #[test]
    fn simple_addition() {
        let mut calculator = Calculator::new();
        let completed = press_all(&mut calculator, "5+3=").unwrap();

        assert_eq!(calculator.display(), "8");
        assert_eq!(completed.description, "5 + 3");
        assert_eq!(completed.result, "8");
    }

    #[test]
    fn division_keeps_fraction() {
        assert_eq!(run("10/4=").display(), "2.5");
    }

    #[test]
    fn chained_operators_evaluate_immediately() {
        let calculator = run("2+3×4");

        assert_eq!(calculator.display(), "4");
        assert_eq!(calculator.state().stored_operand(), Some(5.0));
        assert_eq!(calculator.state().pending_operation(), Some(Operation::Multiply));
        assert_eq!(run("2+3×4=").display(), "20");
    }

    #[test]
    fn operator_writes_intermediate_result() {
        let calculator = run("2+3×");

        assert_eq!(calculator.display(), "5");
        assert!(calculator.state().is_fresh_entry());
    }

    #[test]
    fn equals_without_pending_is_noop() {
        let mut calculator = run("42");

        assert_eq!(calculator.calculate(), None);
        assert_eq!(calculator.buffer(), "42");
        assert!(!calculator.state().is_fresh_entry());
    }

    #[test]
    fn equals_clears_pending_and_sets_fresh_entry() {
        let calculator = run("5+3=");

        assert_eq!(calculator.state().pending(), None);
        assert!(calculator.state().is_fresh_entry());
    }

    #[test]
    fn digit_after_result_starts_new_number() {
        assert_eq!(run("5+3=7").display(), "7");
    }

    #[test]
    fn result_can_feed_next_operation() {
        assert_eq!(run("5+3=×2=").display(), "16");
    }

    #[test]
    fn division_by_zero_shows_error() {
        let calculator = run("7/0=");

        assert_eq!(calculator.display(), "Error");
        assert!(calculator.is_error());
        assert!(calculator.state().is_fresh_entry());
    }

    #[test]
    fn error_heals_on_next_digit() {
        assert_eq!(run("7/0=4").display(), "4");
        assert_eq!(run("7/0=4+1=").display(), "5");
    }

    #[test]
    fn chained_division_by_zero_keeps_pending_operation() {
        let calculator = run("7/0+");

        assert_eq!(calculator.display(), "Error");
        assert_eq!(calculator.state().pending_operation(), Some(Operation::Add));
        assert!(calculator.state().stored_operand().is_some_and(f64::is_nan));
        assert_eq!(calculator.expression_summary(), "Error +");
    }

    #[test]
    fn chained_error_propagates_through_equals() {
        let mut calculator = run("7/0+2");
        let completed = calculator.press(Key::Equals).unwrap();

        assert_eq!(calculator.display(), "Error");
        assert_eq!(completed.description, "Error + 2");
        assert_eq!(completed.result, "Error");
        assert_eq!(calculator.expression_summary(), "Error + 2 =");
        assert_eq!(run("7/0+2+3=").display(), "Error");
    }

    #[test]
    fn digit_after_chained_error_starts_new_entry() {
        let calculator = run("7/0+5");

        assert_eq!(calculator.display(), "5");
        assert_eq!(calculator.state().pending_operation(), Some(Operation::Add));
    }

    #[test]
    fn result_is_stored_without_grouping() {
        let calculator = run("1000×1000=");

        assert_eq!(calculator.buffer(), "1000000");
        assert_eq!(calculator.display(), "1,000,000");
    }

    #[test]
    fn large_result_uses_scientific_notation() {
        let calculator = run("99999999×99999999=");

        assert_eq!(calculator.display(), "1E16");
        assert_eq!(calculator.value(), 1e16);
    }

    // =========================================================================
    // expression_summary tests
    // =========================================================================

    #[test]
    fn summary_tracks_expression() {
        assert_eq!(run("").expression_summary(), "");
        assert_eq!(run("5+").expression_summary(), "5 +");
        assert_eq!(run("5+3").expression_summary(), "5 + 3");
        assert_eq!(run("5+3=").expression_summary(), "5 + 3 =");
        assert_eq!(run("5+3=1").expression_summary(), "");
    }

    #[test]
    fn summary_uses_grouping() {
        assert_eq!(run("1234×2").expression_summary(), "1,234 × 2");
    }

    // =========================================================================
    // percentage / toggle_sign tests
    // =========================================================================

    #[test]
    fn percentage_divides_by_hundred() {
        assert_eq!(run("50%").display(), "0.5");
    }

    #[test]
    fn percentage_keeps_pending_operation() {
        let calculator = run("200+10%");

        assert_eq!(calculator.display(), "0.1");
        assert_eq!(calculator.state().stored_operand(), Some(200.0));
        assert_eq!(run("200+10%=").display(), "200.1");
    }

    #[test]
    fn toggle_sign_negates() {
        assert_eq!(run("12n").display(), "-12");
        assert_eq!(run("12nn").display(), "12");
    }

    #[test]
    fn toggle_sign_on_zero_stays_zero() {
        assert_eq!(run("n").display(), "0");
    }

    #[test]
    fn negative_entry_keeps_accepting_digits() {
        assert_eq!(run("12n3").buffer(), "-123");
    }

    // =========================================================================
    // backspace / clear tests
    // =========================================================================

    #[test]
    fn backspace_removes_last_character() {
        let calculator = run("123<");

        assert_eq!(calculator.buffer(), "12");
        assert!(!calculator.state().is_fresh_entry());
    }

    #[test]
    fn backspace_to_empty_resets() {
        let calculator = run("1<");

        assert_eq!(calculator.buffer(), "0");
        assert!(calculator.state().is_fresh_entry());
    }

    #[test]
    fn backspace_leaving_sign_resets() {
        let calculator = run("5n<");

        assert_eq!(calculator.buffer(), "0");
        assert!(calculator.state().is_fresh_entry());
    }

    #[test]
    fn backspace_on_error_resets() {
        let calculator = run("1/0=<");

        assert_eq!(calculator.buffer(), "0");
        assert!(calculator.state().is_fresh_entry());
    }

    #[test]
    fn clear_resets_everything() {
        let calculator = run("5+3C");

        assert_eq!(calculator.state(), &CalculatorState::default());
        assert_eq!(calculator.expression_summary(), "");
    }

    // =========================================================================
    // value accessors
    // =========================================================================

    #[test]
    fn decimal_value_is_exact() {
        assert_eq!(run("19.99").decimal_value(), Some(dec!(19.99)));
        assert_eq!(run("1/0=").decimal_value(), None);
    }

    #[test]
    fn set_value_behaves_like_result() {
        let mut calculator = Calculator::money_entry();
        calculator.set_value(42.5);

        assert_eq!(calculator.buffer(), "42.5");
        assert!(calculator.state().is_fresh_entry());
    }

    #[test]
    fn locale_formatter_changes_display_only() {
        let formatter = NumberFormatter::new(FormatConfig {
            decimal_separator: ',',
            grouping_separator: Some('.'),
            ..FormatConfig::default()
        })
        .unwrap();
        let mut calculator = Calculator::new().with_formatter(formatter);
        press_all(&mut calculator, "1234.5×2=");

        assert_eq!(calculator.buffer(), "2469");
        assert_eq!(calculator.display(), "2.469");
        assert_eq!(calculator.expression_summary(), "1.234,5 × 2 =");
    }
}
