//! Binary evaluation for the immediate-execution calculator.
//!
//! [`calculate`] never fails: an invalid result is reported as `NaN` and only
//! becomes visible when it is formatted (see [`super::format_for_display`]).
//! [`try_calculate`] is the checked counterpart for callers that want a typed
//! error instead of the sentinel.

use thiserror::Error;

use super::Operation;

/// Errors reported by [`try_calculate`].
#[derive(Debug, Error, PartialEq)]
pub enum ArithmeticError {
    /// The right-hand side of a division was zero.
    #[error("division by zero")]
    DivisionByZero,

    /// The operands or the result are not finite numbers.
    #[error("{lhs} {op} {rhs} does not produce a finite result")]
    NonFinite { lhs: f64, op: Operation, rhs: f64 },
}

/// Evaluates `lhs op rhs` with plain `f64` arithmetic.
///
/// Division by zero returns `NaN` regardless of the sign of `lhs`, so every
/// invalid result shares a single sentinel.
///
/// # Examples
///
/// ```
/// use calc_core::engine::{Operation, calculate};
///
/// assert_eq!(calculate(10.0, Operation::Divide, 4.0), 2.5);
/// assert!(calculate(1.0, Operation::Divide, 0.0).is_nan());
/// ```
pub fn calculate(
    lhs: f64,
    op: Operation,
    rhs: f64,
) -> f64 {
    match op {
        Operation::Add => lhs + rhs,
        Operation::Subtract => lhs - rhs,
        Operation::Multiply => lhs * rhs,
        Operation::Divide => {
            if rhs == 0.0 {
                f64::NAN
            } else {
                lhs / rhs
            }
        }
    }
}

/// Checked variant of [`calculate`].
///
/// # Errors
///
/// - [`ArithmeticError::DivisionByZero`] when dividing by zero
/// - [`ArithmeticError::NonFinite`] when an operand or the result is `NaN` or infinite
pub fn try_calculate(
    lhs: f64,
    op: Operation,
    rhs: f64,
) -> Result<f64, ArithmeticError> {
    if op == Operation::Divide && rhs == 0.0 {
        return Err(ArithmeticError::DivisionByZero);
    }

    let result = calculate(lhs, op, rhs);
    if result.is_finite() {
        Ok(result)
    } else {
        Err(ArithmeticError::NonFinite { lhs, op, rhs })
    }
}
