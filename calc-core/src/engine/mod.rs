//! Stateless arithmetic and display formatting.
//!
//! Everything in this module is a pure function of its inputs; the
//! [`crate::calculator`] state machine is built on top of it.

mod arithmetic;
mod format;
mod operation;

pub use arithmetic::{ArithmeticError, calculate, try_calculate};
pub(crate) use format::parse_edit;
pub use format::{
    ERROR_TEXT, FormatConfig, FormatConfigError, MAX_FRACTION_DIGITS,
    MAX_MANTISSA_FRACTION_DIGITS, NumberFormatter, PLAIN_LOWER_BOUND, PLAIN_UPPER_BOUND,
    format_for_display, parse_from_display,
};
pub use operation::Operation;
