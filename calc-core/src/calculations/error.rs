use rust_decimal::Decimal;
use thiserror::Error;

use super::common::MAX_AMOUNT;
use super::split_bill::MAX_PEOPLE;

/// Errors raised by the money screens when an input is out of policy.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// A money amount was below zero.
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// A money amount was above [`MAX_AMOUNT`].
    #[error("{field} must not exceed {max}, got {value}", max = MAX_AMOUNT)]
    AmountTooLarge { field: &'static str, value: Decimal },

    /// A percentage was outside 0..=100.
    #[error("{field} must be between 0 and 100 percent, got {value}")]
    PercentOutOfRange { field: &'static str, value: Decimal },

    /// A bill cannot be split between zero people.
    #[error("a bill must be split between at least one person")]
    NoPeople,

    #[error("a bill can be split between at most {max} people, got {0}", max = MAX_PEOPLE)]
    TooManyPeople(u32),
}
