//! Shared helpers for the money screens.
//!
//! Money is rounded to cents with half-up rounding and percentages are
//! validated the same way everywhere, so these live in one place.

use rust_decimal::{Decimal, RoundingStrategy};

use super::MoneyError;

/// Rounds a money amount to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(12.344)), dec!(12.34));
/// assert_eq!(round_half_up(dec!(12.345)), dec!(12.35));
/// assert_eq!(round_half_up(dec!(-12.345)), dec!(-12.35));
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Largest amount the money screens accept, one quadrillion.
///
/// Every screen stays far inside `Decimal`'s range below this bound, so the
/// arithmetic after validation cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// `percent` percent of `amount`, rounded to cents.
///
/// Only called on amounts already checked by [`require_amount`].
pub(crate) fn percent_of(
    amount: Decimal,
    percent: Decimal,
) -> Decimal {
    round_half_up(amount * percent / Decimal::ONE_HUNDRED)
}

/// Rejects negative amounts and amounts above [`MAX_AMOUNT`].
pub(crate) fn require_amount(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, MoneyError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(MoneyError::NegativeAmount { field, value });
    }
    if value > MAX_AMOUNT {
        return Err(MoneyError::AmountTooLarge { field, value });
    }
    Ok(value)
}

/// Rejects percentages outside `0..=100`.
pub(crate) fn require_percent(
    field: &'static str,
    value: Decimal,
) -> Result<Decimal, MoneyError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(MoneyError::PercentOutOfRange { field, value });
    }
    Ok(value)
}
