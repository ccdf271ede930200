//! Split-bill screen.
//!
//! The grand total (bill plus optional tip) is divided into per-person
//! shares in whole cents. Leftover cents go to the first payers so the shares
//! always add up to the grand total exactly.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::{SplitBillCalculator, SplitBillInput};
//!
//! let result = SplitBillCalculator
//!     .calculate(&SplitBillInput {
//!         total: dec!(100.00),
//!         people: 3,
//!         tip_percent: None,
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.per_person, dec!(33.33));
//! assert_eq!(result.shares, vec![dec!(33.34), dec!(33.33), dec!(33.33)]);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::MoneyError;
use super::common::{percent_of, require_amount, require_percent, round_half_up};

/// Largest number of payers a bill can be split between.
pub const MAX_PEOPLE: u32 = 1_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitBillInput {
    /// Bill before tip.
    pub total: Decimal,
    /// Number of payers, at least one.
    pub people: u32,
    pub tip_percent: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitBillResult {
    /// Zero when no tip was given.
    pub tip: Decimal,
    /// Bill plus tip.
    pub grand_total: Decimal,
    /// Grand total divided by the number of people, rounded to cents.
    pub per_person: Decimal,
    /// What each person pays; sums to `grand_total`.
    pub shares: Vec<Decimal>,
}

/// Calculator behind the split-bill screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct SplitBillCalculator;

impl SplitBillCalculator {
    /// # Errors
    ///
    /// Returns [`MoneyError`] if the total is negative or above
    /// [`MAX_AMOUNT`](super::common::MAX_AMOUNT), the tip percentage is outside
    /// `0..=100`, or `people` is zero or above [`MAX_PEOPLE`].
    pub fn calculate(
        &self,
        input: &SplitBillInput,
    ) -> Result<SplitBillResult, MoneyError> {
        Self::validate(input).inspect_err(|e| warn!(error = %e, "rejected split-bill input"))?;

        let total = round_half_up(input.total);
        let tip = input
            .tip_percent
            .map_or(Decimal::ZERO, |percent| percent_of(total, percent));
        let grand_total = total + tip;
        let people = Decimal::from(input.people);

        Ok(SplitBillResult {
            tip,
            grand_total,
            per_person: round_half_up(grand_total / people),
            shares: Self::shares(grand_total, input.people),
        })
    }

    /// Splits `grand_total` into `people` whole-cent shares.
    fn shares(
        grand_total: Decimal,
        people: u32,
    ) -> Vec<Decimal> {
        let cents = grand_total * Decimal::ONE_HUNDRED;
        let people_dec = Decimal::from(people);
        let base = (cents / people_dec).floor();
        let leftover = cents - base * people_dec;

        (0..people)
            .map(|i| {
                let extra = if Decimal::from(i) < leftover {
                    Decimal::ONE
                } else {
                    Decimal::ZERO
                };
                (base + extra) / Decimal::ONE_HUNDRED
            })
            .collect()
    }

    fn validate(input: &SplitBillInput) -> Result<(), MoneyError> {
        require_amount("total", input.total)?;
        if let Some(percent) = input.tip_percent {
            require_percent("tip", percent)?;
        }
        if input.people == 0 {
            return Err(MoneyError::NoPeople);
        }
        if input.people > MAX_PEOPLE {
            return Err(MoneyError::TooManyPeople(input.people));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::calculations::common::MAX_AMOUNT;

    fn split(
        total: Decimal,
        people: u32,
        tip_percent: Option<Decimal>,
    ) -> Result<SplitBillResult, MoneyError> {
        SplitBillCalculator.calculate(&SplitBillInput {
            total,
            people,
            tip_percent,
        })
    }

    #[test]
    fn calculate_even_split() {
        let result = split(dec!(90.00), 3, None).unwrap();

        assert_eq!(result.per_person, dec!(30.00));
        assert_eq!(result.shares, vec![dec!(30), dec!(30), dec!(30)]);
    }

    #[test]
    fn calculate_leftover_cents_go_to_first_payers() {
        let result = split(dec!(10.00), 3, None).unwrap();

        assert_eq!(result.shares, vec![dec!(3.34), dec!(3.33), dec!(3.33)]);
        assert_eq!(result.shares.iter().sum::<Decimal>(), dec!(10.00));
    }

    #[test]
    fn calculate_with_tip() {
        let result = split(dec!(120.00), 4, Some(dec!(20))).unwrap();

        assert_eq!(result.tip, dec!(24.00));
        assert_eq!(result.grand_total, dec!(144.00));
        assert_eq!(result.per_person, dec!(36.00));
    }

    #[test]
    fn calculate_shares_always_sum_to_grand_total() {
        for people in 1..=12 {
            let result = split(dec!(87.53), people, Some(dec!(17.5))).unwrap();

            assert_eq!(result.shares.len(), people as usize);
            assert_eq!(result.shares.iter().sum::<Decimal>(), result.grand_total);
        }
    }

    #[test]
    fn calculate_single_person_pays_everything() {
        let result = split(dec!(15.55), 1, None).unwrap();

        assert_eq!(result.shares, vec![dec!(15.55)]);
    }

    #[test]
    fn calculate_rejects_total_beyond_max_amount() {
        let total = dec!(1000000000000000000000000000);

        assert_eq!(
            split(total, 3, None),
            Err(MoneyError::AmountTooLarge {
                field: "total",
                value: total
            })
        );
    }

    #[test]
    fn calculate_max_total_with_full_tip_still_sums() {
        let result = split(MAX_AMOUNT, 7, Some(dec!(100))).unwrap();

        assert_eq!(result.shares.iter().sum::<Decimal>(), result.grand_total);
    }

    #[test]
    fn calculate_rejects_too_many_people() {
        assert_eq!(
            split(dec!(10), MAX_PEOPLE + 1, None),
            Err(MoneyError::TooManyPeople(MAX_PEOPLE + 1))
        );
        assert!(split(dec!(10), MAX_PEOPLE, None).is_ok());
    }

    #[test]
    fn calculate_rejects_zero_people() {
        assert_eq!(split(dec!(10), 0, None), Err(MoneyError::NoPeople));
    }
}
