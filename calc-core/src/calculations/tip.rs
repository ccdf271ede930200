//! Tip screen.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::{TipCalculator, TipInput};
//!
//! let result = TipCalculator
//!     .calculate(&TipInput {
//!         bill: dec!(84.50),
//!         tip_percent: dec!(18),
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.tip, dec!(15.21));
//! assert_eq!(result.total, dec!(99.71));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::MoneyError;
use super::common::{percent_of, require_amount, require_percent, round_half_up};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipInput {
    /// Bill before tip.
    pub bill: Decimal,
    /// Tip as a percentage of the bill, `0..=100`.
    pub tip_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipResult {
    pub tip: Decimal,
    /// Bill plus tip.
    pub total: Decimal,
}

/// Calculator behind the tip screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct TipCalculator;

impl TipCalculator {
    /// # Errors
    ///
    /// Returns [`MoneyError`] if the bill is negative or above
    /// [`MAX_AMOUNT`](super::common::MAX_AMOUNT), or the percentage is outside
    /// `0..=100`.
    pub fn calculate(
        &self,
        input: &TipInput,
    ) -> Result<TipResult, MoneyError> {
        let (bill, tip_percent) =
            Self::validate(input).inspect_err(|e| warn!(error = %e, "rejected tip input"))?;

        let bill = round_half_up(bill);
        let tip = percent_of(bill, tip_percent);

        Ok(TipResult {
            tip,
            total: bill + tip,
        })
    }

    fn validate(input: &TipInput) -> Result<(Decimal, Decimal), MoneyError> {
        Ok((
            require_amount("bill", input.bill)?,
            require_percent("tip", input.tip_percent)?,
        ))
    }
}
