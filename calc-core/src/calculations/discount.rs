//! Discount screen.
//!
//! The discount is taken off the price first; sales tax, when given, applies
//! to the discounted price.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::{DiscountCalculator, DiscountInput};
//!
//! let result = DiscountCalculator
//!     .calculate(&DiscountInput {
//!         price: dec!(80.00),
//!         discount_percent: dec!(25),
//!         sales_tax_percent: Some(dec!(8.25)),
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.savings, dec!(20.00));
//! assert_eq!(result.discounted_price, dec!(60.00));
//! assert_eq!(result.sales_tax, dec!(4.95));
//! assert_eq!(result.final_price, dec!(64.95));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::MoneyError;
use super::common::{percent_of, require_amount, require_percent, round_half_up};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountInput {
    /// Original price.
    pub price: Decimal,
    pub discount_percent: Decimal,
    /// Sales tax applied after the discount, if any.
    pub sales_tax_percent: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountResult {
    /// Amount taken off the original price.
    pub savings: Decimal,
    pub discounted_price: Decimal,
    /// Zero when no sales tax was given.
    pub sales_tax: Decimal,
    /// Discounted price plus sales tax.
    pub final_price: Decimal,
}

/// Calculator behind the discount screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscountCalculator;

impl DiscountCalculator {
    /// # Errors
    ///
    /// Returns [`MoneyError`] if the price is negative or above
    /// [`MAX_AMOUNT`](super::common::MAX_AMOUNT), or either percentage is outside
    /// `0..=100`.
    pub fn calculate(
        &self,
        input: &DiscountInput,
    ) -> Result<DiscountResult, MoneyError> {
        Self::validate(input).inspect_err(|e| warn!(error = %e, "rejected discount input"))?;

        let price = round_half_up(input.price);
        let savings = percent_of(price, input.discount_percent);
        let discounted_price = price - savings;
        let sales_tax = input
            .sales_tax_percent
            .map_or(Decimal::ZERO, |percent| percent_of(discounted_price, percent));

        Ok(DiscountResult {
            savings,
            discounted_price,
            sales_tax,
            final_price: discounted_price + sales_tax,
        })
    }

    fn validate(input: &DiscountInput) -> Result<(), MoneyError> {
        require_amount("price", input.price)?;
        require_percent("discount", input.discount_percent)?;
        if let Some(percent) = input.sales_tax_percent {
            require_percent("sales tax", percent)?;
        }
        Ok(())
    }
}
