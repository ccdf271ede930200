//! Money screens built on the calculator: tip, discount and split bill.
//!
//! Amounts are [`rust_decimal::Decimal`] and are rounded to cents with
//! half-up rounding at every step the user can see.

pub mod common;
mod discount;
mod error;
mod split_bill;
mod tip;

pub use discount::{DiscountCalculator, DiscountInput, DiscountResult};
pub use error::MoneyError;
pub use split_bill::{MAX_PEOPLE, SplitBillCalculator, SplitBillInput, SplitBillResult};
pub use tip::{TipCalculator, TipInput, TipResult};
