//! Immediate-execution calculator core.
//!
//! - [`engine`]: stateless arithmetic, display formatting and parsing
//! - [`calculator`]: the keypad state machine behind every calculator screen
//! - [`slider`]: value ↔ angle mapping for the semicircular percentage slider
//! - [`calculations`]: tip, discount and split-bill money screens
//! - [`history`]: the seam to the calculation history service

pub mod calculations;
pub mod calculator;
pub mod engine;
pub mod history;
pub mod models;
pub mod slider;

pub use calculator::{Calculator, CalculatorState, CompletedCalculation, Key};
pub use engine::{FormatConfig, NumberFormatter, Operation};
pub use models::*;
