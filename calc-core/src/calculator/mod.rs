//! Calculator input state machine.
//!
//! A [`Calculator`] owns one [`CalculatorState`] per screen and mutates it in
//! response to keypad input. Invalid arithmetic never fails a call; it shows up
//! as `"Error"` in the buffer and the next digit starts over.

mod key;
mod machine;
mod state;

pub use key::Key;
pub use machine::{Calculator, CompletedCalculation, MONEY_ENTRY_MAX_LENGTH};
pub use state::{CalculatorState, PendingOperation};
