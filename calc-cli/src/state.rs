//! Session state for the `calc` binary.
//!
//! Holds everything that lives longer than a single key press: the free
//! calculator, the history of finished calculations and the percentage slider.

use calc_core::{
    Calculator, HistoryEntry, Key, NumberFormatter,
    history::{HistoryError, HistorySink, InMemoryHistory},
    slider::SliderState,
};
use tracing::info;

use crate::config::{CalcConfig, ConfigError};

#[derive(Debug, Clone)]
pub struct AppState {
    calculator: Calculator,
    history: InMemoryHistory,
    slider: SliderState,
    formatter: NumberFormatter,
    money_max_length: usize,
}

impl AppState {
    /// Builds a fresh session from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration fails validation.
    pub fn from_config(config: &CalcConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let formatter = config.formatter()?;

        Ok(Self {
            calculator: Calculator::new().with_formatter(formatter.clone()),
            history: InMemoryHistory::default(),
            slider: config.slider_state()?,
            formatter,
            money_max_length: config.entry.money_max_length,
        })
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    pub fn formatter(&self) -> &NumberFormatter {
        &self.formatter
    }

    pub fn slider(&self) -> &SliderState {
        &self.slider
    }

    pub fn slider_mut(&mut self) -> &mut SliderState {
        &mut self.slider
    }

    /// A blank money-entry field using the session locale and length limit.
    pub fn money_entry(&self) -> Calculator {
        Calculator::new()
            .with_formatter(self.formatter.clone())
            .with_max_length(self.money_max_length)
    }

    /// Feeds `keys` to the calculator, recording every finished calculation.
    ///
    /// Returns the number of calculations recorded.
    pub fn press_keys(
        &mut self,
        keys: &[Key],
    ) -> Result<usize, HistoryError> {
        let mut recorded = 0;
        for &key in keys {
            if let Some(completed) = self.calculator.press(key) {
                self.history.record(HistoryEntry::from(completed))?;
                recorded += 1;
            }
        }
        Ok(recorded)
    }

    pub fn history(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        self.history.entries()
    }

    pub fn clear_history(&mut self) -> Result<(), HistoryError> {
        self.history.clear()?;
        info!("history cleared");
        Ok(())
    }
}
