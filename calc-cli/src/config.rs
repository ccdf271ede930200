//! On-disk configuration for the `calc` binary.
//!
//! Every section and field is optional. A file containing only
//!
//! ```toml
//! [format]
//! decimal_separator = ","
//! grouping_separator = "."
//! currency_symbol = "€"
//! ```
//!
//! keeps the default slider, entry and logging settings.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use calc_core::{
    FormatConfig, NumberFormatter,
    calculator::MONEY_ENTRY_MAX_LENGTH,
    engine::FormatConfigError,
    slider::{SliderError, SliderRange, SliderState},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid [format] section: {0}")]
    Format(#[from] FormatConfigError),

    #[error("invalid [slider] section: {0}")]
    Slider(#[from] SliderError),

    #[error("[entry] money_max_length must be at least 1")]
    ZeroMaxLength,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Value the slider starts at, snapped to the step grid.
    pub initial: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
            initial: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryConfig {
    /// Buffer limit for money-entry fields.
    pub money_max_length: usize,
}

impl Default for EntryConfig {
    fn default() -> Self {
        Self {
            money_max_length: MONEY_ENTRY_MAX_LENGTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Bare level or full `EnvFilter` directive.
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    pub format: FormatConfig,
    pub slider: SliderConfig,
    pub entry: EntryConfig,
    pub logging: LoggingConfig,
}

impl CalcConfig {
    /// Loads the configuration at `path`, or the defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read, is not valid TOML,
    /// or holds values rejected by [`CalcConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("no config file given, using defaults");
            return Ok(Self::default());
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config
            .validate()
            .inspect_err(|e| warn!(path = %path.display(), error = %e, "rejected config file"))?;
        debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Checks every section without building anything.
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in section order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.formatter()?;
        self.slider_state()?;
        if self.entry.money_max_length == 0 {
            return Err(ConfigError::ZeroMaxLength);
        }
        Ok(())
    }

    /// Formatter for the `[format]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Format`] when the separators are unusable.
    pub fn formatter(&self) -> Result<NumberFormatter, ConfigError> {
        Ok(NumberFormatter::new(self.format.clone())?)
    }

    /// Idle slider for the `[slider]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Slider`] when the bounds or step are invalid.
    pub fn slider_state(&self) -> Result<SliderState, ConfigError> {
        let range = SliderRange::new(self.slider.min, self.slider.max)?;
        Ok(SliderState::new(
            range,
            self.slider.step,
            self.slider.initial,
        )?)
    }
}
