use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when building slider bounds.
#[derive(Debug, Error, PartialEq)]
pub enum SliderError {
    /// `min` must be finite and strictly below a finite `max`.
    #[error("invalid slider range {min}..={max}")]
    InvalidRange { min: f64, max: f64 },

    /// The step must be finite, positive and no wider than the range.
    #[error("invalid slider step {0}")]
    InvalidStep(f64),
}

/// Closed interval a slider value is confined to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct SliderRange {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawRange {
    min: f64,
    max: f64,
}

impl TryFrom<RawRange> for SliderRange {
    type Error = SliderError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::new(raw.min, raw.max)
    }
}

impl SliderRange {
    /// # Errors
    ///
    /// Returns [`SliderError::InvalidRange`] unless both bounds are finite and `min < max`.
    pub fn new(
        min: f64,
        max: f64,
    ) -> Result<Self, SliderError> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(SliderError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// `0..=100`, the range of the percentage sliders.
    pub fn percent() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn clamp(
        &self,
        value: f64,
    ) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Position of `value` within the range as a fraction in `[0, 1]`.
    ///
    /// Out-of-range and non-finite values are pinned to the nearest end.
    pub fn fraction_of(
        &self,
        value: f64,
    ) -> f64 {
        let fraction = (value - self.min) / self.span();
        if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        }
    }

    /// Checks that `step` can be used with this range.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::InvalidStep`] unless `0 < step <= span`.
    pub fn validate_step(
        &self,
        step: f64,
    ) -> Result<(), SliderError> {
        if step.is_finite() && step > 0.0 && step <= self.span() {
            Ok(())
        } else {
            Err(SliderError::InvalidStep(step))
        }
    }
}
