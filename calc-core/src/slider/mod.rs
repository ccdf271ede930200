//! Semicircular percentage slider.
//!
//! [`geometry`] holds the pure value ↔ angle mapping; [`SliderState`] adds the
//! drag gesture and anti-jitter commit rule on top of it.

pub mod geometry;
mod range;
mod state;

pub use geometry::{
    ARC_SPAN_DEGREES, Angle, Point, angle_for_value, angle_for_value_with_span,
    value_for_drag_point,
};
pub use range::{SliderError, SliderRange};
pub use state::{DragPhase, SliderState};
