use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::geometry::{
    Angle, Point, angle_for_value, drag_angle, raw_value_for_angle, snap_to_step,
};
use super::{SliderError, SliderRange};

/// Gesture phase of a slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging,
}

/// Value and gesture state of one percentage slider.
///
/// The committed [`value`](SliderState::value) is always on the step grid.
/// While dragging, [`tracking_value`](SliderState::tracking_value) follows the
/// finger without snapping so the needle moves smoothly. A new value is only
/// committed when it moves at least half a step away from the last one; each
/// commit is returned to the caller, which is where haptic feedback belongs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderState {
    value: f64,
    tracking: f64,
    range: SliderRange,
    step: f64,
    phase: DragPhase,
}

impl SliderState {
    /// Creates an idle slider whose value is `initial` snapped to the grid.
    ///
    /// # Errors
    ///
    /// Returns [`SliderError::InvalidStep`] when `step` does not fit `range`.
    pub fn new(
        range: SliderRange,
        step: f64,
        initial: f64,
    ) -> Result<Self, SliderError> {
        range.validate_step(step)?;
        let value = snap_to_step(initial, range, step);
        Ok(Self {
            value,
            tracking: value,
            range,
            step,
            phase: DragPhase::Idle,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn tracking_value(&self) -> f64 {
        self.tracking
    }

    pub fn range(&self) -> SliderRange {
        self.range
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Needle angle: follows the finger while dragging, the committed value otherwise.
    pub fn angle(&self) -> Angle {
        match self.phase {
            DragPhase::Dragging => angle_for_value(self.tracking, self.range),
            DragPhase::Idle => angle_for_value(self.value, self.range),
        }
    }

    pub fn begin_drag(&mut self) {
        self.phase = DragPhase::Dragging;
        self.tracking = self.value;
        trace!(value = self.value, "drag started");
    }

    /// Moves the drag to `point`. Returns the new value when it was committed.
    ///
    /// Ignored unless a drag is in progress.
    pub fn drag_to(
        &mut self,
        point: Point,
        arc_center: Point,
    ) -> Option<f64> {
        if self.phase != DragPhase::Dragging {
            trace!("ignoring drag movement while idle");
            return None;
        }

        self.tracking = raw_value_for_angle(drag_angle(point, arc_center), self.range);
        let stepped = snap_to_step(self.tracking, self.range, self.step);
        self.commit(stepped)
    }

    /// Finishes the drag, keeping the last committed value.
    pub fn end_drag(&mut self) -> f64 {
        self.phase = DragPhase::Idle;
        self.tracking = self.value;
        trace!(value = self.value, "drag ended");
        self.value
    }

    /// Moves one step up; a no-op at the maximum.
    pub fn increment(&mut self) -> Option<f64> {
        self.set_value(self.value + self.step)
    }

    /// Moves one step down; a no-op at the minimum.
    pub fn decrement(&mut self) -> Option<f64> {
        self.set_value(self.value - self.step)
    }

    /// Snaps and clamps `value`, committing it if it differs from the current one.
    pub fn set_value(
        &mut self,
        value: f64,
    ) -> Option<f64> {
        let committed = self.commit(snap_to_step(value, self.range, self.step));
        if self.phase == DragPhase::Idle {
            self.tracking = self.value;
        }
        committed
    }

    fn commit(
        &mut self,
        candidate: f64,
    ) -> Option<f64> {
        if (candidate - self.value).abs() < self.step / 2.0 {
            return None;
        }
        debug!(from = self.value, to = candidate, "slider value committed");
        self.value = candidate;
        Some(candidate)
    }
}
