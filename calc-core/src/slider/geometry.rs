//! Mapping between slider values and positions on a semicircular track.
//!
//! The track is the upper half of a circle in screen coordinates (`y` grows
//! downward). The minimum value sits at the left end (180°) and the maximum at
//! the right end (0°):
//!
//! ```text
//!            90°
//!         .-""""-.
//!       /          \
//!  180° +-----c-----+ 0°
//!   min   (center)   max
//! ```

use serde::{Deserialize, Serialize};

use super::SliderRange;

/// Angular extent of the semicircular track.
pub const ARC_SPAN_DEGREES: f64 = 180.0;

/// An angle measured counter-clockwise from the positive x axis.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    pub const ZERO: Angle = Angle { degrees: 0.0 };
    pub const STRAIGHT: Angle = Angle {
        degrees: ARC_SPAN_DEGREES,
    };

    pub fn from_degrees(degrees: f64) -> Self {
        Self { degrees }
    }

    pub fn from_radians(radians: f64) -> Self {
        Self {
            degrees: radians.to_degrees(),
        }
    }

    pub fn degrees(&self) -> f64 {
        self.degrees
    }

    pub fn radians(&self) -> f64 {
        self.degrees.to_radians()
    }
}

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(
        x: f64,
        y: f64,
    ) -> Self {
        Self { x, y }
    }
}

/// Needle angle for `value` on a 180° track.
///
/// # Examples
///
/// ```
/// use calc_core::slider::{SliderRange, angle_for_value};
///
/// let range = SliderRange::percent();
/// assert_eq!(angle_for_value(0.0, range).degrees(), 180.0);
/// assert_eq!(angle_for_value(50.0, range).degrees(), 90.0);
/// assert_eq!(angle_for_value(100.0, range).degrees(), 0.0);
/// ```
pub fn angle_for_value(
    value: f64,
    range: SliderRange,
) -> Angle {
    angle_for_value_with_span(value, range, Angle::STRAIGHT)
}

/// Needle angle for `value` on a track spanning `arc_span`.
///
/// The value's position is clamped to the range first, so values that are
/// transiently out of range during an animation pin the needle to an end.
pub fn angle_for_value_with_span(
    value: f64,
    range: SliderRange,
    arc_span: Angle,
) -> Angle {
    let fraction = range.fraction_of(value);
    Angle::from_degrees(arc_span.degrees() - arc_span.degrees() * fraction)
}

/// Angle of the drag point as seen from the arc center, confined to the track.
///
/// Points below the diameter line snap to the nearer end instead of wrapping
/// around, so overshooting the track does not make the value jump.
pub fn drag_angle(
    point: Point,
    arc_center: Point,
) -> Angle {
    let dx = point.x - arc_center.x;
    // positive above the center, since screen y grows downward
    let up = arc_center.y - point.y;

    if !(dx.is_finite() && up.is_finite()) {
        return Angle::STRAIGHT;
    }

    if up < 0.0 {
        return if dx >= 0.0 {
            Angle::ZERO
        } else {
            Angle::STRAIGHT
        };
    }

    let degrees = up.atan2(dx).to_degrees();
    Angle::from_degrees(degrees.clamp(0.0, ARC_SPAN_DEGREES))
}

/// Unstepped value under `angle`, used for smooth visual tracking.
pub fn raw_value_for_angle(
    angle: Angle,
    range: SliderRange,
) -> f64 {
    let fraction = (ARC_SPAN_DEGREES - angle.degrees()) / ARC_SPAN_DEGREES;
    range.clamp(range.min() + fraction.clamp(0.0, 1.0) * range.span())
}

/// Rounds `raw` to the nearest `min + k * step` that lies inside the range.
///
/// A non-positive or non-finite `step` disables snapping; the value is only clamped.
pub fn snap_to_step(
    raw: f64,
    range: SliderRange,
    step: f64,
) -> f64 {
    if !(step.is_finite() && step > 0.0) {
        return range.clamp(raw);
    }

    // the tolerance keeps an exact multiple from flooring one step short
    let max_steps = (range.span() / step + 1e-9).floor();
    let steps = ((raw - range.min()) / step).round();
    let steps = if steps.is_nan() {
        0.0
    } else {
        steps.clamp(0.0, max_steps)
    };

    range.clamp(range.min() + steps * step)
}

/// Committed value for a drag at `point`: angle, then position, then the
/// nearest step, then the range bounds.
///
/// # Examples
///
/// ```
/// use calc_core::slider::{Point, SliderRange, value_for_drag_point};
///
/// let center = Point::new(100.0, 100.0);
/// let range = SliderRange::percent();
///
/// // straight up is the middle of the track
/// assert_eq!(value_for_drag_point(Point::new(100.0, 0.0), center, range, 5.0), 50.0);
/// // below the track on the right pins to the maximum
/// assert_eq!(value_for_drag_point(Point::new(180.0, 140.0), center, range, 5.0), 100.0);
/// ```
pub fn value_for_drag_point(
    point: Point,
    arc_center: Point,
    range: SliderRange,
    step: f64,
) -> f64 {
    let angle = drag_angle(point, arc_center);
    let raw = raw_value_for_angle(angle, range);
    snap_to_step(raw, range, step)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const CENTER: Point = Point { x: 100.0, y: 100.0 };

    fn approx_eq(
        a: f64,
        b: f64,
    ) -> bool {
        (a - b).abs() < 1e-9
    }

    // =========================================================================
    // angle_for_value tests
    // =========================================================================

    #[test]
    fn angle_for_value_maps_linearly() {
        let range = SliderRange::percent();

        assert_eq!(angle_for_value(25.0, range).degrees(), 135.0);
        assert_eq!(angle_for_value(75.0, range).degrees(), 45.0);
    }

    #[test]
    fn angle_for_value_clamps_out_of_range_values() {
        let range = SliderRange::percent();

        assert_eq!(angle_for_value(-20.0, range).degrees(), 180.0);
        assert_eq!(angle_for_value(250.0, range).degrees(), 0.0);
    }

    #[test]
    fn angle_for_value_respects_offset_range() {
        let range = SliderRange::new(10.0, 30.0).unwrap();

        assert_eq!(angle_for_value(20.0, range).degrees(), 90.0);
    }

    #[test]
    fn angle_for_value_with_custom_span() {
        let range = SliderRange::percent();
        let span = Angle::from_degrees(270.0);

        assert_eq!(angle_for_value_with_span(50.0, range, span).degrees(), 135.0);
    }

    #[test]
    fn angle_radians_conversion() {
        assert!(approx_eq(Angle::STRAIGHT.radians(), std::f64::consts::PI));
        assert!(approx_eq(
            Angle::from_radians(std::f64::consts::FRAC_PI_2).degrees(),
            90.0
        ));
    }

    // =========================================================================
    // drag_angle tests
    // =========================================================================

    #[test]
    fn drag_angle_on_track() {
        assert_eq!(drag_angle(Point::new(150.0, 100.0), CENTER).degrees(), 0.0);
        assert!(approx_eq(
            drag_angle(Point::new(100.0, 50.0), CENTER).degrees(),
            90.0
        ));
        assert!(approx_eq(
            drag_angle(Point::new(50.0, 100.0), CENTER).degrees(),
            180.0
        ));
        assert!(approx_eq(
            drag_angle(Point::new(150.0, 50.0), CENTER).degrees(),
            45.0
        ));
    }

    #[test]
    fn drag_angle_below_diameter_snaps_to_nearer_end() {
        assert_eq!(drag_angle(Point::new(160.0, 130.0), CENTER), Angle::ZERO);
        assert_eq!(drag_angle(Point::new(40.0, 130.0), CENTER), Angle::STRAIGHT);
        assert_eq!(drag_angle(Point::new(100.0, 130.0), CENTER), Angle::ZERO);
    }

    #[test]
    fn drag_angle_non_finite_point_pins_to_minimum() {
        assert_eq!(drag_angle(Point::new(f64::NAN, 0.0), CENTER), Angle::STRAIGHT);
    }

    // =========================================================================
    // snap_to_step tests
    // =========================================================================

    #[test]
    fn snap_rounds_to_nearest_step() {
        let range = SliderRange::percent();

        assert_eq!(snap_to_step(12.4, range, 5.0), 10.0);
        assert_eq!(snap_to_step(12.5, range, 5.0), 15.0);
        assert_eq!(snap_to_step(98.0, range, 5.0), 100.0);
    }

    #[test]
    fn snap_is_relative_to_minimum() {
        let range = SliderRange::new(3.0, 23.0).unwrap();

        assert_eq!(snap_to_step(9.0, range, 5.0), 8.0);
    }

    #[test]
    fn snap_never_leaves_range() {
        let range = SliderRange::new(0.0, 10.0).unwrap();

        assert_eq!(snap_to_step(9.9, range, 3.0), 9.0);
        assert_eq!(snap_to_step(-4.0, range, 3.0), 0.0);
    }

    #[test]
    fn snap_without_step_only_clamps() {
        let range = SliderRange::percent();

        assert_eq!(snap_to_step(33.3, range, 0.0), 33.3);
        assert_eq!(snap_to_step(120.0, range, f64::NAN), 100.0);
    }

    // =========================================================================
    // value_for_drag_point tests
    // =========================================================================

    #[test]
    fn value_for_drag_point_ends_of_track() {
        let range = SliderRange::percent();

        assert_eq!(value_for_drag_point(Point::new(0.0, 100.0), CENTER, range, 1.0), 0.0);
        assert_eq!(value_for_drag_point(Point::new(200.0, 100.0), CENTER, range, 1.0), 100.0);
    }

    #[test]
    fn value_for_drag_point_diagonal_is_stepped() {
        let range = SliderRange::percent();

        // 45° → 75 exactly, 60° → 66.67 → 65 with a step of 5
        assert_eq!(value_for_drag_point(Point::new(150.0, 50.0), CENTER, range, 5.0), 75.0);
        let sixty = Point::new(100.0 + 50.0, 100.0 - 50.0 * 3f64.sqrt());
        assert_eq!(value_for_drag_point(sixty, CENTER, range, 5.0), 65.0);
    }

    #[test]
    fn value_for_drag_point_overshoot_left_pins_minimum() {
        let range = SliderRange::new(5.0, 30.0).unwrap();

        assert_eq!(value_for_drag_point(Point::new(20.0, 160.0), CENTER, range, 1.0), 5.0);
    }
}
