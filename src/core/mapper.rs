//! Pure conversions between viewport fractions, timeline positions and
//! virtual-canvas coordinates.
//!
//! All inputs are assumed well-formed (non-empty timeline, `end > start`);
//! validation happens at the API boundary, not here.

use crate::core::Viewport;

/// Width the full timeline would occupy if rendered at the viewport's zoom
/// level.
#[must_use]
pub fn virtual_width(container_width: f64, viewport: Viewport) -> f64 {
    container_width / viewport.span()
}

/// Horizontal translation applied to the drawing context so the visible
/// window aligns with the physical canvas origin.
#[must_use]
pub fn viewport_offset(virtual_width: f64, viewport_start: f64) -> f64 {
    -(virtual_width * viewport_start)
}

/// Pixels per millisecond of timeline.
#[must_use]
pub fn ratio_x(virtual_width: f64, timeline_span_ms: f64) -> f64 {
    virtual_width / timeline_span_ms
}

/// Virtual-canvas X for a timestamp.
#[must_use]
pub fn x_for_stamp(stamp: i64, first_stamp: i64, ratio_x: f64) -> f64 {
    ((stamp - first_stamp) as f64) * ratio_x
}

/// Virtual-canvas Y for a value, given the eased vertical scale.
#[must_use]
pub fn y_for_value(chart_height: f64, value: f64, lower_border: f64, ratio_y: f64) -> f64 {
    chart_height - (value - lower_border) * ratio_y
}

#[cfg(test)]
mod tests {
    use super::{ratio_x, viewport_offset, virtual_width, x_for_stamp, y_for_value};
    use crate::core::Viewport;

    #[test]
    fn virtual_width_round_trips_the_zoom_transform() {
        let viewport = Viewport::new(0.25, 0.75).expect("viewport");
        let virtual_w = virtual_width(800.0, viewport);
        assert!((virtual_w * viewport.span() - 800.0).abs() < 1e-9);
    }

    #[test]
    fn viewport_offset_translates_visible_window_to_origin() {
        let viewport = Viewport::new(0.5, 1.0).expect("viewport");
        let virtual_w = virtual_width(400.0, viewport);
        // The window's left edge in virtual space lands at the canvas origin.
        assert_eq!(viewport_offset(virtual_w, viewport.start) + virtual_w * 0.5, 0.0);
    }

    #[test]
    fn x_projection_is_linear_in_time() {
        let rx = ratio_x(1000.0, 10_000.0);
        assert_eq!(x_for_stamp(100, 100, rx), 0.0);
        assert!((x_for_stamp(5_100, 100, rx) - 500.0).abs() < 1e-9);
        assert!((x_for_stamp(10_100, 100, rx) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn y_projection_anchors_lower_border_to_chart_floor() {
        let y = y_for_value(300.0, 40.0, 40.0, 2.0);
        assert_eq!(y, 300.0);
        assert_eq!(y_for_value(300.0, 140.0, 40.0, 2.0), 100.0);
    }
}
