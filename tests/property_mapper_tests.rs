use proptest::prelude::*;
use timechart::core::mapper::{ratio_x, viewport_offset, virtual_width, x_for_stamp};
use timechart::core::range::lower_border;
use timechart::core::Viewport;

proptest! {
    #[test]
    fn virtual_width_inverts_the_zoom(
        container in 1.0_f64..4096.0,
        start in 0.0_f64..0.98,
        span in 0.01_f64..1.0,
    ) {
        let end = (start + span).min(1.0);
        prop_assume!(end > start);
        let viewport = Viewport::new(start, end).expect("viewport");

        let virtual_w = virtual_width(container, viewport);
        prop_assert!(virtual_w >= container);
        prop_assert!((virtual_w * viewport.span() - container).abs() < 1e-6);
    }

    #[test]
    fn visible_window_left_edge_lands_on_the_canvas_origin(
        container in 1.0_f64..4096.0,
        start in 0.0_f64..0.98,
    ) {
        let viewport = Viewport::new(start, 1.0).expect("viewport");
        let virtual_w = virtual_width(container, viewport);
        let offset = viewport_offset(virtual_w, viewport.start);

        // Physical x = virtual x + offset; the window's left edge maps to 0.
        prop_assert!((virtual_w * viewport.start + offset).abs() < 1e-9);
    }

    #[test]
    fn x_projection_spans_the_virtual_canvas(
        first in 0_i64..1_000_000,
        span_ms in 1_i64..10_000_000,
        virtual_w in 1.0_f64..100_000.0,
    ) {
        let last = first + span_ms;
        let rx = ratio_x(virtual_w, span_ms as f64);

        prop_assert_eq!(x_for_stamp(first, first, rx), 0.0);
        prop_assert!((x_for_stamp(last, first, rx) - virtual_w).abs() < 1e-6);
    }

    #[test]
    fn lower_border_stays_grid_safe(
        min in 0.0_f64..10_000.0,
        extra in 0.001_f64..10_000.0,
    ) {
        let max = min + extra;
        let border = lower_border(min, max, 0.0);

        prop_assert!(border >= 0.0);
        prop_assert!(border <= min);
        prop_assert!(border.is_finite());
    }
}
