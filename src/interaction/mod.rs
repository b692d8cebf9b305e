//! Pointer-gesture state machines for the overview map's selection window.
//!
//! Each gesture captures its entry data on `begin_*`, translates pointer
//! motion into a clamped window, and tears down on `on_pointer_up` no matter
//! where the pointer ended up.

use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};

/// Minimum selection-window width in pixels; keeps the viewport span
/// strictly positive so no degenerate viewport can be published.
pub const MIN_WINDOW_WIDTH_PX: f64 = 40.0;

/// Selection window in map-canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderWindow {
    pub offset: f64,
    pub width: f64,
}

impl SliderWindow {
    #[must_use]
    pub const fn new(offset: f64, width: f64) -> Self {
        Self { offset, width }
    }

    #[must_use]
    pub fn right_edge(self) -> f64 {
        self.offset + self.width
    }

    /// Converts the pixel window back into timeline fractions, clamped into
    /// `[0, 1]` on both sides.
    #[must_use]
    pub fn to_viewport(self, canvas_width: f64) -> Viewport {
        Viewport {
            start: (self.offset / canvas_width).max(0.0),
            end: (self.right_edge() / canvas_width).min(1.0),
        }
    }
}

/// Active gesture with its entry data, captured at the transition out of
/// `Idle`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapGesture {
    Idle,
    /// Drag the whole window; width never changes.
    MoveWindow {
        origin_x: f64,
        start_offset: f64,
        left_shift: f64,
        right_shift: f64,
        width: f64,
    },
    /// Drag the left edge; the right edge stays put.
    ResizeLeft {
        origin_x: f64,
        start_offset: f64,
        origin_width: f64,
        left_shift: f64,
        right_edge: f64,
    },
    /// Drag the right edge; the offset stays put.
    ResizeRight {
        origin_x: f64,
        offset: f64,
        origin_width: f64,
    },
}

/// Translates pointer motion into clamped selection-window edits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderController {
    canvas_width: f64,
    window: SliderWindow,
    gesture: MapGesture,
}

impl SliderController {
    pub fn new(canvas_width: f64, viewport: Viewport) -> ChartResult<Self> {
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(ChartError::InvalidCanvas {
                width: canvas_width,
                height: 0.0,
            });
        }
        viewport.validate()?;

        Ok(Self {
            canvas_width,
            window: SliderWindow::new(
                viewport.start * canvas_width,
                viewport.span() * canvas_width,
            ),
            gesture: MapGesture::Idle,
        })
    }

    #[must_use]
    pub fn window(self) -> SliderWindow {
        self.window
    }

    #[must_use]
    pub fn viewport(self) -> Viewport {
        self.window.to_viewport(self.canvas_width)
    }

    #[must_use]
    pub fn is_dragging(self) -> bool {
        !matches!(self.gesture, MapGesture::Idle)
    }

    #[must_use]
    pub fn gesture(self) -> MapGesture {
        self.gesture
    }

    /// Rescales the window so it keeps covering the same timeline fractions
    /// after the map canvas changes width.
    pub fn set_canvas_width(&mut self, canvas_width: f64) -> ChartResult<()> {
        if !canvas_width.is_finite() || canvas_width <= 0.0 {
            return Err(ChartError::InvalidCanvas {
                width: canvas_width,
                height: 0.0,
            });
        }

        let viewport = self.viewport();
        self.window = SliderWindow::new(
            viewport.start * canvas_width,
            viewport.span() * canvas_width,
        );
        self.canvas_width = canvas_width;
        Ok(())
    }

    /// Applies an externally produced viewport (e.g. an API call on the
    /// chart) to the window geometry. Ignored mid-gesture so an in-flight
    /// drag keeps its captured anchors.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        viewport.validate()?;
        if self.is_dragging() {
            return Ok(());
        }
        self.window = SliderWindow::new(
            viewport.start * self.canvas_width,
            viewport.span() * self.canvas_width,
        );
        Ok(())
    }

    pub fn begin_move(&mut self, pointer_x: f64) {
        self.gesture = MapGesture::MoveWindow {
            origin_x: pointer_x,
            start_offset: self.window.offset,
            left_shift: pointer_x - self.window.offset,
            right_shift: self.window.right_edge() - pointer_x,
            width: self.window.width,
        };
    }

    pub fn begin_resize_left(&mut self, pointer_x: f64) {
        self.gesture = MapGesture::ResizeLeft {
            origin_x: pointer_x,
            start_offset: self.window.offset,
            origin_width: self.window.width,
            left_shift: pointer_x - self.window.offset,
            right_edge: self.window.right_edge(),
        };
    }

    pub fn begin_resize_right(&mut self, pointer_x: f64) {
        self.gesture = MapGesture::ResizeRight {
            origin_x: pointer_x,
            offset: self.window.offset,
            origin_width: self.window.width,
        };
    }

    /// Recomputes the window for a pointer position; `None` while idle.
    pub fn on_pointer_move(&mut self, pointer_x: f64) -> Option<SliderWindow> {
        let next = match self.gesture {
            MapGesture::Idle => return None,
            MapGesture::MoveWindow {
                origin_x,
                start_offset,
                left_shift,
                right_shift,
                width,
            } => {
                // At either clamp boundary the window snaps fully to that
                // edge instead of stopping the drag.
                if pointer_x - left_shift < 0.0 {
                    SliderWindow::new(0.0, width)
                } else if pointer_x + right_shift > self.canvas_width {
                    SliderWindow::new(self.canvas_width - width, width)
                } else {
                    SliderWindow::new(start_offset + (pointer_x - origin_x), width)
                }
            }
            MapGesture::ResizeRight {
                origin_x,
                offset,
                origin_width,
            } => {
                let new_width = origin_width + (pointer_x - origin_x);
                if new_width < MIN_WINDOW_WIDTH_PX {
                    SliderWindow::new(offset, MIN_WINDOW_WIDTH_PX)
                } else if offset + new_width >= self.canvas_width {
                    SliderWindow::new(offset, self.canvas_width - offset)
                } else {
                    SliderWindow::new(offset, new_width)
                }
            }
            MapGesture::ResizeLeft {
                origin_x,
                start_offset,
                origin_width,
                left_shift,
                right_edge,
            } => {
                let delta = pointer_x - origin_x;
                let new_width = origin_width - delta;
                if new_width < MIN_WINDOW_WIDTH_PX {
                    // Pin the right edge where it was before the clamp; the
                    // user is anchoring that side, not the left.
                    SliderWindow::new(right_edge - MIN_WINDOW_WIDTH_PX, MIN_WINDOW_WIDTH_PX)
                } else if pointer_x - left_shift <= 0.0 {
                    SliderWindow::new(0.0, right_edge)
                } else {
                    SliderWindow::new(start_offset + delta, new_width)
                }
            }
        };

        self.window = next;
        Some(next)
    }

    /// Unconditional teardown back to `Idle`, regardless of where the
    /// pointer ended up.
    pub fn on_pointer_up(&mut self) {
        self.gesture = MapGesture::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::{MIN_WINDOW_WIDTH_PX, SliderController};
    use crate::core::Viewport;

    fn controller() -> SliderController {
        SliderController::new(400.0, Viewport::new(0.25, 0.5).expect("viewport"))
            .expect("controller")
    }

    #[test]
    fn move_gesture_translates_window_and_keeps_width() {
        let mut slider = controller();
        slider.begin_move(150.0);
        let window = slider.on_pointer_move(170.0).expect("dragging");
        assert_eq!(window.offset, 120.0);
        assert_eq!(window.width, 100.0);
    }

    #[test]
    fn move_gesture_snaps_to_edges() {
        let mut slider = controller();
        slider.begin_move(150.0);

        let window = slider.on_pointer_move(-500.0).expect("dragging");
        assert_eq!(window.offset, 0.0);
        assert_eq!(window.width, 100.0);

        let window = slider.on_pointer_move(900.0).expect("dragging");
        assert_eq!(window.offset, 300.0);
        assert_eq!(window.right_edge(), 400.0);
    }

    #[test]
    fn resize_left_min_width_pins_right_edge() {
        let mut slider = controller();
        slider.begin_resize_left(100.0);
        let window = slider.on_pointer_move(195.0).expect("dragging");
        assert_eq!(window.width, MIN_WINDOW_WIDTH_PX);
        assert_eq!(window.right_edge(), 200.0);
    }

    #[test]
    fn resize_right_clamps_to_canvas_and_min_width() {
        let mut slider = controller();
        slider.begin_resize_right(200.0);

        let window = slider.on_pointer_move(1000.0).expect("dragging");
        assert_eq!(window.offset, 100.0);
        assert_eq!(window.right_edge(), 400.0);

        let window = slider.on_pointer_move(80.0).expect("dragging");
        assert_eq!(window.width, MIN_WINDOW_WIDTH_PX);
        assert_eq!(window.offset, 100.0);
    }

    #[test]
    fn pointer_up_tears_down_the_gesture() {
        let mut slider = controller();
        slider.begin_move(150.0);
        slider.on_pointer_up();
        assert!(!slider.is_dragging());
        assert!(slider.on_pointer_move(300.0).is_none());
    }

    #[test]
    fn window_converts_to_clamped_viewport_fractions() {
        let slider = controller();
        let viewport = slider.viewport();
        assert!((viewport.start - 0.25).abs() < 1e-12);
        assert!((viewport.end - 0.5).abs() < 1e-12);
    }
}
