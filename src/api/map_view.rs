//! Overview map: the full-timeline miniature under the chart.
//!
//! The map never zooms, so its horizontal scale is fixed; what animates is
//! each series' opacity and its private vertical ratio, which retargets when
//! legend toggles change the set of active series. The map runs its own dirty
//! flag and settles independently of the main surfaces.

use crate::core::spring::{Spring, VALUE_EPSILON};
use crate::core::{CanvasSize, Series, SpringTuning, Timeline, Viewport};
use crate::error::ChartResult;
use crate::interaction::SliderController;
use crate::render::{PolylinePrimitive, RenderFrame, Renderer, Surface};

/// Elapsed-time cap for the map's springs; slightly looser than the main
/// chart since the map redraws less often.
pub const MAP_FRAME_DELTA_CAP_MS: f64 = 50.0;

/// Animated state the map keeps per series, parallel to the chart's series
/// list.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MapSeriesMotion {
    opacity: Spring,
    ratio_y: Spring,
}

/// Full-timeline miniature with the viewport selection window.
#[derive(Debug)]
pub struct MapView {
    canvas: CanvasSize,
    slider: SliderController,
    motions: Vec<MapSeriesMotion>,
    min_y: f64,
    max_y: f64,
    dirty: bool,
    prev_ts_ms: Option<f64>,
}

impl MapView {
    pub fn new(canvas: CanvasSize, viewport: Viewport, series: &[Series]) -> ChartResult<Self> {
        canvas.validate()?;
        let slider = SliderController::new(canvas.width, viewport)?;

        let (min_y, max_y) = value_extent(series, |_| true);
        let spread = (max_y - min_y).max(f64::MIN_POSITIVE);
        let ratio = canvas.height / spread;
        let motions = series
            .iter()
            .map(|series| MapSeriesMotion {
                opacity: Spring::at(series.opacity.value),
                ratio_y: Spring::at(ratio),
            })
            .collect();

        Ok(Self {
            canvas,
            slider,
            motions,
            min_y,
            max_y,
            dirty: true,
            prev_ts_ms: None,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.slider.viewport()
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.slider.is_dragging()
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.slider.set_viewport(viewport)?;
        self.dirty = true;
        Ok(())
    }

    pub fn resize(&mut self, canvas: CanvasSize) -> ChartResult<()> {
        canvas.validate()?;
        // Vertical ratios scale with the height change so lines keep their
        // relative shape without re-animating.
        let scale = canvas.height / self.canvas.height;
        for motion in &mut self.motions {
            motion.ratio_y.value *= scale;
            motion.ratio_y.target *= scale;
        }
        self.slider.set_canvas_width(canvas.width)?;
        self.canvas = canvas;
        self.dirty = true;
        Ok(())
    }

    /// A series was toggled on: the vertical extent covers all series again,
    /// and the re-appearing line must not sweep in from a stale scale, so its
    /// ratio snaps while the others ease.
    pub fn turn_on(&mut self, index: usize, series: &[Series]) {
        let (min_y, max_y) = value_extent(series, |_| true);
        self.min_y = min_y;
        self.max_y = max_y;
        let spread = max_y - min_y;
        if spread <= 0.0 {
            return;
        }
        let ratio = self.canvas.height / spread;

        for (position, motion) in self.motions.iter_mut().enumerate() {
            if position == index {
                motion.ratio_y.snap(ratio);
                motion.opacity.target = 1.0;
            } else {
                motion.ratio_y.target = ratio;
            }
        }
        self.dirty = true;
    }

    /// A series was toggled off: it fades out in place while the remaining
    /// active series ease to the extent computed without it.
    pub fn turn_off(&mut self, index: usize, series: &[Series]) {
        if let Some(motion) = self.motions.get_mut(index) {
            motion.opacity.target = 0.0;
        }

        let (min_y, max_y) = value_extent(series, Series::is_active);
        let spread = max_y - min_y;
        if spread <= 0.0 {
            self.dirty = true;
            return;
        }
        self.min_y = min_y;
        self.max_y = max_y;
        let ratio = self.canvas.height / spread;

        for (motion, series) in self.motions.iter_mut().zip(series) {
            if series.is_active() {
                motion.ratio_y.target = ratio;
            }
        }
        self.dirty = true;
    }

    pub fn begin_move(&mut self, pointer_x: f64) {
        self.slider.begin_move(pointer_x);
    }

    pub fn begin_resize_left(&mut self, pointer_x: f64) {
        self.slider.begin_resize_left(pointer_x);
    }

    pub fn begin_resize_right(&mut self, pointer_x: f64) {
        self.slider.begin_resize_right(pointer_x);
    }

    /// Feeds pointer motion to the active gesture; returns the new viewport
    /// when the selection window actually moved.
    pub fn pointer_moved(&mut self, pointer_x: f64) -> Option<Viewport> {
        let window = self.slider.on_pointer_move(pointer_x)?;
        self.dirty = true;
        Some(window.to_viewport(self.canvas.width))
    }

    pub fn pointer_released(&mut self) {
        self.slider.on_pointer_up();
    }

    /// Advances the map's springs and redraws its surface when dirty.
    ///
    /// Returns whether the map still wants another frame.
    pub fn update<R: Renderer>(
        &mut self,
        now_ms: f64,
        tuning: SpringTuning,
        timeline: &Timeline,
        series: &[Series],
        renderer: &mut R,
    ) -> ChartResult<bool> {
        if !self.dirty {
            self.prev_ts_ms = Some(now_ms);
            return Ok(false);
        }

        let prev = self.prev_ts_ms.unwrap_or(now_ms);
        self.prev_ts_ms = Some(now_ms);
        let delta_ms = (now_ms - prev).clamp(0.0, MAP_FRAME_DELTA_CAP_MS);

        let mut animating = false;
        for motion in &mut self.motions {
            let opacity_settled =
                motion
                    .opacity
                    .step(delta_ms, tuning.opacity_rate_per_ms, VALUE_EPSILON);
            let ratio_settled =
                motion
                    .ratio_y
                    .step(delta_ms, tuning.opacity_rate_per_ms, VALUE_EPSILON);
            animating = !opacity_settled || !ratio_settled || animating;
        }
        self.dirty = animating;

        let span_ms = timeline.span_ms().max(f64::MIN_POSITIVE);
        let ratio_x = self.canvas.width / span_ms;
        let first = timeline.first();

        let mut frame = RenderFrame::new(self.canvas, 0.0);
        for (series, motion) in series.iter().zip(&self.motions) {
            let alpha = motion.opacity.value;
            if alpha <= 0.0 {
                continue;
            }
            let points: Vec<(f64, f64)> = timeline
                .stamps()
                .iter()
                .zip(&series.values)
                .map(|(&stamp, &value)| {
                    let x = (((stamp - first) as f64) * ratio_x).floor();
                    let y = self.canvas.height - ((value - self.min_y) * motion.ratio_y.value).floor();
                    (x, y)
                })
                .collect();
            if points.len() < 2 {
                continue;
            }
            frame.push_polyline(PolylinePrimitive {
                points,
                stroke_width: 1.0,
                color: series.color.with_alpha(alpha),
            });
        }
        renderer.render(Surface::Map, &frame)?;

        Ok(self.dirty)
    }
}

/// Min/max over every sample of the series matching `keep`; `(0, 0)` when
/// none match.
fn value_extent(series: &[Series], keep: impl Fn(&Series) -> bool) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for series in series.iter().filter(|series| keep(series)) {
        for &value in &series.values {
            min_y = min_y.min(value);
            max_y = max_y.max(value);
        }
    }
    if min_y > max_y {
        (0.0, 0.0)
    } else {
        (min_y, max_y)
    }
}
