//! The chart engine: owns all animated state and drives the frame loop.
//!
//! Hosts construct the engine with a [`ChartConfig`], feed it pointer and
//! legend events, and call [`ChartEngine::tick`] on their animation-frame
//! boundary while [`ChartEngine::is_frame_pending`] holds. Each tick advances
//! every spring by the same capped delta, redraws only the surfaces whose
//! dirty flags are set, and keeps the loop alive exactly as long as something
//! is still easing.

use tracing::debug;

use crate::core::mapper;
use crate::core::range::{RangeThrottle, floor3, lower_border, vertical_borders};
use crate::core::spring::{VALUE_EPSILON, round2, spring_step};
use crate::core::{CanvasSize, Series, Spring, SpringTuning, Timeline, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CirclePrimitive, LinePrimitive, PolylinePrimitive, RenderFrame, Renderer, Surface, TextAnchor,
    TextPrimitive, Theme,
};

use super::axis_labels_x::XLabelSet;
use super::axis_labels_y::YLabelSet;
use super::engine_config::ChartConfig;
use super::events::{Publisher, Subscription};
use super::frame_loop::{FrameClock, FrameReport, RedrawFlags};
use super::map_view::MapView;
use super::tooltip::{TooltipData, TooltipEntry, nearest_index};

/// Height of the date-label strip below the plot area.
const LABEL_OFFSET: f64 = 30.0;
/// Headroom above the top gridline so peaks never collide with it.
const TOP_OFFSET: f64 = 40.0;
/// Vertical inset between the plot ceiling and the canvas top.
const INNER_PADDING: f64 = 10.0;
/// Horizontal inset of the plot content inside the canvas.
const CHART_PADDING: f64 = 8.0;

const SERIES_STROKE_WIDTH: f64 = 2.0;
const GRID_STROKE_WIDTH: f64 = 1.0;
const SELECTION_RADIUS: f64 = 4.0;
const LABEL_FONT_PX: f64 = 13.0;
/// Label baselines sit this far above their gridline.
const Y_LABEL_LIFT: f64 = 6.0;
/// Date baselines sit this far above the canvas bottom.
const X_LABEL_LIFT: f64 = 10.0;

/// Animated time-series line chart with a zooming viewport and an overview
/// map.
#[derive(Debug)]
pub struct ChartEngine<R: Renderer> {
    renderer: R,
    timeline: Timeline,
    series: Vec<Series>,
    viewport: Viewport,
    canvas: CanvasSize,
    theme: Theme,
    springs: SpringTuning,
    labels_y: YLabelSet,
    labels_x: XLabelSet,
    map: MapView,
    clock: FrameClock,
    flags: RedrawFlags,
    range_throttle: RangeThrottle,
    min_y: f64,
    max_y: f64,
    lower_border: f64,
    /// Eased vertical anchor; `None` until the first range scan seeds it.
    last_lower_border: Option<f64>,
    /// Eased vertical scale; `None` until the first range scan seeds it.
    last_ratio_y: Option<f64>,
    labels_animating_x: bool,
    labels_animating_y: bool,
    selected_index: Option<usize>,
    viewport_events: Publisher<Viewport>,
}

impl<R: Renderer> ChartEngine<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        config.validate()?;

        let timeline = Timeline::new(config.timeline)?;
        let series: Vec<Series> = config
            .series
            .into_iter()
            .map(|spec| Series {
                id: spec.id,
                name: spec.name,
                values: spec.values,
                color: spec.color,
                opacity: Spring::at(1.0),
            })
            .collect();
        let map = MapView::new(config.map_canvas, config.viewport, &series)?;

        let mut flags = RedrawFlags::default();
        flags.mark_all();
        let mut clock = FrameClock::default();
        clock.schedule();

        Ok(Self {
            renderer,
            timeline,
            series,
            viewport: config.viewport,
            canvas: config.canvas,
            theme: Theme::default(),
            springs: config.springs,
            labels_y: YLabelSet::default(),
            labels_x: XLabelSet::default(),
            map,
            clock,
            flags,
            range_throttle: RangeThrottle::new(config.range),
            min_y: 0.0,
            max_y: 0.0,
            lower_border: 0.0,
            last_lower_border: None,
            last_ratio_y: None,
            labels_animating_x: false,
            labels_animating_y: false,
            selected_index: None,
            viewport_events: Publisher::default(),
        })
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Whether the host should keep driving `tick`.
    #[must_use]
    pub fn is_frame_pending(&self) -> bool {
        self.clock.is_pending()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn subscribe_viewport(&mut self, handler: impl FnMut(&Viewport) + 'static) -> Subscription {
        self.viewport_events.subscribe(handler)
    }

    pub fn unsubscribe_viewport(&mut self, subscription: Subscription) -> bool {
        self.viewport_events.unsubscribe(subscription)
    }

    /// Replaces the viewport from the host API, as if the map window had been
    /// dragged there.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        viewport.validate()?;
        self.viewport = viewport;
        self.map.set_viewport(viewport)?;
        self.after_viewport_change();
        Ok(())
    }

    /// Legend toggle. `checked` series fade in and rejoin the vertical range;
    /// unchecked ones fade out and stop contributing to it.
    pub fn toggle_series(&mut self, series_id: &str, checked: bool) -> ChartResult<()> {
        let index = self
            .series
            .iter()
            .position(|series| series.id == series_id)
            .ok_or_else(|| ChartError::UnknownSeries(series_id.to_owned()))?;

        self.series[index].opacity.target = if checked { 1.0 } else { 0.0 };
        if checked {
            self.map.turn_on(index, &self.series);
        } else {
            self.map.turn_off(index, &self.series);
        }

        debug!(series_id, checked, "legend toggle");
        self.range_throttle.force_next();
        self.flags.mark_all();
        self.clock.schedule();
        Ok(())
    }

    /// Swaps the palette and redraws; animation state is untouched.
    pub fn set_night_mode(&mut self, night: bool) {
        self.theme = if night { Theme::Night } else { Theme::Day };
        self.flags.mark_all();
        self.map.mark_dirty();
        self.clock.schedule();
    }

    pub fn resize(&mut self, canvas: CanvasSize, map_canvas: CanvasSize) -> ChartResult<()> {
        canvas.validate()?;
        self.canvas = canvas;
        self.map.resize(map_canvas)?;
        self.flags.mark_all();
        self.clock.schedule();
        Ok(())
    }

    pub fn begin_map_move(&mut self, pointer_x: f64) {
        self.map.begin_move(pointer_x);
    }

    pub fn begin_map_resize_left(&mut self, pointer_x: f64) {
        self.map.begin_resize_left(pointer_x);
    }

    pub fn begin_map_resize_right(&mut self, pointer_x: f64) {
        self.map.begin_resize_right(pointer_x);
    }

    /// Routes pointer motion to the active map gesture; returns the viewport
    /// the motion produced, if any.
    pub fn map_pointer_moved(&mut self, pointer_x: f64) -> Option<Viewport> {
        let viewport = self.map.pointer_moved(pointer_x)?;
        self.viewport = viewport;
        self.after_viewport_change();
        Some(viewport)
    }

    pub fn map_pointer_released(&mut self) {
        self.map.pointer_released();
    }

    /// Selects the sample nearest to a physical chart-canvas X and returns
    /// its tooltip data.
    pub fn select_point_at(&mut self, pointer_x: f64) -> Option<TooltipData> {
        let virtual_w = mapper::virtual_width(self.canvas.width, self.viewport);
        let offset_x = mapper::viewport_offset(virtual_w, self.viewport.start);
        let virtual_x = pointer_x - offset_x - CHART_PADDING;

        let index = nearest_index(virtual_x, self.timeline.len(), virtual_w);
        self.selected_index = Some(index);
        self.flags.labels = true;
        self.clock.schedule();
        self.tooltip_data()
    }

    pub fn clear_selection(&mut self) {
        if self.selected_index.take().is_some() {
            self.flags.labels = true;
            self.clock.schedule();
        }
    }

    /// Tooltip data for the current selection; visible series only.
    #[must_use]
    pub fn tooltip_data(&self) -> Option<TooltipData> {
        let index = self.selected_index?;
        let stamp = *self.timeline.stamps().get(index)?;

        let virtual_w = mapper::virtual_width(self.canvas.width, self.viewport);
        let offset_x = mapper::viewport_offset(virtual_w, self.viewport.start);
        let ratio_x = mapper::ratio_x(virtual_w, self.timeline.span_ms().max(f64::MIN_POSITIVE));
        let x = mapper::x_for_stamp(stamp, self.timeline.first(), ratio_x);

        let entries = self
            .series
            .iter()
            .filter(|series| series.is_visible())
            .map(|series| TooltipEntry {
                series_id: series.id.clone(),
                name: series.name.clone(),
                color: series.color,
                value: series.values[index],
            })
            .collect();

        Some(TooltipData {
            timestamp: stamp,
            anchor_x: x + offset_x + CHART_PADDING,
            entries,
        })
    }

    /// Runs one frame at `now_ms`.
    ///
    /// A tick that finds nothing dirty cancels the pending frame and reports
    /// `continues: false`; everything else redraws what its flags demand and
    /// leaves the loop alive.
    pub fn tick(&mut self, now_ms: f64) -> ChartResult<FrameReport> {
        if !self.flags.any() && !self.map.is_dirty() {
            self.clock.cancel();
            return Ok(FrameReport::default());
        }

        let delta_ms = self.clock.begin_frame(now_ms);
        let mut report = FrameReport::default();

        if self.flags.any() {
            let virtual_w = mapper::virtual_width(self.canvas.width, self.viewport);
            let offset_x = mapper::viewport_offset(virtual_w, self.viewport.start);
            let chart_height = self.canvas.height - LABEL_OFFSET;
            let span_ms = self.timeline.span_ms();
            let ratio_x = mapper::ratio_x(virtual_w, span_ms.max(f64::MIN_POSITIVE));

            // Series opacities share the frame delta.
            let mut series_animating = false;
            for series in &mut self.series {
                let settled =
                    series
                        .opacity
                        .step(delta_ms, self.springs.opacity_rate_per_ms, VALUE_EPSILON);
                series_animating = !settled || series_animating;
            }

            // Throttled extrema scan over the visible window. The window is
            // derived from the viewport rounded to 2 decimals so sub-pixel
            // drags don't retrigger vertical rescaling.
            let has_active = self.series.iter().any(Series::is_active);
            if self.range_throttle.should_run(now_ms) {
                let first = self.timeline.first();
                let start_ts = first + (round2(self.viewport.start) * span_ms) as i64;
                let due_ts = first + (round2(self.viewport.end) * span_ms) as i64;
                let active: Vec<&Series> =
                    self.series.iter().filter(|series| series.is_active()).collect();
                if let Some((min, max)) =
                    vertical_borders(&active, &self.timeline, start_ts, due_ts)
                {
                    self.min_y = min;
                    self.max_y = max;
                    if has_active {
                        self.lower_border = lower_border(min, max, 0.0);
                    }
                }
            }

            // Target vertical scale; the drawn scale eases toward it.
            let spread = self.max_y - self.lower_border;
            let ratio_target = (chart_height - INNER_PADDING) / spread;
            let ratio_target = if ratio_target.is_finite() && ratio_target > 0.0 {
                ratio_target
            } else {
                self.last_ratio_y.unwrap_or(1.0)
            };

            let mut lower_animating = false;
            if let Some(value) = self.last_lower_border {
                let (next, settled) = spring_step(
                    value,
                    self.lower_border,
                    delta_ms,
                    self.springs.opacity_rate_per_ms,
                    VALUE_EPSILON,
                );
                self.last_lower_border = Some(next);
                lower_animating = !settled;
            } else {
                self.last_lower_border = Some(self.lower_border);
            }
            let mut ratio_animating = false;
            if let Some(value) = self.last_ratio_y {
                let (next, settled) = spring_step(
                    value,
                    ratio_target,
                    delta_ms,
                    self.springs.opacity_rate_per_ms,
                    VALUE_EPSILON,
                );
                self.last_ratio_y = Some(next);
                ratio_animating = !settled;
            } else {
                self.last_ratio_y = Some(ratio_target);
            }
            let eased_lower = self.last_lower_border.unwrap_or(self.lower_border);
            let eased_ratio = self.last_ratio_y.unwrap_or(ratio_target);

            if self.flags.labels || lower_animating || ratio_animating {
                let axis_max = (chart_height - TOP_OFFSET) / ratio_target;
                self.labels_y.reconcile(self.lower_border, axis_max);
                self.labels_x.reconcile(&self.timeline, self.viewport);
                self.labels_animating_y = self.labels_y.advance(delta_ms, self.springs);
                self.labels_animating_x = self.labels_x.advance(delta_ms, self.springs);

                let frame = self.build_labels_frame(
                    offset_x,
                    chart_height,
                    ratio_x,
                    eased_lower,
                    eased_ratio,
                );
                self.renderer.render(Surface::Labels, &frame)?;
                report.labels_redrawn = true;
            }

            if self.flags.series || series_animating || ratio_animating || lower_animating {
                let frame =
                    self.build_series_frame(offset_x, chart_height, ratio_x, eased_lower, eased_ratio);
                self.renderer.render(Surface::Series, &frame)?;
                report.series_redrawn = true;
            }

            self.flags.labels = self.labels_animating_x || self.labels_animating_y;
            self.flags.series = series_animating || ratio_animating || lower_animating;
        }

        let map_continues =
            self.map
                .update(now_ms, self.springs, &self.timeline, &self.series, &mut self.renderer)?;
        report.continues = self.flags.any() || map_continues;
        Ok(report)
    }

    fn after_viewport_change(&mut self) {
        self.range_throttle.force_next();
        self.flags.mark_all();
        self.clock.schedule();
        self.viewport_events.publish(&self.viewport);
    }

    fn build_series_frame(
        &self,
        offset_x: f64,
        chart_height: f64,
        ratio_x: f64,
        eased_lower: f64,
        eased_ratio: f64,
    ) -> RenderFrame {
        let first = self.timeline.first();
        let mut frame = RenderFrame::new(self.canvas, offset_x);

        for series in &self.series {
            if !series.is_visible() {
                continue;
            }
            let points: Vec<(f64, f64)> = self
                .timeline
                .stamps()
                .iter()
                .zip(&series.values)
                .map(|(&stamp, &value)| {
                    let x = mapper::x_for_stamp(stamp, first, ratio_x);
                    let y = mapper::y_for_value(chart_height, value, eased_lower, eased_ratio);
                    (x, y)
                })
                .collect();
            if points.len() < 2 {
                continue;
            }
            frame.push_polyline(PolylinePrimitive {
                points,
                stroke_width: SERIES_STROKE_WIDTH,
                color: series.color.with_alpha(series.opacity.value),
            });
        }

        frame
    }

    fn build_labels_frame(
        &self,
        offset_x: f64,
        chart_height: f64,
        ratio_x: f64,
        eased_lower: f64,
        eased_ratio: f64,
    ) -> RenderFrame {
        let palette = self.theme.palette();
        let first = self.timeline.first();
        // Left edge of the visible window in virtual coordinates.
        let view_left = -offset_x;
        let mut frame = RenderFrame::new(self.canvas, offset_x);

        for label in self.labels_y.labels() {
            let y = mapper::y_for_value(chart_height, label.value, eased_lower, eased_ratio);
            if !y.is_finite() {
                continue;
            }
            if label.stroke.value > 0.0 {
                frame.push_line(LinePrimitive::new(
                    view_left,
                    y,
                    view_left + self.canvas.width,
                    y,
                    GRID_STROKE_WIDTH,
                    palette.grid_ink.with_alpha(label.stroke.value),
                ));
            }
            if label.opacity.value > 0.0 {
                frame.push_text(TextPrimitive::new(
                    y_label_text(label.value),
                    view_left + INNER_PADDING,
                    y - Y_LABEL_LIFT,
                    LABEL_FONT_PX,
                    palette.label_ink.with_alpha(label.opacity.value),
                    TextAnchor::Start,
                ));
            }
        }

        for label in self.labels_x.labels() {
            if label.opacity.value <= 0.0 {
                continue;
            }
            frame.push_text(TextPrimitive::new(
                label.text.clone(),
                mapper::x_for_stamp(label.timestamp, first, ratio_x),
                self.canvas.height - X_LABEL_LIFT,
                LABEL_FONT_PX,
                palette.label_ink.with_alpha(label.opacity.value),
                label.anchor,
            ));
        }

        if let Some(index) = self.selected_index {
            if let Some(&stamp) = self.timeline.stamps().get(index) {
                let x = mapper::x_for_stamp(stamp, first, ratio_x);
                frame.push_line(LinePrimitive::new(
                    x,
                    0.0,
                    x,
                    chart_height,
                    GRID_STROKE_WIDTH,
                    palette.selection_guide.with_alpha(0.5),
                ));
                for series in &self.series {
                    if !series.is_visible() {
                        continue;
                    }
                    let y = mapper::y_for_value(
                        chart_height,
                        series.values[index],
                        eased_lower,
                        eased_ratio,
                    );
                    frame.push_circle(CirclePrimitive::new(
                        x,
                        y,
                        SELECTION_RADIUS,
                        SERIES_STROKE_WIDTH,
                        series.color.with_alpha(series.opacity.value),
                        palette.selection_fill,
                    ));
                }
            }
        }

        frame
    }
}

/// Axis text for a gridline value; integers render bare, fractional
/// gridlines keep three decimals to stay distinguishable.
#[must_use]
pub(crate) fn y_label_text(value: f64) -> String {
    if value == value.floor() {
        format!("{}", value as i64)
    } else {
        format!("{}", floor3(value))
    }
}

#[cfg(test)]
mod tests {
    use super::y_label_text;

    #[test]
    fn y_label_text_drops_trailing_zeroes_for_integers() {
        assert_eq!(y_label_text(40.0), "40");
        assert_eq!(y_label_text(0.0), "0");
        assert_eq!(y_label_text(8.08), "8.08");
    }
}
