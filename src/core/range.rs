//! Vertical range resolution for the visible time window.
//!
//! Scanning every active series over the visible slice is the one raw
//! computation whose cost is bounded independently of frame rate, so callers
//! gate it through `RangeThrottle` instead of running it every frame.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{Series, Timeline};
use crate::error::{ChartError, ChartResult};

/// Number of equal horizontal bands between the lower border and the top.
pub const BAND_COUNT: usize = 5;

/// Hard cap on the lower-border refinement; past it the last candidate wins.
const MAX_LOWER_BORDER_STEPS: usize = 16;

/// Exact data extrema over `[start_ts, due_ts]` across the given active
/// series, padded by 1% on both sides so lines never touch the canvas edge.
///
/// Returns `None` when no active series is supplied; the caller keeps its
/// previous bounds rather than adopting degenerate infinities.
#[must_use]
pub fn vertical_borders(
    active: &[&Series],
    timeline: &Timeline,
    start_ts: i64,
    due_ts: i64,
) -> Option<(f64, f64)> {
    if active.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for series in active {
        for (stamp, value) in timeline.stamps().iter().zip(&series.values) {
            if (start_ts..=due_ts).contains(stamp) {
                min = min.min(*value);
                max = max.max(*value);
            }
        }
    }

    if !min.is_finite() || !max.is_finite() {
        // The window missed every sample; treat it like an empty active set.
        return None;
    }

    Some((floor3(min * 0.99), floor3(max * 1.01)))
}

/// Largest grid-aligned value at or below `min`.
///
/// Divides `[candidate, max]` into `BAND_COUNT` equal bands, steps back from
/// the first gridline strictly above `min`, and repeats with the floored
/// result until it reaches a fixed point. Each round either returns or lowers
/// the candidate toward the band enclosing `min`, so in practice this settles
/// within a handful of rounds; the iteration cap guards the pathological
/// floating-point cases.
#[must_use]
pub fn lower_border(min: f64, max: f64, candidate: f64) -> f64 {
    let mut candidate = candidate;

    for _ in 0..MAX_LOWER_BORDER_STEPS {
        let band = (max - candidate) / BAND_COUNT as f64;
        if !band.is_finite() || band <= 0.0 {
            return candidate;
        }

        let first_above =
            (0..=BAND_COUNT).find_map(|index| {
                let line = band * index as f64 + candidate;
                (line > min).then_some(line)
            });
        let Some(first_above) = first_above else {
            return candidate;
        };

        let lower_line = first_above - band;
        if lower_line == candidate {
            return candidate;
        }
        candidate = lower_line.floor();
    }

    warn!(min, max, candidate, "lower border search hit the iteration cap");
    candidate
}

/// Three-decimal flooring used for range padding and Y-label keys.
#[must_use]
pub fn floor3(value: f64) -> f64 {
    (value * 1000.0).floor() / 1000.0
}

/// Tuning for the vertical range recomputation throttle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeTuning {
    /// Minimum interval between full series scans, in milliseconds.
    pub min_interval_ms: f64,
}

impl Default for RangeTuning {
    fn default() -> Self {
        Self {
            min_interval_ms: 250.0,
        }
    }
}

impl RangeTuning {
    pub fn validate(self) -> ChartResult<Self> {
        if !self.min_interval_ms.is_finite() || self.min_interval_ms < 0.0 {
            return Err(ChartError::InvalidData(
                "range throttle interval must be finite and >= 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Time-based gate for the range scan, decoupled from the render loop.
///
/// The first call always runs; `force_next` bypasses the interval once, for
/// the moment the active-series set itself changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeThrottle {
    min_interval_ms: f64,
    last_run_ms: Option<f64>,
    force_next: bool,
}

impl RangeThrottle {
    #[must_use]
    pub fn new(tuning: RangeTuning) -> Self {
        Self {
            min_interval_ms: tuning.min_interval_ms,
            last_run_ms: None,
            force_next: false,
        }
    }

    pub fn force_next(&mut self) {
        self.force_next = true;
    }

    /// Whether the scan may run at `now_ms`; records the run when it does.
    pub fn should_run(&mut self, now_ms: f64) -> bool {
        match self.last_run_ms {
            Some(last) if !self.force_next && now_ms - last < self.min_interval_ms => false,
            _ => {
                self.force_next = false;
                self.last_run_ms = Some(now_ms);
                true
            }
        }
    }
}
