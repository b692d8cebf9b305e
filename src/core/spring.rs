//! Per-tick numeric relaxation driving every visual transition.
//!
//! This is critically-damped-style exponential easing, not a physical spring
//! simulation: no velocity state, no overshoot. Each animated scalar advances
//! toward its target by `rate * delta_ms * diff` per frame and snaps to the
//! target once the remaining difference drops below its epsilon.

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Settle threshold for series opacity, ratio-Y and lower-border springs.
pub const VALUE_EPSILON: f64 = 5e-10;
/// Settle threshold for axis-label opacities; label values are rounded before
/// display, so jitter below this is imperceptible.
pub const LABEL_EPSILON: f64 = 5e-3;

/// Tuned per-quantity relaxation rates, in inverse milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringTuning {
    /// Series opacity and vertical-scale quantities.
    pub opacity_rate_per_ms: f64,
    /// Axis-label text opacity.
    pub label_rate_per_ms: f64,
    /// Gridline stroke opacity; slower so gridlines trail their labels.
    pub stroke_rate_per_ms: f64,
}

impl Default for SpringTuning {
    fn default() -> Self {
        Self {
            opacity_rate_per_ms: 0.008,
            label_rate_per_ms: 0.005,
            stroke_rate_per_ms: 0.003,
        }
    }
}

impl SpringTuning {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, rate) in [
            ("opacity", self.opacity_rate_per_ms),
            ("label", self.label_rate_per_ms),
            ("stroke", self.stroke_rate_per_ms),
        ] {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "spring `{name}` rate must be finite and > 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Advances `current` one step toward `target`.
///
/// Returns the next value and a settled flag. The flag is `true` only when
/// the value snapped to its target this step (or already sat on it), which is
/// what decides whether another frame gets scheduled.
#[must_use]
pub fn spring_step(
    current: f64,
    target: f64,
    delta_ms: f64,
    rate_per_ms: f64,
    epsilon: f64,
) -> (f64, bool) {
    let diff = target - current;
    if diff.abs() < epsilon {
        (target, true)
    } else {
        (current + rate_per_ms * delta_ms * diff, false)
    }
}

/// One animated scalar: the eased value and the value it is chasing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub value: f64,
    pub target: f64,
}

impl Spring {
    /// A spring resting at `value`.
    #[must_use]
    pub const fn at(value: f64) -> Self {
        Self {
            value,
            target: value,
        }
    }

    /// A spring easing from `value` toward `target`.
    #[must_use]
    pub const fn rising(value: f64, target: f64) -> Self {
        Self { value, target }
    }

    /// Advances one frame; returns the settled flag.
    pub fn step(&mut self, delta_ms: f64, rate_per_ms: f64, epsilon: f64) -> bool {
        let (next, settled) = spring_step(self.value, self.target, delta_ms, rate_per_ms, epsilon);
        self.value = next;
        settled
    }

    #[must_use]
    pub fn is_settled(self, epsilon: f64) -> bool {
        (self.target - self.value).abs() < epsilon
    }

    /// Moves value and target together, skipping any animation.
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
    }
}

/// Two-decimal rounding used as the working definition of "effectively
/// zero/one" for opacities.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
