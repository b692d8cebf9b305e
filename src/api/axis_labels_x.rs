//! X-axis date-label lifecycle.
//!
//! Candidates are decimated against the current zoom level: a uniform step
//! over the full timeline is halved until it is fine enough for the visible
//! fraction, then walked from the first timestamp. The final timestamp is
//! always force-included so the right edge stays labeled even when it does
//! not land on a step boundary. Labels are keyed by their formatted text,
//! which is stable because each displayed day formats uniquely.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::spring::{LABEL_EPSILON, Spring, SpringTuning, round2};
use crate::core::{Timeline, Viewport};
use crate::render::TextAnchor;

use super::axis_labels_y::LABEL_VISIBLE_OPACITY;

/// Initial uniform step divisor over the full timespan.
const STEP_DIVISOR: f64 = 3.0;
/// Density threshold relating step size to the visible fraction; the step is
/// halved while it stays coarser than this.
const DENSITY_COEF: f64 = 1.4;

/// One date label with its alignment hint.
#[derive(Debug, Clone, PartialEq)]
pub struct XAxisLabel {
    pub text: String,
    pub timestamp: i64,
    /// Alignment hint so edge labels don't overflow the canvas.
    pub anchor: TextAnchor,
    pub opacity: Spring,
}

/// Keyed label collection reconciled every label frame.
#[derive(Debug, Default)]
pub struct XLabelSet {
    labels: IndexMap<String, XAxisLabel>,
}

impl XLabelSet {
    /// Runs one reconciliation pass against the candidates for the current
    /// viewport.
    pub fn reconcile(&mut self, timeline: &Timeline, viewport: Viewport) {
        let candidates = candidate_labels(timeline, viewport);

        for label in self.labels.values_mut() {
            label.opacity.target = 0.0;
        }
        self.labels
            .retain(|_, label| round2(label.opacity.value) != 0.0);

        for candidate in candidates {
            match self.labels.get_mut(&candidate.text) {
                Some(label) => label.opacity.target = LABEL_VISIBLE_OPACITY,
                None => {
                    self.labels.insert(candidate.text.clone(), candidate);
                }
            }
        }
    }

    /// Advances every label one spring step; returns whether any label is
    /// still animating.
    pub fn advance(&mut self, delta_ms: f64, tuning: SpringTuning) -> bool {
        let mut animating = false;
        for label in self.labels.values_mut() {
            let settled = label
                .opacity
                .step(delta_ms, tuning.label_rate_per_ms, LABEL_EPSILON);
            animating = !settled || animating;
        }
        animating
    }

    pub fn labels(&self) -> impl Iterator<Item = &XAxisLabel> {
        self.labels.values()
    }

    #[must_use]
    pub fn contains_text(&self, text: &str) -> bool {
        self.labels.contains_key(text)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Short `Mon DD` date text, unique per displayed day.
#[must_use]
pub fn format_stamp(stamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(stamp_ms)
        .map(|date| date.format("%b %d").to_string())
        .unwrap_or_else(|| stamp_ms.to_string())
}

fn candidate_labels(timeline: &Timeline, viewport: Viewport) -> SmallVec<[XAxisLabel; 16]> {
    let init_step = timeline.span_ms() / STEP_DIVISOR;
    let mut step = init_step;
    while step > init_step * DENSITY_COEF * viewport.span() {
        step /= 2.0;
    }

    let first = timeline.first();
    let last = timeline.last();
    let mut candidates = SmallVec::new();

    let mut next = first as f64;
    while next < last as f64 {
        let stamp = next as i64;
        let anchor = if stamp == first {
            TextAnchor::Start
        } else {
            TextAnchor::Center
        };
        candidates.push(XAxisLabel {
            text: format_stamp(stamp),
            timestamp: stamp,
            anchor,
            opacity: Spring::rising(0.0, LABEL_VISIBLE_OPACITY),
        });
        next += step;
    }

    // The right edge is always labeled, step boundary or not.
    candidates.push(XAxisLabel {
        text: format_stamp(last),
        timestamp: last,
        anchor: TextAnchor::End,
        opacity: Spring::rising(0.0, LABEL_VISIBLE_OPACITY),
    });

    candidates
}
