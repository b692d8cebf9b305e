//! Y-axis gridline/label lifecycle.
//!
//! Labels are keyed by their gridline value rounded to 3 decimals, held in an
//! insertion-ordered map so a value that stays on screen across a zoom change
//! keeps its identity (no flash), while ones that leave fade out and are only
//! dropped once fully invisible.

use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use smallvec::SmallVec;

use crate::core::range::{BAND_COUNT, floor3};
use crate::core::spring::{LABEL_EPSILON, Spring, SpringTuning, round2};

/// Eased-in opacity of visible label text.
pub const LABEL_VISIBLE_OPACITY: f64 = 0.4;
/// Eased-in opacity of visible gridline strokes.
pub const GRID_VISIBLE_STROKE: f64 = 0.08;

/// One horizontal gridline with its label, fading independently for text and
/// stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YAxisLabel {
    pub value: f64,
    pub opacity: Spring,
    pub stroke: Spring,
}

/// Keyed label collection reconciled every label frame.
#[derive(Debug, Default)]
pub struct YLabelSet {
    labels: IndexMap<OrderedFloat<f64>, YAxisLabel>,
}

impl YLabelSet {
    /// Runs one reconciliation pass against the candidate gridlines for the
    /// current vertical scale.
    ///
    /// `axis_max` is the height-derived top value: the data value that would
    /// land at the top gridline under the current (non-eased) ratio.
    pub fn reconcile(&mut self, lower_border: f64, axis_max: f64) {
        // Everything fades out unless re-wanted below; labels that already
        // read as invisible are safe to drop without a visible pop.
        for label in self.labels.values_mut() {
            label.opacity.target = 0.0;
            label.stroke.target = 0.0;
        }
        self.labels
            .retain(|_, label| round2(label.opacity.value) != 0.0);

        let band = axis_max / BAND_COUNT as f64;
        let candidates: SmallVec<[f64; BAND_COUNT + 1]> = (0..=BAND_COUNT)
            .map(|index| floor3(band * index as f64 + lower_border))
            .collect();

        for value in candidates {
            match self.labels.get_mut(&OrderedFloat(value)) {
                Some(label) => {
                    label.opacity.target = LABEL_VISIBLE_OPACITY;
                    label.stroke.target = GRID_VISIBLE_STROKE;
                }
                None => {
                    self.labels.insert(
                        OrderedFloat(value),
                        YAxisLabel {
                            value,
                            opacity: Spring::rising(0.0, LABEL_VISIBLE_OPACITY),
                            stroke: Spring::rising(0.0, GRID_VISIBLE_STROKE),
                        },
                    );
                }
            }
        }
    }

    /// Advances every label one spring step; returns whether any label is
    /// still animating.
    pub fn advance(&mut self, delta_ms: f64, tuning: SpringTuning) -> bool {
        let mut animating = false;
        for label in self.labels.values_mut() {
            let opacity_settled =
                label
                    .opacity
                    .step(delta_ms, tuning.label_rate_per_ms, LABEL_EPSILON);
            let stroke_settled =
                label
                    .stroke
                    .step(delta_ms, tuning.stroke_rate_per_ms, LABEL_EPSILON);
            animating = !opacity_settled || !stroke_settled || animating;
        }
        animating
    }

    pub fn labels(&self) -> impl Iterator<Item = &YAxisLabel> {
        self.labels.values()
    }

    #[must_use]
    pub fn contains_value(&self, value: f64) -> bool {
        self.labels.contains_key(&OrderedFloat(value))
    }

    #[must_use]
    pub fn get(&self, value: f64) -> Option<&YAxisLabel> {
        self.labels.get(&OrderedFloat(value))
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

#[cfg(test)]
mod tests {
    use super::{GRID_VISIBLE_STROKE, LABEL_VISIBLE_OPACITY, YLabelSet};
    use crate::core::SpringTuning;

    #[test]
    fn reconcile_inserts_six_invisible_rising_labels() {
        let mut set = YLabelSet::default();
        set.reconcile(0.0, 100.0);
        assert_eq!(set.len(), 6);
        for label in set.labels() {
            assert_eq!(label.opacity.value, 0.0);
            assert_eq!(label.opacity.target, LABEL_VISIBLE_OPACITY);
            assert_eq!(label.stroke.target, GRID_VISIBLE_STROKE);
        }
        assert!(set.contains_value(0.0));
        assert!(set.contains_value(100.0));
    }

    #[test]
    fn surviving_label_keeps_its_faded_in_opacity() {
        let mut set = YLabelSet::default();
        let tuning = SpringTuning::default();

        set.reconcile(0.0, 100.0);
        for _ in 0..20 {
            set.advance(16.0, tuning);
        }
        let progressed = set.get(40.0).expect("label present").opacity.value;
        assert!(progressed > 0.0);

        // New scale where 40 is still a gridline (bands of 20 from 0).
        set.reconcile(0.0, 100.0);
        let survivor = set.get(40.0).expect("label survives");
        assert_eq!(survivor.opacity.value, progressed);
        assert_eq!(survivor.opacity.target, LABEL_VISIBLE_OPACITY);
    }

    #[test]
    fn stale_label_fades_out_before_removal() {
        let mut set = YLabelSet::default();
        let tuning = SpringTuning::default();

        set.reconcile(0.0, 100.0);
        for _ in 0..60 {
            set.advance(16.0, tuning);
        }
        assert!(set.contains_value(20.0));

        // Shifted scale: 20 is no longer a candidate.
        set.reconcile(50.0, 100.0);
        let stale = set.get(20.0).expect("still fading");
        assert_eq!(stale.opacity.target, 0.0);
        assert!(stale.opacity.value > 0.0);

        // Keep reconciling+advancing until it has faded to invisible.
        for _ in 0..600 {
            set.advance(16.0, tuning);
            set.reconcile(50.0, 100.0);
            if !set.contains_value(20.0) {
                break;
            }
        }
        assert!(!set.contains_value(20.0));
    }
}
