use timechart::api::{LABEL_VISIBLE_OPACITY, XLabelSet, YLabelSet, format_stamp};
use timechart::core::{SpringTuning, Timeline, Viewport};
use timechart::render::TextAnchor;

const DAY_MS: i64 = 86_400_000;

fn daily_timeline(days: i64) -> Timeline {
    let base = 1_551_398_400_000; // 2019-03-01T00:00:00Z
    Timeline::new((0..days).map(|day| base + day * DAY_MS).collect()).expect("timeline")
}

fn settle(set: &mut YLabelSet, lower: f64, axis_max: f64, tuning: SpringTuning) {
    for _ in 0..2_000 {
        set.reconcile(lower, axis_max);
        if !set.advance(16.0, tuning) {
            break;
        }
    }
    // One more pass so labels that just snapped to zero get evicted.
    set.reconcile(lower, axis_max);
}

#[test]
fn y_labels_converge_to_six_visible_gridlines() {
    let tuning = SpringTuning::default();
    let mut set = YLabelSet::default();

    settle(&mut set, 0.0, 100.0, tuning);

    assert_eq!(set.len(), 6);
    for label in set.labels() {
        assert_eq!(label.opacity.value, LABEL_VISIBLE_OPACITY);
    }
}

#[test]
fn y_scale_change_cross_fades_old_and_new_gridlines() {
    let tuning = SpringTuning::default();
    let mut set = YLabelSet::default();

    settle(&mut set, 0.0, 100.0, tuning);
    set.reconcile(0.0, 250.0);

    // Shared gridlines (0, 100) survive with their opacity; stale ones fade.
    assert!(set.len() > 6);
    assert_eq!(set.get(0.0).expect("kept").opacity.target, LABEL_VISIBLE_OPACITY);
    assert_eq!(set.get(20.0).expect("fading").opacity.target, 0.0);
    assert_eq!(set.get(50.0).expect("incoming").opacity.value, 0.0);

    settle(&mut set, 0.0, 250.0, tuning);
    assert_eq!(set.len(), 6);
    assert!(set.get(20.0).is_none());
}

#[test]
fn x_labels_densify_when_zooming_in() {
    let timeline = daily_timeline(91);
    let tuning = SpringTuning::default();
    let mut set = XLabelSet::default();

    set.reconcile(&timeline, Viewport::new(0.0, 1.0).expect("viewport"));
    let coarse = set.len();

    set.reconcile(&timeline, Viewport::new(0.4, 0.6).expect("viewport"));
    assert!(set.len() > coarse);
    set.advance(16.0, tuning);
}

#[test]
fn final_timestamp_is_always_labeled_with_an_end_anchor() {
    let timeline = daily_timeline(91);
    let mut set = XLabelSet::default();

    for viewport in [
        Viewport::new(0.0, 1.0).expect("viewport"),
        Viewport::new(0.33, 0.57).expect("viewport"),
        Viewport::new(0.9, 1.0).expect("viewport"),
    ] {
        set.reconcile(&timeline, viewport);
        let tail_text = format_stamp(timeline.last());
        let tail = set
            .labels()
            .find(|label| label.text == tail_text)
            .expect("tail label present");
        assert_eq!(tail.anchor, TextAnchor::End);
        assert_eq!(tail.timestamp, timeline.last());
        assert_eq!(tail.opacity.target, LABEL_VISIBLE_OPACITY);
    }
}
