use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use timechart::api::{ChartConfig, ChartEngine, SeriesSpec};
use timechart::core::{CanvasSize, Viewport};
use timechart::render::{Color, NullRenderer};
use timechart::ChartError;

fn config() -> ChartConfig {
    ChartConfig {
        timeline: vec![0, 3_600_000, 7_200_000],
        series: vec![
            SeriesSpec {
                id: "y0".to_owned(),
                name: "Joined".to_owned(),
                values: vec![10.0, 50.0, 30.0],
                color: Color::rgb(0.2, 0.6, 0.3),
            },
            SeriesSpec {
                id: "y1".to_owned(),
                name: "Left".to_owned(),
                values: vec![5.0, 80.0, 20.0],
                color: Color::rgb(0.9, 0.3, 0.3),
            },
        ],
        viewport: Viewport::new(0.0, 1.0).expect("viewport"),
        canvas: CanvasSize::new(800.0, 400.0),
        map_canvas: CanvasSize::new(800.0, 50.0),
        springs: Default::default(),
        range: Default::default(),
    }
}

fn engine() -> ChartEngine<NullRenderer> {
    ChartEngine::new(NullRenderer::default(), config()).expect("engine")
}

fn run_to_idle(engine: &mut ChartEngine<NullRenderer>, start_ms: f64) -> f64 {
    let mut now_ms = start_ms;
    for _ in 0..10_000 {
        if !engine.is_frame_pending() {
            return now_ms;
        }
        engine.tick(now_ms).expect("tick");
        now_ms += 16.0;
    }
    panic!("frame loop failed to settle");
}

#[test]
fn engine_builds_from_host_json() {
    let json = r#"{
        "timeline": [0, 3600000, 7200000],
        "series": [{
            "id": "y0",
            "name": "Joined",
            "values": [10.0, 50.0, 30.0],
            "color": {"red": 0.2, "green": 0.6, "blue": 0.3, "alpha": 1.0}
        }],
        "canvas": {"width": 800.0, "height": 400.0},
        "map_canvas": {"width": 800.0, "height": 50.0}
    }"#;

    let parsed: ChartConfig = serde_json::from_str(json).expect("config json");
    let engine = ChartEngine::new(NullRenderer::default(), parsed).expect("engine");
    assert_eq!(engine.viewport().start, 0.7);
    assert_eq!(engine.series().len(), 1);
}

#[test]
fn toggling_an_unknown_series_is_an_error() {
    let mut engine = engine();
    let error = engine.toggle_series("nope", false).expect_err("unknown id");
    assert!(matches!(error, ChartError::UnknownSeries(id) if id == "nope"));
}

#[test]
fn tooltip_reports_visible_series_at_the_nearest_sample() {
    let mut engine = engine();
    run_to_idle(&mut engine, 0.0);

    // Full viewport over an 800px canvas: sample 1 projects to x = 400.
    let tooltip = engine.select_point_at(410.0).expect("tooltip");
    assert_eq!(tooltip.timestamp, 3_600_000);
    assert_eq!(tooltip.entries.len(), 2);
    assert_eq!(tooltip.entries[0].value, 50.0);
    assert_eq!(tooltip.entries[1].value, 80.0);

    engine.clear_selection();
    assert!(engine.tooltip_data().is_none());
}

#[test]
fn tooltip_skips_faded_out_series() {
    let mut engine = engine();
    let now_ms = run_to_idle(&mut engine, 0.0);

    engine.toggle_series("y1", false).expect("known series");
    run_to_idle(&mut engine, now_ms);

    let tooltip = engine.select_point_at(410.0).expect("tooltip");
    assert_eq!(tooltip.entries.len(), 1);
    assert_eq!(tooltip.entries[0].series_id, "y0");
}

#[test]
fn viewport_changes_are_published_to_subscribers() {
    let mut engine = engine();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let subscription = engine.subscribe_viewport(move |viewport| sink.borrow_mut().push(*viewport));

    let next = Viewport::new(0.25, 0.75).expect("viewport");
    engine.set_viewport(next).expect("set viewport");
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0], next);

    assert!(engine.unsubscribe_viewport(subscription));
    engine
        .set_viewport(Viewport::new(0.5, 1.0).expect("viewport"))
        .expect("set viewport");
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn map_drag_moves_the_viewport_and_publishes_it() {
    let mut engine = engine();
    engine
        .set_viewport(Viewport::new(0.25, 0.5).expect("viewport"))
        .expect("set viewport");

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    engine.subscribe_viewport(move |viewport| sink.borrow_mut().push(*viewport));

    // Map canvas is 800px wide; the window sits at 200..400.
    engine.begin_map_move(300.0);
    let dragged = engine.map_pointer_moved(380.0).expect("dragging");
    engine.map_pointer_released();

    assert_relative_eq!(dragged.start, 0.35, max_relative = 1e-12);
    assert_relative_eq!(dragged.end, 0.6, max_relative = 1e-12);
    assert_eq!(engine.viewport(), dragged);
    assert_eq!(seen.borrow().as_slice(), &[dragged]);
    assert!(engine.is_frame_pending());
}

#[test]
fn resize_forces_a_full_redraw() {
    let mut engine = engine();
    let now_ms = run_to_idle(&mut engine, 0.0);
    assert!(!engine.is_frame_pending());

    engine
        .resize(CanvasSize::new(1024.0, 500.0), CanvasSize::new(1024.0, 60.0))
        .expect("resize");
    assert!(engine.is_frame_pending());

    let report = engine.tick(now_ms).expect("tick");
    assert!(report.series_redrawn && report.labels_redrawn);
}

#[test]
fn invalid_viewports_are_rejected() {
    let mut engine = engine();
    assert!(matches!(
        engine.set_viewport(Viewport { start: 0.8, end: 0.2 }),
        Err(ChartError::InvalidViewport { .. })
    ));
    // The engine keeps its previous viewport after a rejected update.
    assert_eq!(engine.viewport(), Viewport::new(0.0, 1.0).expect("viewport"));
}
