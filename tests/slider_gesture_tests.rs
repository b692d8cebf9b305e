use timechart::core::Viewport;
use timechart::interaction::{MIN_WINDOW_WIDTH_PX, SliderController};

fn slider() -> SliderController {
    SliderController::new(400.0, Viewport::new(0.25, 0.5).expect("viewport")).expect("slider")
}

#[test]
fn resize_left_clamps_to_the_canvas_origin_keeping_the_right_edge() {
    let mut slider = slider();
    slider.begin_resize_left(100.0);

    let window = slider.on_pointer_move(-250.0).expect("dragging");
    assert_eq!(window.offset, 0.0);
    assert_eq!(window.right_edge(), 200.0);
}

#[test]
fn resize_left_widens_and_narrows_around_a_fixed_right_edge() {
    let mut slider = slider();
    slider.begin_resize_left(100.0);

    let wider = slider.on_pointer_move(60.0).expect("dragging");
    assert_eq!(wider.offset, 60.0);
    assert_eq!(wider.right_edge(), 200.0);

    let narrower = slider.on_pointer_move(140.0).expect("dragging");
    assert_eq!(narrower.offset, 140.0);
    assert_eq!(narrower.width, 60.0);
}

#[test]
fn external_viewport_updates_are_ignored_mid_gesture() {
    let mut slider = slider();
    slider.begin_move(150.0);

    slider
        .set_viewport(Viewport::new(0.0, 0.1).expect("viewport"))
        .expect("set viewport");
    // The captured anchors still describe the original window.
    let window = slider.on_pointer_move(150.0).expect("dragging");
    assert_eq!(window.offset, 100.0);
    assert_eq!(window.width, 100.0);

    slider.on_pointer_up();
    slider
        .set_viewport(Viewport::new(0.0, 0.1).expect("viewport"))
        .expect("set viewport");
    assert_eq!(slider.window().offset, 0.0);
    assert_eq!(slider.window().width, 40.0);
}

#[test]
fn canvas_width_change_rescales_the_window_to_the_same_fractions() {
    let mut slider = slider();
    slider.set_canvas_width(800.0).expect("resize");

    assert_eq!(slider.window().offset, 200.0);
    assert_eq!(slider.window().width, 200.0);
    let viewport = slider.viewport();
    assert!((viewport.start - 0.25).abs() < 1e-12);
    assert!((viewport.end - 0.5).abs() < 1e-12);
}

#[test]
fn minimum_width_bounds_the_published_viewport_span() {
    let mut slider = slider();
    slider.begin_resize_right(200.0);
    slider.on_pointer_move(0.0).expect("dragging");

    let viewport = slider.viewport();
    assert!(viewport.span() >= MIN_WINDOW_WIDTH_PX / 400.0 - 1e-12);
    assert!(viewport.validate().is_ok());
}
