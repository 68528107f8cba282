//! Zoom and pan through mouse events.

use darkroom_engine::HeadlessEngine;
use darkroom_input::{Modifiers, MouseButton};

use super::{approx_eq, context, moved, press, release, wheel, IMAGE};
use crate::coords::image_center;
use crate::error::InteractionError;

#[test]
fn test_middle_click_cycles_zoom() {
    let mut engine = HeadlessEngine::new(IMAGE.0, IMAGE.1);
    let mut ctx = context();
    ctx.enter(&engine).expect("display is wired");
    assert!(ctx.viewport().is_fit());

    let center = (500.0, 500.0);
    for expected in [1.0, 2.0, 4.0, 8.0] {
        ctx.handle_event(&mut engine, press(MouseButton::Middle, center))
            .expect("middle press");
        ctx.handle_event(&mut engine, release(MouseButton::Middle, center))
            .expect("middle release");
        assert_eq!(ctx.viewport().scale, expected);
        // Clicking the middle of the view keeps the image centered
        let focal = ctx.viewport().focal_point;
        assert!(approx_eq(focal.0, 1000.0) && approx_eq(focal.1, 1000.0));
    }

    ctx.handle_event(&mut engine, press(MouseButton::Middle, center))
        .expect("middle press");
    assert!(ctx.viewport().is_fit());
    assert!(engine.runs().is_empty(), "navigation never runs the graph");
}

#[test]
fn test_zoom_keeps_point_under_cursor() {
    let mut engine = HeadlessEngine::new(IMAGE.0, IMAGE.1);
    let mut ctx = context();
    ctx.enter(&engine).expect("display is wired");

    let cursor = (750.0, 300.0);
    let before = ctx.viewport().mapper(IMAGE).view_to_image(cursor);
    ctx.handle_event(&mut engine, press(MouseButton::Middle, cursor))
        .expect("middle press");
    ctx.handle_event(&mut engine, wheel(1.0, cursor, Modifiers::NONE))
        .expect("scroll");
    let after = ctx.viewport().mapper(IMAGE).view_to_image(cursor);

    assert!(approx_eq(ctx.viewport().scale, 1.1));
    assert!(approx_eq(before.0, after.0), "{:?} vs {:?}", before, after);
    assert!(approx_eq(before.1, after.1), "{:?} vs {:?}", before, after);
}

#[test]
fn test_scroll_below_fit_recenters() {
    let mut engine = HeadlessEngine::new(IMAGE.0, IMAGE.1);
    let mut ctx = context();
    ctx.enter(&engine).expect("display is wired");

    ctx.handle_event(&mut engine, wheel(-1.0, (100.0, 100.0), Modifiers::NONE))
        .expect("scroll");
    let vp = ctx.viewport();
    assert!(approx_eq(vp.scale, 0.45));
    assert_eq!(vp.focal_point, image_center(IMAGE));
}

#[test]
fn test_scroll_outside_display_area_is_ignored() {
    let mut engine = HeadlessEngine::new(IMAGE.0, IMAGE.1);
    let mut ctx = context();
    ctx.enter(&engine).expect("display is wired");

    ctx.handle_event(&mut engine, wheel(1.0, (1500.0, 500.0), Modifiers::NONE))
        .expect("scroll");
    assert!(ctx.viewport().is_fit());
}

#[test]
fn test_pan_follows_drag() {
    let mut engine = HeadlessEngine::new(IMAGE.0, IMAGE.1);
    let mut ctx = context();
    ctx.enter(&engine).expect("display is wired");
    ctx.handle_event(&mut engine, press(MouseButton::Middle, (500.0, 500.0)))
        .expect("zoom to 1x");

    ctx.handle_event(&mut engine, press(MouseButton::Left, (500.0, 500.0)))
        .expect("begin pan");
    ctx.handle_event(&mut engine, moved((600.0, 550.0))).expect("pan");
    assert_eq!(ctx.viewport().focal_point, (900.0, 950.0));

    ctx.handle_event(&mut engine, release(MouseButton::Left, (600.0, 550.0)))
        .expect("end pan");
    ctx.handle_event(&mut engine, moved((0.0, 0.0))).expect("hover");
    assert_eq!(ctx.viewport().focal_point, (900.0, 950.0));
}

#[test]
fn test_pan_clamps_to_image() {
    let mut engine = HeadlessEngine::new(IMAGE.0, IMAGE.1);
    let mut ctx = context();
    ctx.enter(&engine).expect("display is wired");
    ctx.handle_event(&mut engine, press(MouseButton::Middle, (500.0, 500.0)))
        .expect("zoom to 1x");

    ctx.handle_event(&mut engine, press(MouseButton::Left, (10.0, 10.0)))
        .expect("begin pan");
    ctx.handle_event(&mut engine, moved((-5000.0, 9000.0)))
        .expect("pan");
    assert_eq!(ctx.viewport().focal_point, (2000.0, 0.0));
}

#[test]
fn test_pan_in_fit_mode_does_nothing() {
    let mut engine = HeadlessEngine::new(IMAGE.0, IMAGE.1);
    let mut ctx = context();
    ctx.enter(&engine).expect("display is wired");
    let before = *ctx.viewport();

    ctx.handle_event(&mut engine, press(MouseButton::Left, (500.0, 500.0)))
        .expect("press");
    ctx.handle_event(&mut engine, moved((700.0, 700.0))).expect("move");
    assert_eq!(*ctx.viewport(), before);
}

#[test]
fn test_missing_display_aborts_without_mutation() {
    let mut engine = HeadlessEngine::without_display();
    let mut ctx = context();
    assert_eq!(ctx.enter(&engine), Err(InteractionError::MissingDisplay));
    let before = *ctx.viewport();

    let result = ctx.handle_event(&mut engine, press(MouseButton::Middle, (500.0, 500.0)));
    assert_eq!(result, Err(InteractionError::MissingDisplay));
    let result = ctx.handle_event(&mut engine, wheel(1.0, (500.0, 500.0), Modifiers::NONE));
    assert_eq!(result, Err(InteractionError::MissingDisplay));
    let result = ctx.handle_event(&mut engine, moved((10.0, 10.0)));
    assert_eq!(result, Err(InteractionError::MissingDisplay));

    assert_eq!(*ctx.viewport(), before);
    assert!(engine.runs().is_empty());
}

#[test]
fn test_display_wired_later_recovers() {
    let mut engine = HeadlessEngine::without_display();
    let mut ctx = context();
    assert!(ctx.enter(&engine).is_err());

    engine.set_display_resolution(Some(IMAGE));
    ctx.enter(&engine).expect("display is wired now");
    ctx.handle_event(&mut engine, press(MouseButton::Middle, (500.0, 500.0)))
        .expect("middle press");
    assert_eq!(ctx.viewport().scale, 1.0);
}
