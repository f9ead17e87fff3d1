//! Integration tests for dragging widgets around a changing viewport.

use proptest::prelude::*;
use studydock_core::drag::{self, Point, Size};
use studydock_core::{PointerTarget, WidgetConfig, WidgetController, WidgetKind};

fn in_bounds(widget: &WidgetController) -> bool {
    let p = widget.position();
    let size = widget.widget_size();
    let viewport = widget.viewport();
    let max_x = (viewport.width - size.width).max(0.0);
    let max_y = (viewport.height - size.height).max(0.0);
    (0.0..=max_x).contains(&p.x) && (0.0..=max_y).contains(&p.y)
}

#[test]
fn test_drag_scenario_corner_overshoot() {
    let state = drag::begin_drag(Point::new(100.0, 100.0), Point::new(50.0, 50.0));
    assert_eq!(state.pointer_offset, Point::new(50.0, 50.0));
    let moved = drag::on_pointer_move(
        Point::new(790.0, 10.0),
        state,
        Size::new(200.0, 150.0),
        Size::new(800.0, 600.0),
    );
    assert_eq!(moved.position, Point::new(600.0, 0.0));
}

#[test]
fn test_shrinking_viewport_after_drag() {
    let config = WidgetConfig {
        initial_position: Point::new(100.0, 100.0),
        ..WidgetConfig::default()
    };
    let mut widget = WidgetController::new(WidgetKind::Timer, &config, Size::new(1920.0, 1080.0));
    widget.measure(Size::new(220.0, 220.0));
    widget.pointer_down(Point::new(150.0, 150.0), PointerTarget::Handle);
    widget.pointer_move(Point::new(1800.0, 1000.0));
    widget.pointer_up();
    assert_eq!(widget.position(), Point::new(1700.0, 860.0));

    widget.resize_viewport(Size::new(400.0, 300.0));
    assert_eq!(widget.position(), Point::new(180.0, 80.0));
    assert!(in_bounds(&widget));
}

#[test]
fn test_resize_during_drag_keeps_tracking() {
    let mut widget = WidgetController::new(
        WidgetKind::MusicPlayer,
        &WidgetConfig {
            initial_position: Point::new(0.0, 0.0),
            ..WidgetConfig::default()
        },
        Size::new(1200.0, 800.0),
    );
    widget.pointer_down(Point::new(10.0, 10.0), PointerTarget::Handle);
    widget.pointer_move(Point::new(700.0, 500.0));
    assert_eq!(widget.position(), Point::new(690.0, 490.0));

    widget.resize_viewport(Size::new(900.0, 600.0));
    assert_eq!(widget.position(), Point::new(500.0, 375.0));
    assert!(widget.listeners_attached());

    // The clamped axes were re-anchored to the last pointer, so the next
    // move carries the widget by exactly the pointer delta.
    widget.pointer_move(Point::new(600.0, 400.0));
    assert_eq!(widget.position(), Point::new(400.0, 275.0));
    widget.pointer_up();
    assert!(!widget.listeners_attached());
}

#[test]
fn test_music_player_fallback_size_before_measurement() {
    let config = WidgetConfig {
        initial_position: Point::new(900.0, 900.0),
        ..WidgetConfig::default()
    };
    let mut widget = WidgetController::new(WidgetKind::MusicPlayer, &config, Size::new(1000.0, 700.0));
    assert_eq!(widget.position(), Point::new(600.0, 475.0));
    widget.measure(Size::new(320.0, 180.0));
    assert_eq!(widget.position(), Point::new(600.0, 475.0));
    widget.measure(Size::new(500.0, 300.0));
    assert_eq!(widget.position(), Point::new(500.0, 400.0));
}

proptest! {
    #[test]
    fn widget_stays_on_screen_through_any_interaction(
        steps in prop::collection::vec(
            prop_oneof![
                (-500.0f64..2500.0, -500.0f64..2000.0).prop_map(|(x, y)| (0u8, x, y)),
                (0.0f64..2000.0, 0.0f64..1500.0).prop_map(|(w, h)| (1u8, w, h)),
                (1.0f64..600.0, 1.0f64..600.0).prop_map(|(w, h)| (2u8, w, h)),
                Just((3u8, 0.0, 0.0)),
                (0.0f64..1500.0, 0.0f64..1000.0).prop_map(|(x, y)| (4u8, x, y)),
            ],
            1..60,
        ),
    ) {
        let mut widget = WidgetController::new(
            WidgetKind::Timer,
            &WidgetConfig::default(),
            Size::new(1280.0, 720.0),
        );
        for (op, a, b) in steps {
            match op {
                0 => widget.pointer_move(Point::new(a, b)),
                1 => widget.resize_viewport(Size::new(a, b)),
                2 => widget.measure(Size::new(a, b)),
                3 => widget.pointer_up(),
                _ => {
                    widget.pointer_down(Point::new(a, b), PointerTarget::Handle);
                }
            }
            prop_assert!(in_bounds(&widget), "{:?}", widget.drag_state());
        }
    }
}
