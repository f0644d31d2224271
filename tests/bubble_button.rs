use std::time::{Duration, Instant};

use bubble_button::prelude::*;
use bubble_button::theme::colors;
use bubble_button::widgets::bubble_button::PRESSED_LABEL;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn at(t0: Instant, millis: u64) -> Instant {
    t0 + Duration::from_millis(millis)
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

#[test]
fn test_mount_starts_with_no_fill() {
    init_logger();
    let button = BubbleButton::new();

    assert_eq!(button.progress(), 0.0);
    assert_eq!(button.phase(), Phase::Idle);

    let styles = button.styles();
    assert_eq!(styles.fill_scale, 0.0);
    assert_eq!(styles.label_color, colors::NEUTRAL_500);
    assert_eq!(styles.icon_color, colors::BLUE_500);
}

#[test]
fn test_press_in_offsets_circle_to_touch_point() {
    init_logger();
    let t0 = Instant::now();
    let mut button = BubbleButton::new();
    let diameter = button.config().circle_diameter;

    button.event_at(&Event::PressIn { x: 120.0, y: 30.0 }, t0);

    let offset = button.touch_offset();
    assert_eq!(offset, Point::new(120.0 - diameter / 2.0, 30.0 - diameter / 2.0));
    assert_eq!(button.styles().fill_offset, offset);

    // Halfway through, the circle is centered on the touch point
    button.advance(at(t0, 250));
    let tree = button.paint();
    let fill = tree.find("fill").expect("fill node");
    let (cx, cy) = fill
        .local_transform
        .transform_point(diameter / 2.0, diameter / 2.0);
    assert!(approx(cx, 120.0));
    assert!(approx(cy, 30.0));
}

#[test]
fn test_completed_press_covers_screen_and_whitens() {
    init_logger();
    let t0 = Instant::now();
    let mut button = BubbleButton::with_config(ButtonConfig::new().screen_size(390.0, 844.0))
        .expect("valid config");

    button.event_at(&Event::PressIn { x: 10.0, y: 10.0 }, t0);
    assert!(!button.advance(at(t0, 500)));

    let styles = button.styles();
    assert_eq!(button.progress(), 1.0);
    assert_eq!(styles.fill_scale, 844.0 / 50.0);
    assert_eq!(styles.label_color, PRESSED_LABEL);
    assert_eq!(styles.label_color.a, 1.0);
    assert_eq!(styles.icon_color, colors::WHITE);
    assert_eq!(button.phase(), Phase::Expanded);
}

#[test]
fn test_release_restores_rest_colors_exactly() {
    init_logger();
    let t0 = Instant::now();
    let mut button = BubbleButton::new();

    button.event_at(&Event::PressIn { x: 40.0, y: 25.0 }, t0);
    button.advance(at(t0, 500));
    button.event_at(&Event::PressOut { x: 40.0, y: 25.0 }, at(t0, 700));
    assert!(!button.advance(at(t0, 1200)));

    let styles = button.styles();
    assert_eq!(button.progress(), 0.0);
    assert_eq!(styles.fill_scale, 0.0);
    assert_eq!(styles.label_color, colors::NEUTRAL_500);
    assert_eq!(styles.icon_color, colors::BLUE_500);
    assert_eq!(button.phase(), Phase::Idle);
}

#[test]
fn test_early_release_retargets_from_current_progress() {
    init_logger();
    let t0 = Instant::now();
    let mut button = BubbleButton::new();

    button.event_at(&Event::PressIn { x: 40.0, y: 25.0 }, t0);
    button.advance(at(t0, 200));
    let reached = button.progress();
    assert!(reached > 0.0 && reached < 1.0);

    button.event_at(&Event::PressOut { x: 40.0, y: 25.0 }, at(t0, 200));
    assert_eq!(button.phase(), Phase::Collapsing);

    // The value continues from where it was, never jumping back to 1
    button.advance(at(t0, 210));
    let after = button.progress();
    assert!(after <= reached && after > 0.0);

    let mut now = at(t0, 210);
    let mut frames = 0;
    while button.advance(now) {
        now += Duration::from_millis(16);
        frames += 1;
        assert!(frames < 100, "collapse never settled");
    }
    assert_eq!(button.progress(), 0.0);
    assert_eq!(button.tint_progress(), 0.0);
    assert_eq!(button.phase(), Phase::Idle);
}

#[test]
fn test_rapid_press_cycles_settle() {
    init_logger();
    let t0 = Instant::now();
    let mut button = BubbleButton::new();

    for i in 0..10u64 {
        let now = at(t0, i * 40);
        let event = if i % 2 == 0 {
            Event::PressIn { x: 5.0, y: 5.0 }
        } else {
            Event::PressOut { x: 5.0, y: 5.0 }
        };
        assert_eq!(button.event_at(&event, now), EventResponse::Handled);
        button.advance(now + Duration::from_millis(20));
        let p = button.progress();
        assert!((0.0..=1.0).contains(&p));
    }

    assert!(!button.advance(at(t0, 2000)));
    assert_eq!(button.phase(), Phase::Idle);
}

#[test]
fn test_release_without_press_is_harmless() {
    init_logger();
    let t0 = Instant::now();
    let mut button = BubbleButton::new();
    button.event_at(&Event::PressOut { x: 0.0, y: 0.0 }, t0);
    assert_eq!(button.phase(), Phase::Idle);

    button.advance(at(t0, 100));
    assert_eq!(button.progress(), 0.0);
    assert_eq!(button.phase(), Phase::Idle);

    assert!(!button.advance(at(t0, 500)));
    assert_eq!(button.progress(), 0.0);
    assert_eq!(button.phase(), Phase::Idle);
}

#[test]
fn test_layout_updates_measurement_but_not_styles() {
    init_logger();
    let t0 = Instant::now();
    let mut button = BubbleButton::new();
    button.layout(Constraints::loose(Size::new(400.0, 800.0)));
    button.event_at(&Event::PressIn { x: 60.0, y: 20.0 }, t0);
    button.advance(at(t0, 300));

    let styles_before = button.styles();
    let tree_before = button.paint();
    let version_before = button.measurement_version();

    button.event_at(
        &Event::Layout {
            width: 123.0,
            height: 45.0,
        },
        at(t0, 300),
    );

    assert_eq!(button.measured_size(), Size::new(123.0, 45.0));
    assert_eq!(button.measurement_version(), version_before + 1);
    assert_eq!(button.styles(), styles_before);
    assert_eq!(button.paint(), tree_before);
}

#[test]
fn test_layout_pass_records_button_size() {
    init_logger();
    let mut button = BubbleButton::new();
    let outer = button.layout(Constraints::loose(Size::new(390.0, 844.0)));

    assert_eq!(outer, Size::new(390.0, 150.0));
    assert_eq!(button.measured_size(), Size::new(350.0, 50.0));
    assert_eq!(button.frame(), Rect::new(20.0, 100.0, 350.0, 50.0));
}

#[test]
fn test_headless_frames_show_fill() {
    init_logger();
    let t0 = Instant::now();
    let app = App::new().width(400).height(200);
    let mut button = BubbleButton::new();

    // A spot inside the button that neither the label nor the icon touches
    let (px, py) = (40, 125);
    let sample = |frame: &Frame| {
        let c = frame.pixmap.pixel(px, py).expect("in bounds").demultiply();
        [c.red(), c.green(), c.blue()]
    };

    let idle = app.frame(&mut button, t0).expect("idle frame");
    assert!(!idle.animating);
    assert_eq!(sample(&idle), [255, 255, 255]);

    button.event_at(&Event::PressIn { x: 100.0, y: 25.0 }, t0);
    let (pressed, _) = app
        .run_until_idle(&mut button, t0, Duration::from_millis(16), 120)
        .expect("pressed frames");
    assert!(!pressed.animating);
    assert_eq!(sample(&pressed), [0x3B, 0x82, 0xF6]);
}
