// File: crates/responsive-chart/tests/layout.rs
// Purpose: Dimensions derived from viewports under both sizing policies.

use responsive_chart::{Insets, LayoutEngine, LayoutPolicy, Viewport};

#[test]
fn square_policy_uses_smaller_side() {
    let engine = LayoutEngine::default();
    let d = engine.compute(Viewport::new(1000.0, 600.0));
    assert_eq!(d.width, 540.0);
    assert_eq!(d.height, 540.0);
    assert_eq!(d.bounded_width, 540.0 - 75.0);
    assert_eq!(d.bounded_height, 540.0 - 75.0);
    assert!(!d.clamped);
    assert!(d.check().is_ok());
}

#[test]
fn fixed_height_policy() {
    let engine = LayoutEngine::new(
        LayoutPolicy::FixedHeight { width_fraction: 0.9, height: 400.0 },
        Insets::timeline(),
    );
    let d = engine.compute(Viewport::new(1000.0, 200.0));
    assert_eq!(d.width, 900.0);
    assert_eq!(d.height, 400.0);
    assert_eq!(d.bounded_width, 825.0);
    assert_eq!(d.bounded_height, 365.0);
    // Radius scales size off the smaller outer side.
    assert_eq!(d.size(), 400.0);
}

#[test]
fn bounded_area_never_negative() {
    let engine = LayoutEngine::default();
    for (w, h) in [(0.0, 0.0), (10.0, 900.0), (74.0, 74.0), (-50.0, 300.0), (f64::NAN, 100.0), (f64::INFINITY, 20.0)] {
        let d = engine.compute(Viewport::new(w, h));
        assert!(d.bounded_width >= 0.0, "{w}x{h}: {d:?}");
        assert!(d.bounded_height >= 0.0, "{w}x{h}: {d:?}");
    }
}

#[test]
fn oversized_margins_are_clamped_and_refused() {
    let d = LayoutEngine::default().compute(Viewport::new(50.0, 50.0));
    assert!(d.clamped);
    assert_eq!(d.bounded_width, 0.0);
    assert!(d.check().is_err());
}

#[test]
fn bounds_rect_sits_inside_margins() {
    let d = LayoutEngine::default().compute(Viewport::new(500.0, 500.0));
    let b = d.bounds();
    assert_eq!(b.left, 60.0);
    assert_eq!(b.top, 15.0);
    assert_eq!(b.right(), 450.0 - 15.0);
    assert_eq!(b.bottom(), 450.0 - 60.0);
}

#[test]
fn viewport_parses_from_cli_syntax() {
    let vp: Viewport = "1280x800".parse().expect("parse");
    assert_eq!(vp, Viewport::new(1280.0, 800.0));
    assert!("1280".parse::<Viewport>().is_err());
    assert!("wide x tall".parse::<Viewport>().is_err());
}
