// File: crates/responsive-chart/tests/scene.rs
// Purpose: Scene graph structure, timed transitions and hit testing.

use responsive_chart::geometry::Point;
use responsive_chart::scene::ease_cubic_in_out;
use responsive_chart::{Attr, AttrValue, NodeKind, Rgba, Scene, Transition};

#[test]
fn easing_endpoints_and_midpoint() {
    assert_eq!(ease_cubic_in_out(0.0), 0.0);
    assert_eq!(ease_cubic_in_out(0.5), 0.5);
    assert_eq!(ease_cubic_in_out(1.0), 1.0);
    assert!(ease_cubic_in_out(0.25) < 0.25);
}

#[test]
fn select_or_create_reuses_nodes() {
    let mut scene = Scene::new();
    let root = scene.root();
    let a = scene.select_or_create(root, NodeKind::Group, "bounds");
    let b = scene.select_or_create(root, NodeKind::Group, "bounds");
    assert_eq!(a, b);
    assert_eq!(scene.children(root).len(), 1);
    assert_eq!(scene.class(a), Some("bounds"));
}

#[test]
fn remove_drops_subtree() {
    let mut scene = Scene::new();
    let g = scene.append(scene.root(), NodeKind::Group, None);
    let c = scene.append(g, NodeKind::Circle, None);
    scene.remove(g);
    assert!(!scene.contains(g));
    assert!(!scene.contains(c));
    assert!(scene.is_empty());
}

#[test]
fn transition_runs_on_the_scene_clock() {
    let mut scene = Scene::new();
    let c = scene.append(scene.root(), NodeKind::Circle, None);
    scene.set_attr(c, Attr::R, 0.0);
    scene.animate(c, Attr::R, 10.0, Transition::new(100.0, 200.0));

    assert_eq!(scene.number(c, Attr::R), Some(0.0));
    assert_eq!(scene.target(c, Attr::R), Some(AttrValue::Number(10.0)));
    scene.advance(100.0);
    assert_eq!(scene.number(c, Attr::R), Some(0.0), "still in its delay");
    scene.advance(100.0);
    assert_eq!(scene.number(c, Attr::R), Some(5.0));
    scene.advance(100.0);
    assert_eq!(scene.number(c, Attr::R), Some(10.0));
    assert!(!scene.is_animating());
}

#[test]
fn newest_transition_wins() {
    let mut scene = Scene::new();
    let c = scene.append(scene.root(), NodeKind::Circle, None);
    scene.set_attr(c, Attr::Cx, 0.0);
    scene.animate(c, Attr::Cx, 100.0, Transition::new(0.0, 100.0));
    scene.advance(50.0);
    let mid = scene.number(c, Attr::Cx).unwrap_or(f64::NAN);
    assert_eq!(mid, 50.0);

    scene.animate(c, Attr::Cx, -20.0, Transition::new(0.0, 100.0));
    // Restarts from where it was, not from the old start.
    assert_eq!(scene.number(c, Attr::Cx), Some(mid));
    scene.settle();
    assert_eq!(scene.number(c, Attr::Cx), Some(-20.0));
}

#[test]
fn retargeting_the_same_value_keeps_the_running_transition() {
    let mut scene = Scene::new();
    let c = scene.append(scene.root(), NodeKind::Circle, None);
    scene.set_attr(c, Attr::R, 0.0);
    scene.animate(c, Attr::R, 10.0, Transition::new(0.0, 100.0));
    scene.advance(50.0);
    scene.animate(c, Attr::R, 10.0, Transition::new(0.0, 100.0));
    scene.advance(50.0);
    assert_eq!(scene.number(c, Attr::R), Some(10.0));
    assert!(!scene.is_animating());
}

#[test]
fn colours_interpolate() {
    let mut scene = Scene::new();
    let c = scene.append(scene.root(), NodeKind::Circle, None);
    scene.set_attr(c, Attr::Fill, Rgba::rgb(0, 0, 0));
    scene.animate(c, Attr::Fill, Rgba::rgb(200, 100, 0), Transition::new(0.0, 10.0));
    scene.advance(5.0);
    assert_eq!(scene.attr(c, Attr::Fill), Some(AttrValue::Color(Rgba::rgb(100, 50, 0))));
}

#[test]
fn remove_after_waits_for_the_clock() {
    let mut scene = Scene::new();
    let c = scene.append(scene.root(), NodeKind::Circle, None);
    scene.remove_after(c, 250.0);
    assert!(scene.contains(c));
    scene.settle();
    assert!(!scene.contains(c));
}

#[test]
fn hit_test_respects_translation_and_paint_order() {
    let mut scene = Scene::new();
    let g = scene.append(scene.root(), NodeKind::Group, None);
    scene.set_attr(g, Attr::TranslateX, 50.0);
    scene.set_attr(g, Attr::TranslateY, 10.0);
    let under = scene.append(g, NodeKind::Circle, None);
    let over = scene.append(g, NodeKind::Circle, None);
    for (c, r) in [(under, 10.0), (over, 4.0)] {
        scene.set_attr(c, Attr::Cx, 0.0);
        scene.set_attr(c, Attr::Cy, 0.0);
        scene.set_attr(c, Attr::R, r);
    }
    assert_eq!(scene.hit_test(Point::new(50.0, 10.0)), Some(over));
    assert_eq!(scene.hit_test(Point::new(58.0, 10.0)), Some(under));
    assert_eq!(scene.hit_test(Point::new(0.0, 0.0)), None);
}
