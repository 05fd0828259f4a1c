// File: crates/responsive-chart/tests/svg.rs
// Purpose: SVG export of rendered charts.

mod common;

use responsive_chart::interaction::TOOLTIP_CLASS;
use responsive_chart::{
    render_svg, Attr, ChartConfig, Encodings, LineChart, RecordKey, ScatterChart, Scene, Theme, Viewport,
};

fn scatter_svg(hover: Option<&str>) -> String {
    let mut scene = Scene::new();
    let mut chart = ScatterChart::new(common::weather(), Encodings::default(), ChartConfig::default(), &mut scene)
        .expect("chart");
    chart.resize(&mut scene, Viewport::new(600.0, 600.0)).expect("resize");
    scene.settle();
    if let Some(key) = hover {
        chart.pointer_enter(&mut scene, &RecordKey::from(key));
    }
    render_svg(&scene, &Theme::light())
}

fn opacities(svg: &str) -> Vec<f64> {
    svg.split("opacity=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .filter_map(|v| v.parse().ok())
        .collect()
}

#[test]
fn scatter_document_has_one_circle_per_record() {
    let svg = scatter_svg(None);
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"540\" height=\"540\""));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<circle").count(), 5);
    assert!(svg.contains("transform=\"translate(60,15)\""));
    assert!(svg.contains(">dew point</text>"));
    assert!(svg.contains("transform=\"rotate(-90)\""));
    assert!(!svg.contains("class=\"tooltip\""), "hidden tooltip is not emitted");
}

#[test]
fn opacity_is_clamped_to_unit_range() {
    let svg = scatter_svg(None);
    let values = opacities(&svg);
    assert!(!values.is_empty());
    assert!(values.iter().all(|o| (0.0..=1.0).contains(o)), "{values:?}");
}

#[test]
fn hovered_chart_shows_escaped_tooltip() {
    let svg = scatter_svg(Some("2020-01-02"));
    assert!(svg.contains("class=\"tooltip\""));
    assert!(svg.contains(">dew point: 20</text>"));
    assert!(svg.contains(">humidity: 0.4</text>"));
    assert_eq!(opacities(&svg).iter().filter(|o| **o == 0.1).count(), 4);
}

#[test]
fn line_chart_document_has_path_and_band() {
    let mut scene = Scene::new();
    let mut chart = LineChart::new(common::weather(), ChartConfig::timeline(), &mut scene).expect("chart");
    chart.render(&mut scene, Viewport::new(800.0, 600.0)).expect("render");
    let theme = Theme::dark();
    let svg = render_svg(&scene, &theme);
    assert!(svg.contains("<path class=\"line\" d=\"M0,"));
    assert!(svg.contains(&format!("stroke=\"{}\"", theme.line_stroke)));
    assert!(svg.contains("<rect class=\"threshold\""));
    assert!(svg.contains(&format!("fill=\"{}\"", theme.threshold_fill)));
    assert!(svg.contains(&format!("fill=\"{}\"", theme.background)));
}

#[test]
fn tooltip_box_is_offset_by_its_anchor_fraction() {
    let mut scene = Scene::new();
    let mut chart = ScatterChart::new(common::weather(), Encodings::default(), ChartConfig::default(), &mut scene)
        .expect("chart");
    chart.resize(&mut scene, Viewport::new(600.0, 600.0)).expect("resize");
    scene.settle();
    chart.pointer_enter(&mut scene, &RecordKey::from("2020-01-03"));
    let tip = scene.select(scene.root(), TOOLTIP_CLASS).expect("tooltip");
    let y = scene.number(tip, Attr::Y).expect("y");

    let svg = render_svg(&scene, &Theme::light());
    let translate = svg
        .split("class=\"tooltip\" opacity=\"1\" transform=\"translate(")
        .nth(1)
        .and_then(|rest| rest.split(')').next())
        .expect("tooltip group");
    let got: f64 = translate.split(',').nth(1).and_then(|v| v.parse().ok()).expect("y offset");
    // Two lines of 14px plus 6px padding each side, shifted up by 5%.
    let want = y - 0.05 * 40.0;
    assert!((got - want).abs() < 0.01, "{got} vs {want}");
}
