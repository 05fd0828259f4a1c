// File: crates/responsive-chart/tests/scales.rs
// Purpose: Tick/nice rounding, continuous and colour scales, and the scale factory.

mod common;

use chrono::NaiveDate;
use responsive_chart::scale::{ScaleConfig, TimeInterval};
use responsive_chart::ticks::{nice_domain, tick_count_for, tick_increment, ticks};
use responsive_chart::{
    ColorScale, ColorScheme, ContinuousScale, Dataset, Dimensions, Encodings, Insets, Rgba, ScaleFactory,
    TimeScale,
};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn tick_increment_picks_round_steps() {
    assert_eq!(tick_increment(0.0, 10.0, 5.0), 2.0);
    assert_eq!(tick_increment(0.0, 100.0, 10.0), 10.0);
    // Sub-unit steps come back as -1/step.
    assert_eq!(tick_increment(0.0, 1.0, 10.0), -10.0);
}

#[test]
fn nice_domain_extends_outward() {
    assert_eq!(nice_domain(5.0, 15.0, 10.0), (5.0, 15.0));
    let (lo, hi) = nice_domain(0.123, 0.987, 10.0);
    assert!(close(lo, 0.1) && close(hi, 1.0), "{lo}..{hi}");
    let (lo, hi) = nice_domain(3.0, 97.0, 10.0);
    assert_eq!((lo, hi), (0.0, 100.0));
    // Degenerate input is left alone.
    assert_eq!(nice_domain(4.0, 4.0, 10.0), (4.0, 4.0));
}

#[test]
fn ticks_are_round_and_inside() {
    assert_eq!(ticks(0.0, 10.0, 5.0), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    let t = ticks(0.0, 1.0, 5.0);
    assert_eq!(t.len(), 6);
    assert!(close(t[1], 0.2));
    assert_eq!(ticks(10.0, 0.0, 5.0).first(), Some(&10.0));
    assert!(ticks(0.0, 1.0, 0.0).is_empty());
    assert_eq!(tick_count_for(400.0, 50.0), 8.0);
    assert_eq!(tick_count_for(10.0, 50.0), 0.2);
    assert_eq!(tick_count_for(0.0, 50.0), 0.0);
}

#[test]
fn linear_maps_and_inverts() {
    let s = ContinuousScale::linear((0.0, 10.0), (0.0, 100.0));
    assert_eq!(s.map(5.0), Some(50.0));
    assert_eq!(s.map(20.0), Some(200.0), "not clamped");
    assert_eq!(s.map(f64::NAN), None);
    assert_eq!(s.invert(25.0), Some(2.5));
}

#[test]
fn sqrt_scale_is_area_linear() {
    let s = ContinuousScale::sqrt((0.0, 100.0), (0.0, 10.0));
    assert!(close(s.map(25.0).unwrap_or_default(), 5.0));
    assert!(close(s.invert(5.0).unwrap_or_default(), 25.0));
}

#[test]
fn degenerate_domains_map_to_midpoint() {
    let s = ContinuousScale::linear((3.0, 3.0), (0.0, 100.0));
    assert!(s.is_degenerate());
    assert_eq!(s.map(3.0), Some(50.0));
    assert_eq!(s.map(-400.0), Some(50.0));

    let empty = ContinuousScale::from_extent(responsive_chart::scale::ScaleKind::Sqrt, None, (2.0, 12.0));
    assert_eq!(empty.map(1.0), Some(7.0));
}

#[test]
fn color_scale_uses_scheme_endpoints() {
    let c = ColorScale::new(ColorScheme::Spectral, Some((0.0, 10.0)));
    assert_eq!(c.map(0.0), Some(Rgba::hex(0x9e0142)));
    assert_eq!(c.map(10.0), Some(Rgba::hex(0x5e4fa2)));
    assert_eq!(c.map(f64::INFINITY), None);

    let flat = ColorScale::new(ColorScheme::Spectral, None);
    assert_eq!(flat.map(1.0), Some(Rgba::hex(0xffffbf)));
}

#[test]
fn factory_maps_dew_points_across_the_bounded_width() {
    let data = Dataset::new(vec![
        common::day("2020-01-01", Some(5.0), Some(0.3), Some(40.0)),
        common::day("2020-01-02", Some(10.0), Some(0.5), Some(50.0)),
        common::day("2020-01-03", Some(15.0), Some(0.9), Some(60.0)),
    ])
    .expect("dataset");
    // 175 - 75 of margins leaves a 100px plot.
    let dims = Dimensions::new(175.0, 175.0, Insets::scatter());
    let scales = ScaleFactory::default().build(&data, &Encodings::weather_scatter(), &dims);

    assert!(close(scales.x.map(5.0).unwrap_or(f64::NAN), 0.0));
    assert!(close(scales.x.map(15.0).unwrap_or(f64::NAN), 100.0));
    // y is flipped: larger humidity sits higher.
    assert!(scales.y.map(0.9).unwrap_or(f64::NAN) < scales.y.map(0.3).unwrap_or(f64::NAN));

    assert_eq!(scales.radius.range, (2.0, 175.0 / 50.0));
    assert_eq!(scales.opacity.range, (1.5, 0.1));
    // Hotter days are fainter.
    assert!(scales.opacity.map(60.0).unwrap_or(f64::NAN) < scales.opacity.map(40.0).unwrap_or(f64::NAN));
}

#[test]
fn factory_on_empty_dataset_is_degenerate() {
    let dims = Dimensions::new(500.0, 500.0, Insets::scatter());
    let scales = ScaleFactory::new(ScaleConfig::default()).build(&Dataset::default(), &Encodings::default(), &dims);
    assert!(scales.x.is_degenerate());
    assert_eq!(scales.x.map(1.0), Some(dims.bounded_width / 2.0));
}

#[test]
fn time_ticks_follow_the_calendar() {
    let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("date");
    let ms = |s: &str| responsive_chart::accessor::date_to_millis(d(s));

    let ten_days = TimeScale::new(Some((ms("2020-03-01"), ms("2020-03-11"))), (0.0, 500.0));
    assert_eq!(ten_days.interval_for(5.0), TimeInterval::Days(2));
    let t = ten_days.ticks(5.0);
    assert_eq!(t.first(), Some(&d("2020-03-01")));
    assert_eq!(t.len(), 6);
    assert_eq!(ten_days.map_date(d("2020-03-11")), Some(500.0));

    let year = TimeScale::new(Some((ms("2020-01-01"), ms("2020-12-31"))), (0.0, 600.0));
    assert_eq!(year.interval_for(12.0), TimeInterval::Months(1));
    assert_eq!(year.ticks(12.0).len(), 12);

    assert_eq!(TimeScale::format_tick(d("2020-01-01")), "2020");
    assert_eq!(TimeScale::format_tick(d("2020-03-01")), "March");
    assert_eq!(TimeScale::format_tick(d("2020-03-05")), "Mar 05");
}
