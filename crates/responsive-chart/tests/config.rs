// File: crates/responsive-chart/tests/config.rs
// Purpose: TOML configuration parsing, defaults and validation.

use responsive_chart::{ChartConfig, ColorScheme, Insets, LayoutPolicy};

#[test]
fn empty_document_is_the_scatter_default() {
    let cfg = ChartConfig::from_toml_str("").expect("parse");
    assert_eq!(cfg, ChartConfig::scatter());
    assert_eq!(cfg.layout.margin, Insets::new(60, 15, 15, 60));
    assert_eq!(cfg.transition.duration_ms, 250.0);
    assert_eq!(cfg.interaction.dimmed_opacity, 0.1);
}

#[test]
fn sections_override_defaults() {
    let cfg = ChartConfig::from_toml_str(
        r#"
theme = "dark"

[layout]
margin = { left = 40, right = 10, top = 10, bottom = 30 }

[layout.sizing]
policy = "fixed_height"
width_fraction = 1.0
height = 300.0

[scales]
scheme = "viridis"
nice = false

[transition]
stagger_ms = 0.0
enter_origin = { x = 0.0, y = 0.0 }

[axes]
x_title = "Dew point (F)"

[timeline]
y_field = "temperatureMin"
"#,
    )
    .expect("parse");

    assert_eq!(cfg.theme().name, "dark");
    assert_eq!(cfg.layout.sizing, LayoutPolicy::FixedHeight { width_fraction: 1.0, height: 300.0 });
    assert_eq!(cfg.layout.margin, Insets::new(40, 10, 10, 30));
    assert_eq!(cfg.scales.scheme, ColorScheme::Viridis);
    assert!(!cfg.scales.nice);
    assert_eq!(cfg.scales.min_radius, 2.0, "untouched keys keep defaults");
    assert_eq!(cfg.transition.stagger_ms, 0.0);
    assert_eq!(cfg.transition.duration_ms, 250.0);
    assert_eq!(cfg.axes.x_title.as_deref(), Some("Dew point (F)"));
    assert_eq!(cfg.timeline.y_field, "temperatureMin");
    assert_eq!(cfg.timeline.threshold, Some(50.0));
}

#[test]
fn invalid_values_are_rejected() {
    assert!(ChartConfig::from_toml_str("[axes]\ntick_spacing_px = 0.0").is_err());
    assert!(ChartConfig::from_toml_str("[layout.sizing]\npolicy = \"square_fraction\"\nfraction = -1.0").is_err());
    assert!(ChartConfig::from_toml_str("[transition]\nduration_ms = -5.0").is_err());
    assert!(ChartConfig::from_toml_str("[timeline]\ny_field = \"  \"").is_err());
    assert!(ChartConfig::from_toml_str("theme = [").is_err());
}

#[test]
fn unknown_theme_falls_back_to_light() {
    let cfg = ChartConfig::from_toml_str("theme = \"solarized\"").expect("parse");
    assert_eq!(cfg.theme().name, "light");
}

#[test]
fn loads_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("chart.toml");
    std::fs::write(&path, "[scales]\nmax_opacity = 1.0\n").expect("write");
    let cfg = ChartConfig::load(&path).expect("load");
    assert_eq!(cfg.scales.max_opacity, 1.0);
    assert!(ChartConfig::load(dir.path().join("missing.toml")).is_err());
}
