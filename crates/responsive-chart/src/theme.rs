// File: crates/responsive-chart/src/theme.rs
// Summary: Light/Dark colour presets used by the SVG and raster exporters.

use crate::color::Rgba;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub axis_line: Rgba,
    pub axis_label: Rgba,
    pub tick: Rgba,
    pub line_stroke: Rgba,
    pub threshold_fill: Rgba,
    pub tooltip_background: Rgba,
    pub tooltip_text: Rgba,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(255, 255, 255),
            axis_line: Rgba::rgb(0, 0, 0),
            axis_label: Rgba::rgb(20, 20, 30),
            tick: Rgba::rgb(60, 60, 70),
            line_stroke: Rgba::rgb(0, 128, 0), // green
            threshold_fill: Rgba::rgb(135, 206, 235), // skyblue
            tooltip_background: Rgba::rgba(255, 255, 255, 230),
            tooltip_text: Rgba::rgb(20, 20, 30),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            axis_line: Rgba::rgb(180, 180, 190),
            axis_label: Rgba::rgb(235, 235, 245),
            tick: Rgba::rgb(150, 150, 160),
            line_stroke: Rgba::rgb(64, 160, 255),
            threshold_fill: Rgba::rgba(64, 160, 255, 80),
            tooltip_background: Rgba::rgba(40, 40, 45, 230),
            tooltip_text: Rgba::rgb(235, 235, 245),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
