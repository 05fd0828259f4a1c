// File: crates/responsive-chart/src/axis.rs
// Summary: Axis model (ticks + title) built from scales and drawn into the scene via select-or-create.

use serde::Deserialize;

use crate::accessor::format_number;
use crate::layout::Dimensions;
use crate::scale::{ContinuousScale, TimeScale};
use crate::scene::{Attr, NodeId, NodeKind, Scene, Transition};
use crate::ticks::tick_count_for;

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const TICK_FONT_SIZE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisOrient {
    Left,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// Pixel offset along the axis.
    pub offset: f64,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub label: String,
    pub orient: AxisOrient,
    pub length: f64,
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn new(label: impl Into<String>, orient: AxisOrient, length: f64) -> Self {
        Self { label: label.into(), orient, length, ticks: Vec::new() }
    }

    /// Numeric ticks from a continuous scale.
    pub fn from_scale(
        label: impl Into<String>,
        orient: AxisOrient,
        scale: &ContinuousScale,
        count: f64,
    ) -> Self {
        let (r0, r1) = scale.range;
        let mut axis = Self::new(label, orient, (r1 - r0).abs());
        axis.ticks = scale
            .ticks(count)
            .into_iter()
            .filter_map(|v| scale.map(v).map(|offset| Tick { offset, label: format_number(v) }))
            .collect();
        axis
    }

    /// Calendar ticks from a time scale.
    pub fn from_time_scale(
        label: impl Into<String>,
        orient: AxisOrient,
        scale: &TimeScale,
        count: f64,
    ) -> Self {
        let (r0, r1) = scale.inner.range;
        let mut axis = Self::new(label, orient, (r1 - r0).abs());
        axis.ticks = scale
            .ticks(count)
            .into_iter()
            .filter_map(|d| scale.map_date(d).map(|offset| Tick { offset, label: TimeScale::format_tick(d) }))
            .collect();
        axis
    }

    /// Draw (or redraw) this axis into the group with `class` under `bounds`.
    pub fn render(&self, scene: &mut Scene, bounds: NodeId, class: &str, dims: &Dimensions, tr: Transition) -> NodeId {
        let group = scene.select_or_create(bounds, NodeKind::Group, class);
        let shift_y = match self.orient {
            AxisOrient::Bottom => dims.bounded_height,
            AxisOrient::Left => 0.0,
        };
        scene.set_attr(group, Attr::TranslateX, 0.0);
        scene.animate(group, Attr::TranslateY, shift_y, tr);

        for child in scene.children(group).to_vec() {
            scene.remove(child);
        }

        let domain = scene.append(group, NodeKind::Line, Some("domain"));
        let (x2, y2) = match self.orient {
            AxisOrient::Bottom => (self.length, 0.0),
            AxisOrient::Left => (0.0, self.length),
        };
        scene.set_attr(domain, Attr::X1, 0.0);
        scene.set_attr(domain, Attr::Y1, 0.0);
        scene.set_attr(domain, Attr::X2, x2);
        scene.set_attr(domain, Attr::Y2, y2);

        for tick in &self.ticks {
            let line = scene.append(group, NodeKind::Line, Some("tick"));
            let text = scene.append(group, NodeKind::Text, Some("tick-label"));
            scene.set_attr(text, Attr::Text, tick.label.as_str());
            scene.set_attr(text, Attr::FontSize, TICK_FONT_SIZE);
            match self.orient {
                AxisOrient::Bottom => {
                    scene.set_attr(line, Attr::X1, tick.offset);
                    scene.set_attr(line, Attr::X2, tick.offset);
                    scene.set_attr(line, Attr::Y1, 0.0);
                    scene.set_attr(line, Attr::Y2, TICK_SIZE);
                    scene.set_attr(text, Attr::X, tick.offset);
                    scene.set_attr(text, Attr::Y, TICK_SIZE + TICK_PADDING + TICK_FONT_SIZE);
                    scene.set_attr(text, Attr::TextAnchor, "middle");
                }
                AxisOrient::Left => {
                    scene.set_attr(line, Attr::X1, -TICK_SIZE);
                    scene.set_attr(line, Attr::X2, 0.0);
                    scene.set_attr(line, Attr::Y1, tick.offset);
                    scene.set_attr(line, Attr::Y2, tick.offset);
                    scene.set_attr(text, Attr::X, -(TICK_SIZE + TICK_PADDING));
                    scene.set_attr(text, Attr::Y, tick.offset + TICK_FONT_SIZE * 0.32);
                    scene.set_attr(text, Attr::TextAnchor, "end");
                }
            }
        }
        group
    }

    /// Axis title, positioned outside the ticks (x centred below, y rotated along the left edge).
    pub fn render_title(&self, scene: &mut Scene, bounds: NodeId, class: &str, dims: &Dimensions) -> NodeId {
        let text = scene.select_or_create(bounds, NodeKind::Text, class);
        scene.set_attr(text, Attr::Text, self.label.as_str());
        scene.set_attr(text, Attr::TextAnchor, "middle");
        scene.set_attr(text, Attr::FontSize, TICK_FONT_SIZE);
        match self.orient {
            AxisOrient::Bottom => {
                scene.set_attr(text, Attr::X, dims.bounded_width / 2.0);
                scene.set_attr(text, Attr::Y, dims.bounded_height + 40.0);
            }
            AxisOrient::Left => {
                scene.set_attr(text, Attr::X, -dims.bounded_height / 2.0);
                scene.set_attr(text, Attr::Y, -36.0);
                scene.set_attr(text, Attr::Rotate, -90.0);
            }
        }
        text
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    /// One tick per this many pixels of axis length.
    pub tick_spacing_px: f64,
    /// Titles; `None` falls back to the accessor labels.
    pub x_title: Option<String>,
    pub y_title: Option<String>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self { tick_spacing_px: 50.0, x_title: None, y_title: None }
    }
}

impl AxisConfig {
    pub fn tick_count(&self, length_px: f64) -> f64 {
        tick_count_for(length_px, self.tick_spacing_px)
    }
}
