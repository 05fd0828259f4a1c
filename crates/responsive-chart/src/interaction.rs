// File: crates/responsive-chart/src/interaction.rs
// Summary: Pointer interaction; highlight/tooltip state machine over the bound marks.
//
// States: Idle and Highlighted(key). enter(k) moves any state to Highlighted(k); leave moves any
// state to Idle. Only tooltip attributes and per-mark opacity are written.

use serde::Deserialize;

use crate::context::ChartContext;
use crate::geometry::Point;
use crate::marks::MarkBinder;
use crate::record::RecordKey;
use crate::scene::{Attr, NodeId, NodeKind, Scene};

pub const TOOLTIP_CLASS: &str = "tooltip";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Highlighted(RecordKey),
}

/// Tooltip view model, mirrored into the scene's tooltip node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tooltip {
    pub visible: bool,
    /// Anchor point in outer chart coordinates.
    pub position: Point,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Opacity of every mark except the hovered one.
    pub dimmed_opacity: f64,
    pub highlight_opacity: f64,
    /// Tooltip shift as a fraction of its own size (centred above the point).
    pub anchor_x: f64,
    pub anchor_y: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self { dimmed_opacity: 0.1, highlight_opacity: 1.0, anchor_x: -0.5, anchor_y: -0.05 }
    }
}

#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    config: InteractionConfig,
    state: InteractionState,
    tooltip: Tooltip,
    tooltip_node: Option<NodeId>,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn state(&self) -> &InteractionState { &self.state }
    pub fn tooltip(&self) -> &Tooltip { &self.tooltip }

    /// Find or create the tooltip overlay under `overlay_parent`, hidden.
    pub fn attach(&mut self, scene: &mut Scene, overlay_parent: NodeId) {
        let node = scene.select_or_create(overlay_parent, NodeKind::Tooltip, TOOLTIP_CLASS);
        scene.set_attr(node, Attr::AnchorX, self.config.anchor_x);
        scene.set_attr(node, Attr::AnchorY, self.config.anchor_y);
        if !self.tooltip.visible {
            scene.set_attr(node, Attr::Opacity, 0.0);
        }
        self.tooltip_node = Some(node);
    }

    /// Highlight `key`. Returns false (and keeps the current state) for unbound keys.
    pub fn pointer_enter(
        &mut self,
        scene: &mut Scene,
        key: &RecordKey,
        marks: &MarkBinder,
        ctx: &ChartContext<'_>,
    ) -> bool {
        let Some(hovered) = marks.get(key) else {
            tracing::debug!(%key, "pointer entered an unbound key");
            return false;
        };
        let Some(record) = ctx.dataset.get(key) else {
            tracing::debug!(%key, "pointer entered a key missing from the dataset");
            return false;
        };

        let enc = ctx.encodings;
        let x = enc.x.value(record).and_then(|v| ctx.scales.x.map(v)).unwrap_or(hovered.target.cx);
        let y = enc.y.value(record).and_then(|v| ctx.scales.y.map(v)).unwrap_or(hovered.target.cy);
        let m = ctx.dimensions.margin;
        let position = Point::new(x + m.left as f64, y + m.top as f64);

        let describe = |a: &crate::accessor::Accessor| {
            let v = a.value(record).map(|v| a.format(v)).unwrap_or_else(|| "n/a".to_string());
            format!("{}: {}", a.label(), v)
        };
        let text = format!("{}\n{}", describe(&enc.x), describe(&enc.y));

        self.tooltip = Tooltip { visible: true, position, text };
        self.sync_tooltip(scene);

        for (_, mark) in marks.iter() {
            scene.set_attr(mark.node, Attr::Opacity, self.config.dimmed_opacity);
        }
        scene.set_attr(hovered.node, Attr::Opacity, self.config.highlight_opacity);

        tracing::debug!(from = ?self.state, to = %key, "highlight");
        self.state = InteractionState::Highlighted(key.clone());
        true
    }

    /// Leave the chart region: hide the tooltip and restore data-encoded opacity.
    pub fn pointer_leave(&mut self, scene: &mut Scene, marks: &MarkBinder) {
        self.hide_tooltip(scene);
        for (_, mark) in marks.iter() {
            scene.set_attr(mark.node, Attr::Opacity, mark.target.opacity);
        }
        if self.state != InteractionState::Idle {
            tracing::debug!(from = ?self.state, "highlight cleared");
        }
        self.state = InteractionState::Idle;
    }

    /// Return to Idle without touching mark opacity (a re-bind is about to retarget it).
    pub fn reset(&mut self, scene: &mut Scene) {
        self.hide_tooltip(scene);
        self.state = InteractionState::Idle;
    }

    fn hide_tooltip(&mut self, scene: &mut Scene) {
        self.tooltip.visible = false;
        self.sync_tooltip(scene);
    }

    fn sync_tooltip(&self, scene: &mut Scene) {
        let Some(node) = self.tooltip_node else { return };
        if self.tooltip.visible {
            scene.set_attr(node, Attr::X, self.tooltip.position.x);
            scene.set_attr(node, Attr::Y, self.tooltip.position.y);
            scene.set_attr(node, Attr::Text, self.tooltip.text.as_str());
            scene.set_attr(node, Attr::Opacity, 1.0);
        } else {
            scene.set_attr(node, Attr::Opacity, 0.0);
        }
    }
}
