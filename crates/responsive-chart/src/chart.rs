// File: crates/responsive-chart/src/chart.rs
// Summary: Scatter chart session; owns dataset, encodings, layout, scales, mark pool and interaction state
// for one chart instance and runs the resize -> scales -> bind pipeline.

use crate::accessor::Encodings;
use crate::axis::{Axis, AxisOrient};
use crate::config::ChartConfig;
use crate::context::ChartContext;
use crate::error::ChartError;
use crate::geometry::{Point, Rect};
use crate::interaction::{InteractionController, InteractionState, Tooltip};
use crate::layout::{Dimensions, LayoutEngine};
use crate::marks::{BindReport, MarkBinder};
use crate::provider::DataProvider;
use crate::record::{Dataset, RecordKey};
use crate::scale::{ScaleFactory, ScaleSet};
use crate::scene::{Attr, NodeId, NodeKind, Scene, Transition};
use crate::types::Viewport;

pub const BOUNDS_CLASS: &str = "wrapper";
pub const MARKS_CLASS: &str = "dots";
pub const X_AXIS_CLASS: &str = "xaxis";
pub const Y_AXIS_CLASS: &str = "yaxis";
pub const X_TITLE_CLASS: &str = "xAxisLabel";
pub const Y_TITLE_CLASS: &str = "yAxisLabel";

/// Interactive scatter plot bound to one scene.
pub struct ScatterChart {
    config: ChartConfig,
    dataset: Dataset,
    encodings: Encodings,
    layout: LayoutEngine,
    factory: ScaleFactory,
    viewport: Option<Viewport>,
    dimensions: Option<Dimensions>,
    scales: Option<ScaleSet>,
    binder: MarkBinder,
    interaction: InteractionController,
    bounds: NodeId,
    marks_group: NodeId,
}

impl ScatterChart {
    /// Set up the chart's static nodes. Nothing is drawn until the first [`ScatterChart::resize`].
    pub fn new(
        dataset: Dataset,
        encodings: Encodings,
        config: ChartConfig,
        scene: &mut Scene,
    ) -> Result<Self, ChartError> {
        config.validate()?;
        let root = scene.root();
        let bounds = scene.select_or_create(root, NodeKind::Group, BOUNDS_CLASS);
        let marks_group = scene.select_or_create(bounds, NodeKind::Group, MARKS_CLASS);
        let mut interaction = InteractionController::new(config.interaction);
        interaction.attach(scene, root);
        Ok(Self {
            layout: config.layout.engine(),
            factory: ScaleFactory::new(config.scales),
            binder: MarkBinder::new(config.transition),
            interaction,
            config,
            dataset,
            encodings,
            viewport: None,
            dimensions: None,
            scales: None,
            bounds,
            marks_group,
        })
    }

    /// Await the dataset, then build the chart. A load failure renders nothing.
    pub async fn load(
        provider: &dyn DataProvider,
        source: &str,
        encodings: Encodings,
        config: ChartConfig,
        scene: &mut Scene,
    ) -> Result<Self, ChartError> {
        let dataset = provider.load_dataset(source).await?;
        Self::new(dataset, encodings, config, scene)
    }

    pub fn config(&self) -> &ChartConfig { &self.config }
    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn encodings(&self) -> &Encodings { &self.encodings }
    pub fn dimensions(&self) -> Option<&Dimensions> { self.dimensions.as_ref() }
    pub fn scales(&self) -> Option<&ScaleSet> { self.scales.as_ref() }
    pub fn marks(&self) -> &MarkBinder { &self.binder }
    pub fn state(&self) -> &InteractionState { self.interaction.state() }
    pub fn tooltip(&self) -> &Tooltip { self.interaction.tooltip() }
    pub fn bounds_node(&self) -> NodeId { self.bounds }

    /// Recompute geometry and scales for `viewport` and re-bind every mark.
    /// Degenerate geometry is refused and leaves the current marks untouched.
    pub fn resize(&mut self, scene: &mut Scene, viewport: Viewport) -> Result<BindReport, ChartError> {
        let dims = self.layout.compute(viewport);
        if let Err(e) = dims.check() {
            tracing::warn!(error = %e, "chart not rendered");
            return Err(e);
        }
        self.viewport = Some(viewport);

        scene.set_size(dims.width, dims.height);
        scene.set_attr(self.bounds, Attr::TranslateX, dims.margin.left as f64);
        scene.set_attr(self.bounds, Attr::TranslateY, dims.margin.top as f64);

        let scales = self.factory.build(&self.dataset, &self.encodings, &dims);
        self.interaction.reset(scene);
        self.render_axes(scene, &dims, &scales);

        let report = self.binder.bind(scene, self.marks_group, &self.dataset, &self.encodings, &scales);
        self.dimensions = Some(dims);
        self.scales = Some(scales);
        Ok(report)
    }

    /// Replace the dataset and re-render at the last viewport (if any).
    pub fn set_dataset(&mut self, scene: &mut Scene, dataset: Dataset) -> Result<BindReport, ChartError> {
        self.dataset = dataset;
        match self.viewport {
            Some(vp) => self.resize(scene, vp),
            None => Ok(BindReport::default()),
        }
    }

    fn render_axes(&self, scene: &mut Scene, dims: &Dimensions, scales: &ScaleSet) {
        let axes = &self.config.axes;
        let tr = Transition::new(0.0, self.config.transition.duration_ms);
        let x_title = axes.x_title.clone().unwrap_or_else(|| self.encodings.x.label().to_string());
        let y_title = axes.y_title.clone().unwrap_or_else(|| self.encodings.y.label().to_string());

        // No data on a channel means no ticks; the degenerate domain is not a real value.
        let count = |enc: &crate::accessor::Accessor, length: f64| {
            if self.dataset.extent(enc).is_some() { axes.tick_count(length) } else { 0.0 }
        };
        let x_count = count(&self.encodings.x, dims.bounded_width);
        let y_count = count(&self.encodings.y, dims.bounded_height);

        let x_axis = Axis::from_scale(x_title, AxisOrient::Bottom, &scales.x, x_count);
        let y_axis = Axis::from_scale(y_title, AxisOrient::Left, &scales.y, y_count);
        x_axis.render(scene, self.bounds, X_AXIS_CLASS, dims, tr);
        y_axis.render(scene, self.bounds, Y_AXIS_CLASS, dims, tr);
        x_axis.render_title(scene, self.bounds, X_TITLE_CLASS, dims);
        y_axis.render_title(scene, self.bounds, Y_TITLE_CLASS, dims);
    }

    /// Pointer entered the mark bound to `key`.
    pub fn pointer_enter(&mut self, scene: &mut Scene, key: &RecordKey) -> bool {
        let (Some(scales), Some(dims)) = (self.scales.as_ref(), self.dimensions.as_ref()) else {
            return false;
        };
        let ctx = ChartContext {
            dataset: &self.dataset,
            encodings: &self.encodings,
            scales,
            dimensions: dims,
        };
        self.interaction.pointer_enter(scene, key, &self.binder, &ctx)
    }

    /// Pointer left the chart region.
    pub fn pointer_leave(&mut self, scene: &mut Scene) {
        self.interaction.pointer_leave(scene, &self.binder);
    }

    /// Route a raw pointer position (outer coordinates): entering a mark highlights it, leaving the
    /// chart area clears the highlight. Returns the hovered key, if any.
    pub fn pointer_move(&mut self, scene: &mut Scene, point: Point) -> Option<RecordKey> {
        let dims = self.dimensions?;
        if !Rect::from_ltwh(0.0, 0.0, dims.width, dims.height).contains(point) {
            if self.interaction.state() != &InteractionState::Idle {
                self.pointer_leave(scene);
            }
            return None;
        }
        let key = scene.hit_test(point).and_then(|node| self.binder.key_for_node(node)).cloned()?;
        if self.interaction.state() != &InteractionState::Highlighted(key.clone()) {
            self.pointer_enter(scene, &key);
        }
        Some(key)
    }
}
