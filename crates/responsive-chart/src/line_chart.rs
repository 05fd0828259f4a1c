// File: crates/responsive-chart/src/line_chart.rs
// Summary: Time-series line chart session (value over date) with a shaded threshold band.

use crate::accessor::Accessor;
use crate::axis::{Axis, AxisOrient};
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::geometry::{clamp, Point};
use crate::layout::{Dimensions, LayoutEngine};
use crate::line::LinePath;
use crate::provider::DataProvider;
use crate::record::Dataset;
use crate::scale::{ContinuousScale, ScaleKind, TimeScale};
use crate::scene::{Attr, NodeId, NodeKind, Scene, Transition};
use crate::types::Viewport;

pub const THRESHOLD_CLASS: &str = "threshold";
pub const LINE_CLASS: &str = "line";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineReport {
    /// Records contributing a point to the path.
    pub points: usize,
    /// Disconnected runs in the path.
    pub segments: usize,
}

pub struct LineChart {
    config: ChartConfig,
    dataset: Dataset,
    x: Accessor,
    y: Accessor,
    layout: LayoutEngine,
    dimensions: Option<Dimensions>,
    x_scale: Option<TimeScale>,
    y_scale: Option<ContinuousScale>,
    bounds: NodeId,
}

impl LineChart {
    pub fn new(dataset: Dataset, config: ChartConfig, scene: &mut Scene) -> Result<Self, ChartError> {
        config.validate()?;
        let bounds = scene.select_or_create(scene.root(), NodeKind::Group, crate::chart::BOUNDS_CLASS);
        let y = Accessor::field(&config.timeline.y_field);
        Ok(Self {
            layout: config.layout.engine(),
            config,
            dataset,
            x: Accessor::date(),
            y,
            dimensions: None,
            x_scale: None,
            y_scale: None,
            bounds,
        })
    }

    pub async fn load(
        provider: &dyn DataProvider,
        source: &str,
        config: ChartConfig,
        scene: &mut Scene,
    ) -> Result<Self, ChartError> {
        let dataset = provider.load_dataset(source).await?;
        Self::new(dataset, config, scene)
    }

    pub fn dataset(&self) -> &Dataset { &self.dataset }
    pub fn dimensions(&self) -> Option<&Dimensions> { self.dimensions.as_ref() }
    pub fn x_scale(&self) -> Option<&TimeScale> { self.x_scale.as_ref() }
    pub fn y_scale(&self) -> Option<&ContinuousScale> { self.y_scale.as_ref() }

    /// Lay out for `viewport` and (re)draw band, line and axes into the same nodes.
    pub fn render(&mut self, scene: &mut Scene, viewport: Viewport) -> Result<LineReport, ChartError> {
        let dims = self.layout.compute(viewport);
        if let Err(e) = dims.check() {
            tracing::warn!(error = %e, "line chart not rendered");
            return Err(e);
        }

        scene.set_size(dims.width, dims.height);
        scene.set_attr(self.bounds, Attr::TranslateX, dims.margin.left as f64);
        scene.set_attr(self.bounds, Attr::TranslateY, dims.margin.top as f64);

        let x_extent = self.dataset.extent(&self.x);
        let y_extent = self.dataset.extent(&self.y);
        let x_scale = TimeScale::new(x_extent, (0.0, dims.bounded_width));
        let y_scale = ContinuousScale::from_extent(ScaleKind::Linear, y_extent, (dims.bounded_height, 0.0));

        // Colours are left to the exporter's theme.
        match self.config.timeline.threshold.filter(|_| y_extent.is_some()) {
            Some(threshold) => {
                let band = scene.select_or_create(self.bounds, NodeKind::Rect, THRESHOLD_CLASS);
                let top = y_scale
                    .map(threshold)
                    .map(|y| clamp(y, 0.0, dims.bounded_height))
                    .unwrap_or(dims.bounded_height);
                scene.set_attr(band, Attr::X, 0.0);
                scene.set_attr(band, Attr::Y, top);
                scene.set_attr(band, Attr::Width, dims.bounded_width);
                scene.set_attr(band, Attr::Height, dims.bounded_height - top);
            }
            None => {
                if let Some(band) = scene.select(self.bounds, THRESHOLD_CLASS) {
                    scene.remove(band);
                }
            }
        }

        let points = self.dataset.iter().map(|r| {
            let x = self.x.value(r).and_then(|v| x_scale.map(v))?;
            let y = self.y.value(r).and_then(|v| y_scale.map(v))?;
            Some(Point::new(x, y))
        });
        let path = LinePath::from_points(points);
        let line = scene.select_or_create(self.bounds, NodeKind::Path, LINE_CLASS);
        scene.set_attr(line, Attr::D, path.to_svg());
        scene.set_attr(line, Attr::StrokeWidth, 2.0);

        let axes = &self.config.axes;
        let count = |extent: Option<(f64, f64)>, length: f64| {
            if extent.is_some() { axes.tick_count(length) } else { 0.0 }
        };
        let x_axis = Axis::from_time_scale(
            axes.x_title.clone().unwrap_or_default(),
            AxisOrient::Bottom,
            &x_scale,
            count(x_extent, dims.bounded_width),
        );
        let y_axis = Axis::from_scale(
            axes.y_title.clone().unwrap_or_default(),
            AxisOrient::Left,
            &y_scale,
            count(y_extent, dims.bounded_height),
        );
        x_axis.render(scene, self.bounds, crate::chart::X_AXIS_CLASS, &dims, Transition::immediate());
        y_axis.render(scene, self.bounds, crate::chart::Y_AXIS_CLASS, &dims, Transition::immediate());

        let report = LineReport {
            points: path.commands().len(),
            segments: path.segment_count(),
        };
        tracing::debug!(points = report.points, segments = report.segments, "line chart rendered");

        self.dimensions = Some(dims);
        self.x_scale = Some(x_scale);
        self.y_scale = Some(y_scale);
        Ok(report)
    }
}
