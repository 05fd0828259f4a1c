// File: crates/responsive-chart/src/context.rs
// Summary: Read-only per-chart context handed to the interaction controller on pointer events.

use crate::accessor::Encodings;
use crate::layout::Dimensions;
use crate::record::Dataset;
use crate::scale::ScaleSet;

/// Everything a render pass reads for one chart instance. Nothing here is shared between charts.
#[derive(Clone, Copy, Debug)]
pub struct ChartContext<'a> {
    pub dataset: &'a Dataset,
    pub encodings: &'a Encodings,
    pub scales: &'a ScaleSet,
    pub dimensions: &'a Dimensions,
}
