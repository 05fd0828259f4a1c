// File: crates/responsive-chart/src/lib.rs
// Summary: Core library entry point; exports the data model, scales, scene graph and chart sessions.

pub mod types;
pub mod error;
pub mod geometry;
pub mod record;
pub mod accessor;
pub mod layout;
pub mod ticks;
pub mod color;
pub mod theme;
pub mod scale;
pub mod scene;
pub mod marks;
pub mod context;
pub mod interaction;
pub mod axis;
pub mod line;
pub mod config;
pub mod provider;
pub mod chart;
pub mod line_chart;
pub mod svg;

pub use types::{Insets, Viewport};
pub use error::{ChartError, LoadError};
pub use record::{Dataset, Record, RecordKey};
pub use accessor::{Accessor, Encodings, ValueKind};
pub use layout::{Dimensions, LayoutEngine, LayoutPolicy};
pub use color::{ColorScheme, Rgba};
pub use theme::Theme;
pub use scale::{ColorScale, ContinuousScale, ScaleFactory, ScaleSet, TimeScale};
pub use scene::{Attr, AttrValue, NodeId, NodeKind, Scene, Transition};
pub use marks::{BindReport, Join, MarkBinder, MarkTarget};
pub use interaction::{InteractionController, InteractionState, Tooltip};
pub use config::ChartConfig;
pub use provider::{CsvFileProvider, DataProvider, FileProvider, JsonFileProvider, StaticProvider};
pub use chart::ScatterChart;
pub use line_chart::{LineChart, LineReport};
pub use svg::render_svg;
