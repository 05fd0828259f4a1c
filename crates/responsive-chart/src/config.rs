// File: crates/responsive-chart/src/config.rs
// Summary: TOML-backed chart configuration; every section has defaults matching the stock weather charts.

use std::path::Path;

use serde::Deserialize;

use crate::axis::AxisConfig;
use crate::error::ChartError;
use crate::interaction::InteractionConfig;
use crate::layout::{LayoutEngine, LayoutPolicy};
use crate::marks::TransitionConfig;
use crate::scale::ScaleConfig;
use crate::theme::{self, Theme};
use crate::types::Insets;

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub sizing: LayoutPolicy,
    pub margin: Insets,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { sizing: LayoutPolicy::SquareFraction { fraction: 0.9 }, margin: Insets::scatter() }
    }
}

impl LayoutConfig {
    pub fn engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.sizing, self.margin)
    }
}

/// Time-series line chart settings.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Numeric field plotted against the record date.
    pub y_field: String,
    /// Values below this are shaded (the "freezing" band).
    pub threshold: Option<f64>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self { y_field: "temperatureMax".to_string(), threshold: Some(50.0) }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub layout: LayoutConfig,
    pub scales: ScaleConfig,
    pub transition: TransitionConfig,
    pub interaction: InteractionConfig,
    pub axes: AxisConfig,
    pub timeline: TimelineConfig,
    /// Theme preset name (`light` or `dark`).
    pub theme: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self::scatter()
    }
}

impl ChartConfig {
    /// Square chart at 90% of the smaller viewport side.
    pub fn scatter() -> Self {
        Self {
            layout: LayoutConfig::default(),
            scales: ScaleConfig::default(),
            transition: TransitionConfig::default(),
            interaction: InteractionConfig::default(),
            axes: AxisConfig::default(),
            timeline: TimelineConfig::default(),
            theme: "light".to_string(),
        }
    }

    /// 90% of the viewport width, 400px tall.
    pub fn timeline() -> Self {
        Self {
            layout: LayoutConfig {
                sizing: LayoutPolicy::FixedHeight { width_fraction: 0.9, height: 400.0 },
                margin: Insets::timeline(),
            },
            ..Self::scatter()
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ChartError> {
        let cfg: Self = toml::from_str(s).map_err(|e| ChartError::config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ChartError::config(format!("reading {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn theme(&self) -> Theme {
        theme::find(&self.theme)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        let positive = |v: f64, name: &str| {
            if v.is_finite() && v > 0.0 { Ok(()) } else { Err(ChartError::config(format!("{name} must be > 0, got {v}"))) }
        };
        let non_negative = |v: f64, name: &str| {
            if v.is_finite() && v >= 0.0 { Ok(()) } else { Err(ChartError::config(format!("{name} must be >= 0, got {v}"))) }
        };
        match self.layout.sizing {
            LayoutPolicy::SquareFraction { fraction } => positive(fraction, "layout.sizing.fraction")?,
            LayoutPolicy::FixedHeight { width_fraction, height } => {
                positive(width_fraction, "layout.sizing.width_fraction")?;
                positive(height, "layout.sizing.height")?;
            }
        }
        non_negative(self.scales.min_radius, "scales.min_radius")?;
        positive(self.scales.max_radius_divisor, "scales.max_radius_divisor")?;
        non_negative(self.scales.min_opacity, "scales.min_opacity")?;
        non_negative(self.scales.max_opacity, "scales.max_opacity")?;
        non_negative(self.transition.stagger_ms, "transition.stagger_ms")?;
        non_negative(self.transition.duration_ms, "transition.duration_ms")?;
        non_negative(self.interaction.dimmed_opacity, "interaction.dimmed_opacity")?;
        non_negative(self.interaction.highlight_opacity, "interaction.highlight_opacity")?;
        positive(self.axes.tick_spacing_px, "axes.tick_spacing_px")?;
        if self.timeline.y_field.trim().is_empty() {
            return Err(ChartError::config("timeline.y_field must not be empty"));
        }
        Ok(())
    }
}
