// File: crates/responsive-chart/src/layout.rs
// Summary: Layout engine; derives chart dimensions from viewport size, sizing policy and margins.

use serde::Deserialize;

use crate::error::ChartError;
use crate::geometry::Rect;
use crate::types::{Insets, Viewport};

/// How the outer chart size follows the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// Square chart: `fraction * min(width, height)` on both sides.
    SquareFraction { fraction: f64 },
    /// `width_fraction * width` wide, fixed height.
    FixedHeight { width_fraction: f64, height: f64 },
}

impl LayoutPolicy {
    pub fn outer_size(&self, viewport: Viewport) -> (f64, f64) {
        let vp = viewport.sanitized();
        let nonneg = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
        match *self {
            LayoutPolicy::SquareFraction { fraction } => {
                let size = nonneg(fraction * vp.width.min(vp.height));
                (size, size)
            }
            LayoutPolicy::FixedHeight { width_fraction, height } => {
                (nonneg(width_fraction * vp.width), nonneg(height))
            }
        }
    }
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        LayoutPolicy::SquareFraction { fraction: 0.9 }
    }
}

/// Chart geometry for one viewport size. Replaced, never mutated, on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub margin: Insets,
    pub bounded_width: f64,
    pub bounded_height: f64,
    /// Margins exceeded the outer size on at least one axis.
    pub clamped: bool,
}

impl Dimensions {
    pub fn new(width: f64, height: f64, margin: Insets) -> Self {
        let raw_w = width - margin.hsum() as f64;
        let raw_h = height - margin.vsum() as f64;
        Self {
            width,
            height,
            margin,
            bounded_width: raw_w.max(0.0),
            bounded_height: raw_h.max(0.0),
            clamped: raw_w < 0.0 || raw_h < 0.0,
        }
    }

    /// The plotting area in outer coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_ltwh(
            self.margin.left as f64,
            self.margin.top as f64,
            self.bounded_width,
            self.bounded_height,
        )
    }

    /// Smaller of the two outer sides.
    pub fn size(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Refuse to draw into an empty plotting area.
    pub fn check(&self) -> Result<(), ChartError> {
        if self.bounded_width <= 0.0 || self.bounded_height <= 0.0 {
            return Err(ChartError::config(format!(
                "margins {:?} leave no plotting area in a {}x{} chart",
                self.margin, self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Pure mapping viewport -> dimensions for one chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutEngine {
    pub policy: LayoutPolicy,
    pub margin: Insets,
}

impl LayoutEngine {
    pub fn new(policy: LayoutPolicy, margin: Insets) -> Self {
        Self { policy, margin }
    }

    pub fn compute(&self, viewport: Viewport) -> Dimensions {
        let (w, h) = self.policy.outer_size(viewport);
        let dims = Dimensions::new(w, h, self.margin);
        if dims.clamped {
            tracing::warn!(
                width = w,
                height = h,
                margin = ?self.margin,
                "chart margins exceed outer size; bounded area clamped to zero"
            );
        }
        dims
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutPolicy::default(), Insets::scatter())
    }
}
