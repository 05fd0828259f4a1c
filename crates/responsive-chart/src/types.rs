// File: crates/responsive-chart/src/types.rs
// Summary: Shared value types (viewport, margins) and default sizes.

use serde::Deserialize;

/// Viewport width used by headless callers when none is supplied.
pub const VIEWPORT_WIDTH: f64 = 1024.0;
/// Viewport height used by headless callers when none is supplied.
pub const VIEWPORT_HEIGHT: f64 = 640.0;

/// Chart margins, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }

    /// Margins used by the scatter plot: room for axis ticks and titles on the left and bottom.
    pub const fn scatter() -> Self { Self::new(60, 15, 15, 60) }

    /// Margins used by the time-series line chart.
    pub const fn timeline() -> Self { Self::new(60, 15, 15, 20) }
}

impl Default for Insets {
    fn default() -> Self {
        Self::scatter()
    }
}

/// Host viewport size in CSS-like pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Same viewport with non-finite or negative sides replaced by 0.
    pub fn sanitized(self) -> Self {
        let fix = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
        Self { width: fix(self.width), height: fix(self.height) }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT)
    }
}

impl std::str::FromStr for Viewport {
    type Err = String;

    /// Parses `WIDTHxHEIGHT`, e.g. `1280x800`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s
            .split_once(|c: char| c == 'x' || c == 'X')
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
        let width = w.trim().parse::<f64>().map_err(|e| format!("bad width '{w}': {e}"))?;
        let height = h.trim().parse::<f64>().map_err(|e| format!("bad height '{h}': {e}"))?;
        Ok(Self::new(width, height))
    }
}
