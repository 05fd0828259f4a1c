// File: crates/responsive-chart/src/scale.rs
// Summary: Continuous (linear/sqrt), time and sequential colour scales, and the factory that derives them
// from a dataset and chart dimensions.
//
// Degenerate domains (empty dataset, min == max) map every input to the midpoint of the range.

use chrono::{Datelike, Duration, NaiveDate};
use serde::Deserialize;

use crate::accessor::{date_to_millis, millis_to_date, Encodings};
use crate::color::{ColorScheme, Rgba};
use crate::geometry::lerp;
use crate::layout::Dimensions;
use crate::record::Dataset;
use crate::ticks::{nice_domain, ticks};

/// Default tick count used when rounding domains.
pub const NICE_COUNT: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    /// Power scale with exponent 0.5; area of a mark is linear in the value.
    Sqrt,
}

impl ScaleKind {
    #[inline]
    fn forward(&self, v: f64) -> f64 {
        match self {
            ScaleKind::Linear => v,
            ScaleKind::Sqrt => v.signum() * v.abs().sqrt(),
        }
    }
    #[inline]
    fn backward(&self, v: f64) -> f64 {
        match self {
            ScaleKind::Linear => v,
            ScaleKind::Sqrt => v.signum() * v * v,
        }
    }
}

/// Numeric domain -> numeric range mapping. Immutable; builders return new values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContinuousScale {
    pub kind: ScaleKind,
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl ContinuousScale {
    pub fn new(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { kind, domain, range }
    }
    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(ScaleKind::Linear, domain, range)
    }
    pub fn sqrt(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(ScaleKind::Sqrt, domain, range)
    }

    /// Scale over an optional extent; `None` (empty data) yields a degenerate scale.
    pub fn from_extent(kind: ScaleKind, extent: Option<(f64, f64)>, range: (f64, f64)) -> Self {
        Self::new(kind, extent.unwrap_or((0.0, 0.0)), range)
    }

    /// Same scale with the domain extended outward to round numbers.
    pub fn nice(self, count: f64) -> Self {
        let domain = nice_domain(self.domain.0, self.domain.1, count);
        Self { domain, ..self }
    }

    pub fn is_degenerate(&self) -> bool {
        let (d0, d1) = self.domain;
        !(d0.is_finite() && d1.is_finite()) || d0 == d1
    }

    fn normalize(&self, v: f64) -> f64 {
        let a = self.kind.forward(self.domain.0);
        let b = self.kind.forward(self.domain.1);
        let span = b - a;
        if self.is_degenerate() || span == 0.0 {
            return 0.5;
        }
        (self.kind.forward(v) - a) / span
    }

    /// Map a domain value into the range. Not clamped; `None` for non-finite input.
    pub fn map(&self, v: f64) -> Option<f64> {
        if !v.is_finite() {
            return None;
        }
        Some(lerp(self.range.0, self.range.1, self.normalize(v)))
    }

    /// Range value back to the domain. Degenerate scales return the domain start.
    pub fn invert(&self, px: f64) -> Option<f64> {
        if !px.is_finite() {
            return None;
        }
        let span = self.range.1 - self.range.0;
        if self.is_degenerate() || span == 0.0 {
            return Some(self.domain.0);
        }
        let t = (px - self.range.0) / span;
        let a = self.kind.forward(self.domain.0);
        let b = self.kind.forward(self.domain.1);
        Some(self.kind.backward(lerp(a, b, t)))
    }

    pub fn ticks(&self, count: f64) -> Vec<f64> {
        ticks(self.domain.0, self.domain.1, count)
    }
}

/// Sequential colour scale: numeric (or date-millis) domain -> continuous colour scheme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorScale {
    pub domain: (f64, f64),
    pub scheme: ColorScheme,
}

impl ColorScale {
    pub fn new(scheme: ColorScheme, extent: Option<(f64, f64)>) -> Self {
        Self { domain: extent.unwrap_or((0.0, 0.0)), scheme }
    }

    pub fn map(&self, v: f64) -> Option<Rgba> {
        if !v.is_finite() {
            return None;
        }
        let (d0, d1) = self.domain;
        let t = if d1 == d0 || !(d0.is_finite() && d1.is_finite()) { 0.5 } else { (v - d0) / (d1 - d0) };
        Some(self.scheme.interpolate(t))
    }
}

/// Calendar step used for time axis ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    Days(u32),
    Weeks(u32),
    Months(u32),
    Years(i32),
}

impl TimeInterval {
    fn approx_days(&self) -> f64 {
        match *self {
            TimeInterval::Days(n) => n as f64,
            TimeInterval::Weeks(n) => 7.0 * n as f64,
            TimeInterval::Months(n) => 30.0 * n as f64,
            TimeInterval::Years(n) => 365.0 * n as f64,
        }
    }
}

const TIME_INTERVALS: [TimeInterval; 7] = [
    TimeInterval::Days(1),
    TimeInterval::Days(2),
    TimeInterval::Weeks(1),
    TimeInterval::Months(1),
    TimeInterval::Months(3),
    TimeInterval::Years(1),
    TimeInterval::Years(5),
];

/// Linear scale over epoch milliseconds with calendar-aware ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    pub inner: ContinuousScale,
}

impl TimeScale {
    pub fn new(extent: Option<(f64, f64)>, range: (f64, f64)) -> Self {
        Self { inner: ContinuousScale::from_extent(ScaleKind::Linear, extent, range) }
    }

    pub fn map(&self, ms: f64) -> Option<f64> { self.inner.map(ms) }
    pub fn map_date(&self, d: NaiveDate) -> Option<f64> { self.inner.map(date_to_millis(d)) }

    /// Interval whose length is closest to span/count.
    pub fn interval_for(&self, count: f64) -> TimeInterval {
        let span_days = (self.inner.domain.1 - self.inner.domain.0).abs() / 86_400_000.0;
        let target = span_days / count.max(1.0);
        TIME_INTERVALS
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (a.approx_days() / target).ln().abs();
                let db = (b.approx_days() / target).ln().abs();
                da.total_cmp(&db)
            })
            .unwrap_or(TimeInterval::Days(1))
    }

    /// Tick dates inside the domain.
    pub fn ticks(&self, count: f64) -> Vec<NaiveDate> {
        let (a, b) = self.inner.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let (Some(start), Some(end)) = (millis_to_date(lo), millis_to_date(hi)) else {
            return Vec::new();
        };
        if count.is_nan() || count <= 0.0 {
            return Vec::new();
        }
        if start == end {
            return vec![start];
        }
        let interval = self.interval_for(count);
        let mut out = Vec::new();
        let mut cur = first_aligned(start, interval);
        while cur <= end {
            if cur >= start {
                out.push(cur);
            }
            match step(cur, interval) {
                Some(next) if next > cur => cur = next,
                _ => break,
            }
        }
        out
    }

    /// Multi-scale label: year on Jan 1, month name on the 1st, else "Mon DD".
    pub fn format_tick(d: NaiveDate) -> String {
        if d.month() == 1 && d.day() == 1 {
            d.format("%Y").to_string()
        } else if d.day() == 1 {
            d.format("%B").to_string()
        } else {
            d.format("%b %d").to_string()
        }
    }
}

fn first_aligned(start: NaiveDate, interval: TimeInterval) -> NaiveDate {
    match interval {
        TimeInterval::Days(_) => start,
        TimeInterval::Weeks(_) => {
            let back = start.weekday().num_days_from_sunday() as i64;
            start - Duration::days(back)
        }
        TimeInterval::Months(n) => {
            let m0 = start.month0() - start.month0() % n.max(1);
            NaiveDate::from_ymd_opt(start.year(), m0 + 1, 1).unwrap_or(start)
        }
        TimeInterval::Years(n) => {
            let y = start.year() - start.year().rem_euclid(n.max(1));
            NaiveDate::from_ymd_opt(y, 1, 1).unwrap_or(start)
        }
    }
}

fn step(d: NaiveDate, interval: TimeInterval) -> Option<NaiveDate> {
    match interval {
        TimeInterval::Days(n) => d.checked_add_signed(Duration::days(n as i64)),
        TimeInterval::Weeks(n) => d.checked_add_signed(Duration::weeks(n as i64)),
        TimeInterval::Months(n) => d.checked_add_months(chrono::Months::new(n)),
        TimeInterval::Years(n) => NaiveDate::from_ymd_opt(d.year() + n, 1, 1),
    }
}

/// Range/shape parameters for the scatter plot's scales.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    pub min_radius: f64,
    /// Largest radius is `chart size / max_radius_divisor`.
    pub max_radius_divisor: f64,
    pub max_opacity: f64,
    pub min_opacity: f64,
    pub scheme: ColorScheme,
    /// Round position/opacity domains outward.
    pub nice: bool,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            min_radius: 2.0,
            max_radius_divisor: 50.0,
            max_opacity: 1.5,
            min_opacity: 0.1,
            scheme: ColorScheme::Spectral,
            nice: true,
        }
    }
}

/// One scale per visual channel. Rebuilt whenever the dataset or dimensions change.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleSet {
    pub x: ContinuousScale,
    pub y: ContinuousScale,
    pub radius: ContinuousScale,
    pub color: ColorScale,
    pub opacity: ContinuousScale,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScaleFactory {
    pub config: ScaleConfig,
}

impl ScaleFactory {
    pub fn new(config: ScaleConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, data: &Dataset, enc: &Encodings, dims: &Dimensions) -> ScaleSet {
        let c = &self.config;
        let nice = |s: ContinuousScale| if c.nice { s.nice(NICE_COUNT) } else { s };

        let x = nice(ContinuousScale::from_extent(
            ScaleKind::Linear,
            data.extent(&enc.x),
            (0.0, dims.bounded_width),
        ));
        let y = nice(ContinuousScale::from_extent(
            ScaleKind::Linear,
            data.extent(&enc.y),
            (dims.bounded_height, 0.0),
        ));
        let max_radius = if c.max_radius_divisor > 0.0 { dims.size() / c.max_radius_divisor } else { c.min_radius };
        let radius = ContinuousScale::from_extent(
            ScaleKind::Sqrt,
            data.extent(&enc.radius),
            (c.min_radius, max_radius),
        );
        let color = ColorScale::new(c.scheme, data.extent(&enc.color));
        let opacity = nice(ContinuousScale::from_extent(
            ScaleKind::Sqrt,
            data.extent(&enc.opacity),
            (c.max_opacity, c.min_opacity),
        ));
        ScaleSet { x, y, radius, color, opacity }
    }
}
