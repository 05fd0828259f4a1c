// File: crates/responsive-chart/src/accessor.rs
// Summary: Named accessor functions extracting one channel value from a record, and per-chart encodings.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};

use crate::record::{Record, DATE_FORMAT};

/// How an accessor's numbers should be read back by humans.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    /// Milliseconds since the Unix epoch (UTC midnight for calendar dates).
    Date,
}

type AccessFn = dyn Fn(&Record) -> Option<f64> + Send + Sync;

/// Pure function `&Record -> Option<f64>` with a display label.
#[derive(Clone)]
pub struct Accessor {
    label: String,
    kind: ValueKind,
    f: Arc<AccessFn>,
}

impl Accessor {
    pub fn new(
        label: impl Into<String>,
        kind: ValueKind,
        f: impl Fn(&Record) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        Self { label: label.into(), kind, f: Arc::new(f) }
    }

    /// Numeric field by name, labelled with the field name.
    pub fn field(name: &str) -> Self {
        Self::labelled_field(name, name)
    }

    pub fn labelled_field(name: &str, label: &str) -> Self {
        let owned = name.to_string();
        Self::new(label, ValueKind::Number, move |r| r.get(&owned))
    }

    /// The record date as epoch milliseconds.
    pub fn date() -> Self {
        Self::new("date", ValueKind::Date, |r| Some(date_to_millis(r.date())))
    }

    pub fn label(&self) -> &str { &self.label }
    pub fn kind(&self) -> ValueKind { self.kind }

    /// Value for `record`; non-finite results count as missing.
    pub fn value(&self, record: &Record) -> Option<f64> {
        (self.f)(record).filter(|v| v.is_finite())
    }

    /// Human-readable rendering of a value produced by this accessor.
    pub fn format(&self, v: f64) -> String {
        match self.kind {
            ValueKind::Number => format_number(v),
            ValueKind::Date => millis_to_date(v)
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_else(|| format_number(v)),
        }
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor").field("label", &self.label).field("kind", &self.kind).finish()
    }
}

pub fn date_to_millis(d: NaiveDate) -> f64 {
    d.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis() as f64)
        .unwrap_or(0.0)
}

pub fn millis_to_date(ms: f64) -> Option<NaiveDate> {
    if !ms.is_finite() { return None; }
    DateTime::from_timestamp_millis(ms.round() as i64).map(|dt| dt.date_naive())
}

/// Shortest decimal form with at most 2 fractional digits.
pub fn format_number(v: f64) -> String {
    let s = format!("{v:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// One accessor per visual channel of the scatter plot.
#[derive(Clone, Debug)]
pub struct Encodings {
    pub x: Accessor,
    pub y: Accessor,
    pub radius: Accessor,
    pub color: Accessor,
    pub opacity: Accessor,
    /// Z-ordering key: larger values are drawn underneath.
    pub priority: Accessor,
}

impl Encodings {
    /// Dew point against humidity, coloured by date, sized and faded by max temperature.
    pub fn weather_scatter() -> Self {
        let temp = Accessor::labelled_field("temperatureMax", "max temperature");
        Self {
            x: Accessor::labelled_field("dewPoint", "dew point"),
            y: Accessor::labelled_field("humidity", "humidity"),
            radius: temp.clone(),
            color: Accessor::date(),
            opacity: temp.clone(),
            priority: temp,
        }
    }
}

impl Default for Encodings {
    fn default() -> Self {
        Self::weather_scatter()
    }
}
