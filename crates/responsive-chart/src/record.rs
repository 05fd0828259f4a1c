// File: crates/responsive-chart/src/record.rs
// Summary: Record and Dataset model; date-keyed observations with named numeric fields.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::NaiveDate;
use serde_json::Value;

use crate::accessor::Accessor;
use crate::error::LoadError;

/// Date format used both for parsing and for record keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Identity of a record (and of the mark bound to it): its ISO date.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<NaiveDate> for RecordKey {
    fn from(d: NaiveDate) -> Self {
        Self(d.format(DATE_FORMAT).to_string())
    }
}

/// One observation. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    date: NaiveDate,
    key: RecordKey,
    values: BTreeMap<String, f64>,
}

impl Record {
    pub fn new(date: NaiveDate) -> Self {
        Self { date, key: RecordKey::from(date), values: BTreeMap::new() }
    }

    /// Parse the date with [`DATE_FORMAT`] and build an empty record.
    pub fn parse(date: &str) -> Option<Self> {
        NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok().map(Self::new)
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.values.insert(field.into(), value);
        self
    }

    pub fn date(&self) -> NaiveDate { self.date }
    pub fn key(&self) -> &RecordKey { &self.key }

    /// Numeric field by name; `None` when missing.
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    /// Build from one JSON object. Numeric members become fields; everything else except
    /// `date` is ignored.
    pub fn from_json(index: usize, value: &Value) -> Result<Self, LoadError> {
        let obj = value.as_object().ok_or(LoadError::MissingDate { index })?;
        let raw = obj
            .get("date")
            .and_then(Value::as_str)
            .ok_or(LoadError::MissingDate { index })?;
        let mut rec = Self::parse(raw)
            .ok_or_else(|| LoadError::BadDate { index, value: raw.to_string() })?;
        for (name, v) in obj {
            if let Some(n) = v.as_f64() {
                rec.values.insert(name.clone(), n);
            }
        }
        Ok(rec)
    }
}

/// Ordered, read-only sequence of records with unique keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Contract: keys are unique; a duplicate is a load error.
    pub fn new(records: Vec<Record>) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(records.len());
        for r in &records {
            if !seen.insert(r.key().clone()) {
                return Err(LoadError::DuplicateKey(r.key().clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn from_json_str(payload: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(payload)?;
        Self::from_json_value(&value)
    }

    pub fn from_json_value(value: &Value) -> Result<Self, LoadError> {
        let items = value.as_array().ok_or(LoadError::NotAnArray)?;
        let records = items
            .iter()
            .enumerate()
            .map(|(i, v)| Record::from_json(i, v))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn records(&self) -> &[Record] { &self.records }
    pub fn iter(&self) -> std::slice::Iter<'_, Record> { self.records.iter() }

    pub fn get(&self, key: &RecordKey) -> Option<&Record> {
        self.records.iter().find(|r| r.key() == key)
    }

    /// Copy of this dataset without `key` (no-op when absent).
    pub fn without(&self, key: &RecordKey) -> Self {
        Self { records: self.records.iter().filter(|r| r.key() != key).cloned().collect() }
    }

    /// [min, max] of `accessor` over the records that yield a finite value.
    pub fn extent(&self, accessor: &Accessor) -> Option<(f64, f64)> {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for v in self.records.iter().filter_map(|r| accessor.value(r)) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo.is_finite() && hi.is_finite() { Some((lo, hi)) } else { None }
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
