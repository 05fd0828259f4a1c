// File: crates/responsive-chart/src/error.rs
// Summary: Error taxonomy for loading, configuration and per-record accessor failures.

use thiserror::Error;

use crate::record::RecordKey;

/// Failure to obtain a dataset. Fatal to chart construction.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed CSV payload: {0}")]
    Csv(#[from] csv::Error),
    #[error("expected an array of records")]
    NotAnArray,
    #[error("record {index} has no `date` field")]
    MissingDate { index: usize },
    #[error("record {index} has unparseable date '{value}'")]
    BadDate { index: usize, value: String },
    #[error("duplicate record key {0}")]
    DuplicateKey(RecordKey),
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("data load failed: {0}")]
    Load(#[from] LoadError),
    #[error("invalid chart configuration: {0}")]
    Config(String),
    #[error("record {key} has no usable value for the {channel} channel")]
    Accessor { key: RecordKey, channel: &'static str },
}

impl ChartError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
