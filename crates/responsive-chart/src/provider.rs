// File: crates/responsive-chart/src/provider.rs
// Summary: Asynchronous data providers (JSON file, CSV file, in-memory) yielding ready-made datasets.

use async_trait::async_trait;

use crate::error::LoadError;
use crate::record::{Dataset, Record};

/// Source of the one dataset a chart session renders.
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Resolve `source` (a path for the file providers) into a dataset.
    async fn load_dataset(&self, source: &str) -> Result<Dataset, LoadError>;
}

async fn read_source(source: &str) -> Result<Vec<u8>, LoadError> {
    tokio::fs::read(source)
        .await
        .map_err(|e| LoadError::Io { path: source.to_string(), source: e })
}

/// JSON array of objects, each with a `date` (`YYYY-MM-DD`) and numeric fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFileProvider;

#[async_trait]
impl DataProvider for JsonFileProvider {
    async fn load_dataset(&self, source: &str) -> Result<Dataset, LoadError> {
        let bytes = read_source(source).await?;
        let value: serde_json::Value = serde_json::from_slice(&bytes)?;
        let data = Dataset::from_json_value(&value)?;
        tracing::info!(source, records = data.len(), "dataset loaded");
        Ok(data)
    }
}

/// CSV with a header row containing a `date` column; other columns are parsed as numbers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CsvFileProvider;

impl CsvFileProvider {
    pub fn parse(bytes: &[u8]) -> Result<Dataset, LoadError> {
        let mut rdr = csv::ReaderBuilder::new().has_headers(true).from_reader(bytes);
        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect::<Vec<_>>();
        let i_date = headers.iter().position(|h| h.eq_ignore_ascii_case("date"));

        let mut records = Vec::new();
        for (index, row) in rdr.records().enumerate() {
            let row = row?;
            let raw = i_date
                .and_then(|i| row.get(i))
                .filter(|s| !s.trim().is_empty())
                .ok_or(LoadError::MissingDate { index })?;
            let mut rec = Record::parse(raw)
                .ok_or_else(|| LoadError::BadDate { index, value: raw.to_string() })?;
            for (col, cell) in row.iter().enumerate() {
                if Some(col) == i_date {
                    continue;
                }
                if let (Some(name), Ok(v)) = (headers.get(col), cell.trim().parse::<f64>()) {
                    rec = rec.with(name.as_str(), v);
                }
            }
            records.push(rec);
        }
        Dataset::new(records)
    }
}

#[async_trait]
impl DataProvider for CsvFileProvider {
    async fn load_dataset(&self, source: &str) -> Result<Dataset, LoadError> {
        let bytes = read_source(source).await?;
        let data = Self::parse(&bytes)?;
        tracing::info!(source, records = data.len(), "dataset loaded");
        Ok(data)
    }
}

/// Picks the JSON or CSV provider by file extension.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileProvider;

#[async_trait]
impl DataProvider for FileProvider {
    async fn load_dataset(&self, source: &str) -> Result<Dataset, LoadError> {
        if source.to_ascii_lowercase().ends_with(".csv") {
            CsvFileProvider.load_dataset(source).await
        } else {
            JsonFileProvider.load_dataset(source).await
        }
    }
}

/// Already-loaded dataset; `source` is ignored.
#[derive(Clone, Debug, Default)]
pub struct StaticProvider {
    pub dataset: Dataset,
}

impl StaticProvider {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl DataProvider for StaticProvider {
    async fn load_dataset(&self, _source: &str) -> Result<Dataset, LoadError> {
        Ok(self.dataset.clone())
    }
}
