// File: crates/responsive-chart/tests/providers.rs
// Purpose: Dataset parsing and the async JSON/CSV/static providers.

mod common;

use responsive_chart::provider::CsvFileProvider;
use responsive_chart::{
    ChartConfig, DataProvider, Dataset, Encodings, FileProvider, JsonFileProvider, LoadError, RecordKey,
    ScatterChart, Scene, StaticProvider,
};

#[test]
fn json_records_keep_numeric_fields() {
    let data = Dataset::from_json_str(common::WEATHER_JSON).expect("parse");
    assert_eq!(data.len(), 3);
    let first = data.get(&RecordKey::from("2020-01-01")).expect("record");
    assert_eq!(first.get("dewPoint"), Some(5.0));
    assert_eq!(first.get("summary"), None);
    assert_eq!(first.date().to_string(), "2020-01-01");
}

#[test]
fn malformed_payloads_are_load_errors() {
    assert!(matches!(Dataset::from_json_str("{\"date\": \"2020-01-01\"}"), Err(LoadError::NotAnArray)));
    assert!(matches!(Dataset::from_json_str("[{\"humidity\": 1}]"), Err(LoadError::MissingDate { index: 0 })));
    assert!(matches!(
        Dataset::from_json_str("[{\"date\": \"2020-01-01\"}, {\"date\": \"01/02/2020\"}]"),
        Err(LoadError::BadDate { index: 1, .. })
    ));
    assert!(matches!(Dataset::from_json_str("[{"), Err(LoadError::Json(_))));
    assert!(matches!(
        Dataset::from_json_str("[{\"date\": \"2020-01-01\"}, {\"date\": \"2020-01-01\"}]"),
        Err(LoadError::DuplicateKey(_))
    ));
}

#[test]
fn csv_leaves_blank_cells_missing() {
    let data = CsvFileProvider::parse(common::WEATHER_CSV.as_bytes()).expect("parse");
    assert_eq!(data.len(), 3);
    let second = data.get(&RecordKey::from("2020-01-02")).expect("record");
    assert_eq!(second.get("humidity"), Some(0.4));
    assert_eq!(second.get("temperatureMax"), None);
    assert!(matches!(
        CsvFileProvider::parse(b"humidity\n0.5\n"),
        Err(LoadError::MissingDate { index: 0 })
    ));
}

#[tokio::test]
async fn file_provider_dispatches_on_extension() {
    let dir = tempfile::tempdir().expect("tempdir");
    let json = dir.path().join("weather.json");
    let csv = dir.path().join("weather.CSV");
    std::fs::write(&json, common::WEATHER_JSON).expect("write json");
    std::fs::write(&csv, common::WEATHER_CSV).expect("write csv");

    let from_json = FileProvider.load_dataset(json.to_str().expect("utf-8 path")).await.expect("json");
    let from_csv = FileProvider.load_dataset(csv.to_str().expect("utf-8 path")).await.expect("csv");
    assert_eq!(from_json.len(), 3);
    assert_eq!(from_csv.len(), 3);
}

#[tokio::test]
async fn missing_file_is_an_io_error() {
    let err = JsonFileProvider.load_dataset("/definitely/not/here.json").await;
    assert!(matches!(err, Err(LoadError::Io { .. })));
}

#[tokio::test]
async fn chart_loads_through_a_provider() {
    let provider = StaticProvider::new(common::weather());
    let mut scene = Scene::new();
    let chart = ScatterChart::load(&provider, "ignored", Encodings::default(), ChartConfig::default(), &mut scene)
        .await
        .expect("chart");
    assert_eq!(chart.dataset().len(), 5);
    // Nothing is drawn before the first resize.
    assert!(chart.marks().is_empty());
}
