// File: crates/responsive-chart/tests/common/mod.rs
// Purpose: Shared weather fixtures for the integration tests.
#![allow(dead_code)]

use responsive_chart::{Dataset, Record};

/// One day of weather; `None` leaves the field out of the record.
pub fn day(date: &str, dew: Option<f64>, humidity: Option<f64>, temp: Option<f64>) -> Record {
    let mut r = Record::parse(date).expect("valid fixture date");
    if let Some(v) = dew { r = r.with("dewPoint", v); }
    if let Some(v) = humidity { r = r.with("humidity", v); }
    if let Some(v) = temp { r = r.with("temperatureMax", v); }
    r
}

/// Five well-separated days, hottest last.
pub fn weather() -> Dataset {
    Dataset::new(vec![
        day("2020-01-01", Some(5.0), Some(0.2), Some(30.0)),
        day("2020-01-02", Some(20.0), Some(0.4), Some(45.0)),
        day("2020-01-03", Some(35.0), Some(0.6), Some(60.0)),
        day("2020-01-04", Some(50.0), Some(0.8), Some(75.0)),
        day("2020-01-05", Some(65.0), Some(0.95), Some(90.0)),
    ])
    .expect("unique keys")
}

pub const WEATHER_JSON: &str = r#"[
  {"date": "2020-01-01", "dewPoint": 5.0, "humidity": 0.2, "temperatureMax": 30.0, "summary": "Clear"},
  {"date": "2020-01-02", "dewPoint": 20.0, "humidity": 0.4, "temperatureMax": 45.0},
  {"date": "2020-01-03", "dewPoint": 35.0, "humidity": 0.6, "temperatureMax": 60.0}
]"#;

pub const WEATHER_CSV: &str = "date,dewPoint,humidity,temperatureMax\n\
2020-01-01,5,0.2,30\n\
2020-01-02,20,0.4,\n\
2020-01-03,35,0.6,60\n";
