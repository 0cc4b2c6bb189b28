//! Test helpers for table filtering

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::models::{ColumnLayout, DecodeStats, Frequency, OutputRecord, OutputTable};
use crate::schedule::date_range;


pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily value for a unit: distinct per unit, varying through the year
pub fn daily_flow(unit: u32, date: NaiveDate) -> f64 {
    use chrono::Datelike;
    f64::from(unit) * 100.0 + f64::from(date.ordinal()) / 10.0
}

/// Daily table with `FLOW_INcms`, `FLOW_OUTcms` and `EVAPcms` columns
pub fn daily_table(units: &[u32], start: NaiveDate, end: NaiveDate) -> OutputTable {
    let dates = date_range(start, end, Frequency::Daily);
    let records = units
        .iter()
        .flat_map(|&unit| {
            dates.iter().map(move |&date| {
                let flow = daily_flow(unit, date);
                OutputRecord {
                    unit,
                    date,
                    values: vec![Some(flow + 1.0), Some(flow), Some(0.5)],
                }
            })
        })
        .collect();

    OutputTable {
        source: PathBuf::from("output.rch"),
        layout: ColumnLayout::Compact,
        cadence: Some(Frequency::Daily),
        variables: vec![
            "FLOW_INcms".to_string(),
            "FLOW_OUTcms".to_string(),
            "EVAPcms".to_string(),
        ],
        records,
        stats: DecodeStats::default(),
    }
}

pub fn record(unit: u32, date: NaiveDate, values: &[Option<f64>]) -> OutputRecord {
    OutputRecord {
        unit,
        date,
        values: values.to_vec(),
    }
}

pub fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value should be present");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
