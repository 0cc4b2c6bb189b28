//! Run-directory fixtures shared by integration tests and benchmarks
//!
//! Row and `file.cio` builders come from the crate's unit-test fixtures so
//! both suites write identical run directories.

#![allow(dead_code)]

#[path = "../../src/test_utils.rs"]
mod fixtures;

pub(crate) use fixtures::{calendar_line, compact_line, write_run};

use chrono::{Datelike, NaiveDate};

/// Daily flow written for a unit: `FLOW_IN` then `FLOW_OUT`
pub fn flows(unit: u32, date: NaiveDate) -> [f64; 2] {
    let flow_out = f64::from(unit) * 10.0 + f64::from(date.day());
    [flow_out + 0.5, flow_out]
}

/// Compact daily report rows with an annual summary row per unit at each year end
pub fn daily_compact_rows(units: &[u32], start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let mut rows = Vec::new();
    for date in start.iter_days().take_while(|date| *date <= end) {
        for &unit in units {
            rows.push(compact_line(unit, f64::from(date.ordinal()), &flows(unit, date)));
        }
        if date.month() == 12 && date.day() == 31 {
            for &unit in units {
                rows.push(compact_line(unit, f64::from(date.year()), &[0.0, 0.0]));
            }
        }
    }
    rows
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
