//! Test helpers for the output report decoder

use chrono::NaiveDate;
use tempfile::TempDir;

use crate::models::Frequency;
use crate::schedule::{ReportingSchedule, StepSchedule, date_range};
use crate::test_utils::write_report;


pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Stepped schedule covering `start..=end`
pub fn stepped(cadence: Frequency, start: NaiveDate, end: NaiveDate) -> ReportingSchedule {
    ReportingSchedule::Stepped(StepSchedule {
        cadence,
        start,
        end,
        dates: date_range(start, end, cadence),
    })
}

/// Temporary directory holding an `output.rch` with the given rows
pub fn report_dir(rows: &[String]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write_report(&temp_dir.path().join("output.rch"), rows);
    temp_dir
}
