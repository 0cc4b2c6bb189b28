//! Fixed-width decoder for SWAT output reports
//!
//! Turns an `output.rch` report into an [`OutputTable`] with one record per
//! reporting unit and time step.
//!
//! ## Architecture
//!
//! - [`fixed_width`] - column slicing and field parsing for both layouts
//! - [`summary`] - removal of annual summary rows and the closing run-average block
//!
//! The whole report is read before parsing: the trailing run-average block
//! can only be located once the total row count is known.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use swat_processor::cio::parse_run_config;
//! use swat_processor::decoder::decode_output;
//! use swat_processor::schedule::resolve_schedule;
//! use swat_processor::ReaderConfig;
//!
//! # fn example() -> swat_processor::Result<()> {
//! let config = ReaderConfig::default();
//! let run_config = parse_run_config(Path::new("TxtInOut/file.cio"), &config)?;
//! let schedule = resolve_schedule(&run_config)?;
//! let table = decode_output(Path::new("TxtInOut/output.rch"), &config, &schedule)?;
//! println!("{} records from {} lines", table.stats.records_decoded, table.stats.lines_read);
//! # Ok(())
//! # }
//! ```

pub mod fixed_width;
pub mod summary;

#[cfg(test)]
mod tests;

pub use fixed_width::{RawRow, RowParser, RowStamp};

use crate::config::ReaderConfig;
use crate::constants::reach_variable_labels;
use crate::error::{Result, SwatError};
use crate::models::{DecodeStats, OutputRecord, OutputTable};
use crate::schedule::{ReportingSchedule, StepSchedule};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use tracing::{debug, warn};

/// Decoder for the reports of one run
#[derive(Debug)]
pub struct OutputDecoder<'a> {
    config: &'a ReaderConfig,
    schedule: &'a ReportingSchedule,
}

/// Decode the output report at `path` with the given reporting schedule
pub fn decode_output(
    path: &Path,
    config: &ReaderConfig,
    schedule: &ReportingSchedule,
) -> Result<OutputTable> {
    OutputDecoder::new(config, schedule).decode(path)
}

impl<'a> OutputDecoder<'a> {
    pub fn new(config: &'a ReaderConfig, schedule: &'a ReportingSchedule) -> Self {
        Self { config, schedule }
    }

    /// Decode a report into a table grouped by unit
    pub fn decode(&self, path: &Path) -> Result<OutputTable> {
        debug!("Decoding output report: {}", path.display());

        let content = read_report(path)?;
        let layout = self.schedule.layout();
        let variables = reach_variable_labels();
        let parser = RowParser::new(layout, variables.len());

        let mut stats = DecodeStats::default();
        let mut rows = Vec::new();
        for line in content.lines().skip(self.config.preamble_lines) {
            if line.trim().is_empty() {
                continue;
            }
            stats.lines_read += 1;

            match parser.parse(line) {
                Some(row) => {
                    stats.missing_values += row.missing_values();
                    rows.push(row);
                }
                None => stats.rows_without_unit += 1,
            }
        }

        if stats.rows_without_unit > 0 {
            warn!(
                "Skipped {} rows without a reporting unit id in {}",
                stats.rows_without_unit,
                path.display()
            );
        }

        let records = match self.schedule {
            ReportingSchedule::Calendar => assemble_calendar(path, rows, &mut stats)?,
            ReportingSchedule::Stepped(schedule) => {
                stats.summary_rows_dropped =
                    summary::strip_summary_rows(&mut rows, schedule.cadence, self.config.step_limit);
                assemble_stepped(path, rows, schedule)?
            }
        };
        stats.records_decoded = records.len();

        debug!(
            "Decoded {} records from {} lines ({} summary rows dropped, {} missing values)",
            stats.records_decoded, stats.lines_read, stats.summary_rows_dropped, stats.missing_values
        );

        Ok(OutputTable {
            source: path.to_path_buf(),
            layout,
            cadence: self.schedule.cadence(),
            variables,
            records,
            stats,
        })
    }
}

fn read_report(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        IoErrorKind::NotFound => SwatError::OutputMissing {
            path: path.to_path_buf(),
        },
        _ => SwatError::OutputUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })
}

/// Rows take the date they carry; rows without a valid date are dropped
fn assemble_calendar(
    path: &Path,
    rows: Vec<RawRow>,
    stats: &mut DecodeStats,
) -> Result<Vec<OutputRecord>> {
    let mut seen: HashSet<(u32, NaiveDate)> = HashSet::with_capacity(rows.len());
    let mut records = Vec::with_capacity(rows.len());

    for row in rows {
        let date = match row.stamp {
            RowStamp::Date(Some(date)) => date,
            _ => {
                stats.invalid_dates += 1;
                continue;
            }
        };
        if !seen.insert((row.unit, date)) {
            return Err(SwatError::DuplicateRecord {
                path: path.to_path_buf(),
                unit: row.unit,
                date,
            });
        }
        records.push(OutputRecord {
            unit: row.unit,
            date,
            values: row.values,
        });
    }

    if stats.invalid_dates > 0 {
        warn!(
            "Dropped {} rows without a valid calendar date in {}",
            stats.invalid_dates,
            path.display()
        );
    }

    // Stable: keeps file order within each unit
    records.sort_by_key(|record| record.unit);
    Ok(records)
}

/// Each unit's rows, in file order, take the schedule's dates one by one
fn assemble_stepped(
    path: &Path,
    rows: Vec<RawRow>,
    schedule: &StepSchedule,
) -> Result<Vec<OutputRecord>> {
    let mut by_unit: BTreeMap<u32, Vec<Vec<Option<f64>>>> = BTreeMap::new();
    for row in rows {
        by_unit.entry(row.unit).or_default().push(row.values);
    }

    let mut records = Vec::with_capacity(by_unit.len() * schedule.dates.len());
    for (unit, unit_rows) in by_unit {
        if unit_rows.len() != schedule.dates.len() {
            return Err(SwatError::ScheduleMismatch {
                path: path.to_path_buf(),
                unit,
                expected: schedule.dates.len(),
                found: unit_rows.len(),
            });
        }
        records.extend(
            schedule
                .dates
                .iter()
                .zip(unit_rows)
                .map(|(&date, values)| OutputRecord { unit, date, values }),
        );
    }

    Ok(records)
}
