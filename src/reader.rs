//! Decode sessions over one SWAT run directory (`TxtInOut`)

use crate::cio::{RunConfig, parse_run_config};
use crate::config::ReaderConfig;
use crate::decoder::decode_output;
use crate::discovery::count_subbasins;
use crate::error::Result;
use crate::filter::filter_table;
use crate::models::{FilterSpec, FilteredTable, OutputTable, RecordTable};
use crate::schedule::{ReportingSchedule, resolve_schedule};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A run directory with its parsed configuration and reporting schedule
///
/// Opening a reader parses `file.cio` and resolves the reporting calendar;
/// the output report itself is decoded on demand.
#[derive(Debug, Clone)]
pub struct SwatReader {
    run_dir: PathBuf,
    config: ReaderConfig,
    run_config: RunConfig,
    schedule: ReportingSchedule,
}

impl SwatReader {
    pub fn open(run_dir: impl AsRef<Path>, config: ReaderConfig) -> Result<Self> {
        let run_dir = run_dir.as_ref().to_path_buf();
        let run_config = parse_run_config(&run_dir.join(&config.cio_file), &config)?;
        let schedule = resolve_schedule(&run_config)?;

        info!(
            "Opened SWAT run {} ({:?} layout, {} steps per unit)",
            run_dir.display(),
            schedule.layout(),
            schedule.dates().len()
        );

        Ok(Self {
            run_dir,
            config,
            run_config,
            schedule,
        })
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }

    pub fn schedule(&self) -> &ReportingSchedule {
        &self.schedule
    }

    /// Path of the output report this session decodes
    pub fn output_path(&self) -> PathBuf {
        self.run_dir.join(&self.config.output_file)
    }

    /// Number of subbasin input files in the run directory
    pub fn subbasin_count(&self) -> Result<usize> {
        count_subbasins(&self.run_dir)
    }

    /// Decode the output report
    pub fn read_output(&self) -> Result<OutputTable> {
        let table = decode_output(&self.output_path(), &self.config, &self.schedule)?;

        let unit_count = table.units().len();
        match self.subbasin_count() {
            Ok(0) => {}
            Ok(subbasins) if subbasins != unit_count => warn!(
                "Decoded {} reporting units but found {} subbasin files in {}",
                unit_count,
                subbasins,
                self.run_dir.display()
            ),
            Ok(_) => {}
            Err(e) => warn!("Could not count subbasin files: {}", e),
        }

        info!(
            "Read {} records for {} units from {}",
            table.len(),
            unit_count,
            table.source.display()
        );
        Ok(table)
    }

    /// Decode the output report and apply a filter request
    pub fn filter(&self, spec: &FilterSpec) -> Result<FilteredTable> {
        spec.resolved_aggregations()?;
        filter_table(&self.read_output()?, spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, SwatError};
    use crate::models::{Aggregation, Frequency};
    use crate::test_utils::{compact_line, write_run};
    use chrono::NaiveDate;
    use std::fs;
    use tempfile::TempDir;

    fn monthly_run(units: &[u32]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        let mut rows = Vec::new();
        for year in 0..2i32 {
            for month in 1..=12 {
                for &unit in units {
                    rows.push(compact_line(unit, f64::from(month), &[1.0, f64::from(year * 12 + month)]));
                }
            }
            for &unit in units {
                rows.push(compact_line(unit, f64::from(1992 + year), &[12.0, 0.0]));
            }
        }
        for &unit in units {
            rows.push(compact_line(unit, 2.0, &[12.0, 0.0]));
        }
        write_run(
            temp_dir.path(),
            &[("IPRINT", "0"), ("NBYR", "4"), ("NYSKIP", "2")],
            &rows,
        );
        temp_dir
    }

    #[test]
    fn test_open_and_read_monthly_run() {
        let temp_dir = monthly_run(&[1, 2]);
        let reader = SwatReader::open(temp_dir.path(), ReaderConfig::default()).unwrap();

        assert_eq!(reader.schedule().cadence(), Some(Frequency::Monthly));
        assert_eq!(reader.schedule().dates().len(), 24);
        assert_eq!(reader.run_config().get("IYR"), Some("1990"));

        let table = reader.read_output().unwrap();
        assert_eq!(table.records.len(), 48);
        assert_eq!(table.stats.summary_rows_dropped, 6);
        let date = NaiveDate::from_ymd_opt(1993, 12, 31).unwrap();
        assert_eq!(table.value(2, date, "FLOW_OUT"), Some(24.0));
    }

    #[test]
    fn test_filter_through_reader() {
        let temp_dir = monthly_run(&[1, 2, 3]);
        let reader = SwatReader::open(temp_dir.path(), ReaderConfig::default()).unwrap();

        let spec = FilterSpec::new([3], ["FLOW_OUT"]).resample(Frequency::Annual, [Aggregation::Sum]);
        let filtered = reader.filter(&spec).unwrap();

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.records[0].values[0], Some((1..=12).sum::<i32>() as f64));
        assert_eq!(filtered.records[1].values[0], Some((13..=24).sum::<i32>() as f64));
    }

    #[test]
    fn test_missing_output_report() {
        let temp_dir = monthly_run(&[1]);
        fs::remove_file(temp_dir.path().join("output.rch")).unwrap();
        let reader = SwatReader::open(temp_dir.path(), ReaderConfig::default()).unwrap();

        let err = reader.read_output().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(err.to_string().contains("output.rch"));
    }

    #[test]
    fn test_missing_run_configuration() {
        let temp_dir = TempDir::new().unwrap();
        let err = SwatReader::open(temp_dir.path(), ReaderConfig::default()).unwrap_err();
        assert!(matches!(err, SwatError::ConfigUnreadable { .. }));
    }

    #[test]
    fn test_subbasin_count() {
        let temp_dir = monthly_run(&[1, 2]);
        fs::write(temp_dir.path().join("000010000.sub"), "").unwrap();
        fs::write(temp_dir.path().join("output.sub"), "").unwrap();
        let reader = SwatReader::open(temp_dir.path(), ReaderConfig::default()).unwrap();

        assert_eq!(reader.subbasin_count().unwrap(), 1);
        // A disagreement is only logged
        assert!(reader.read_output().is_ok());
    }
}
