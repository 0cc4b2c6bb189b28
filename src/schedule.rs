//! Reporting calendar reconstruction.
//!
//! Calendar reports embed year/month/day in every row, so resolving them only
//! selects the calendar column layout. Compact reports carry a bare step
//! index; their timestamps come from the simulation window in `file.cio`
//! (start year, warm-up years, first/last julian day) stepped at the print
//! cadence.

use crate::cio::RunConfig;
use crate::constants::cio_keys;
use crate::error::Result;
use crate::models::{ColumnLayout, Frequency};
use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

/// Timestamps for the rows of one reporting unit
#[derive(Debug, Clone, PartialEq)]
pub enum ReportingSchedule {
    /// Dates are read from each row
    Calendar,
    /// Dates are generated from the run configuration
    Stepped(StepSchedule),
}

/// Generated schedule for compact reports
#[derive(Debug, Clone, PartialEq)]
pub struct StepSchedule {
    pub cadence: Frequency,
    /// First simulated day after the warm-up period
    pub start: NaiveDate,
    /// Last simulated day, after the annual re-anchoring
    pub end: NaiveDate,
    /// One timestamp per step, monotonically increasing
    pub dates: Vec<NaiveDate>,
}

impl ReportingSchedule {
    pub fn layout(&self) -> ColumnLayout {
        match self {
            ReportingSchedule::Calendar => ColumnLayout::Calendar,
            ReportingSchedule::Stepped(_) => ColumnLayout::Compact,
        }
    }

    pub fn cadence(&self) -> Option<Frequency> {
        match self {
            ReportingSchedule::Calendar => None,
            ReportingSchedule::Stepped(schedule) => Some(schedule.cadence),
        }
    }

    /// Generated timestamps; empty for calendar reports
    pub fn dates(&self) -> &[NaiveDate] {
        match self {
            ReportingSchedule::Calendar => &[],
            ReportingSchedule::Stepped(schedule) => &schedule.dates,
        }
    }
}

/// Resolve the column layout and reporting calendar of a run
pub fn resolve_schedule(run_config: &RunConfig) -> Result<ReportingSchedule> {
    if run_config.calendar_mode()? {
        debug!("Calendar flag set, dates are read from each row");
        return Ok(ReportingSchedule::Calendar);
    }

    let cadence = Frequency::from_print_code(run_config.require(cio_keys::PRINT_FREQUENCY)?)?;
    let (start, end) = simulation_window(run_config, cadence)?;
    let dates = date_range(start, end, cadence);

    debug!(
        "Resolved {} schedule {} .. {} with {} steps",
        cadence,
        start,
        end,
        dates.len()
    );

    Ok(ReportingSchedule::Stepped(StepSchedule {
        cadence,
        start,
        end,
        dates,
    }))
}

/// First and last printed day of a run
///
/// The start is 1 January of the first year after warm-up, offset by the
/// first julian day; the offset applies even without warm-up years. The end
/// is 1 January of the last simulated year offset by the last julian day.
/// Annual reports whose end does not fall on 31 December end on 31 December
/// of the year before the last simulated year instead.
pub fn simulation_window(run_config: &RunConfig, cadence: Frequency) -> Result<(NaiveDate, NaiveDate)> {
    let start_year = run_config.require_int(cio_keys::START_YEAR)?;
    let simulated_years = run_config.require_int(cio_keys::SIMULATED_YEARS)?;
    let warmup_years = run_config.require_int(cio_keys::WARMUP_YEARS)?;
    let first_day = julian_day(run_config, cio_keys::FIRST_DAY)?;
    let last_day = julian_day(run_config, cio_keys::LAST_DAY)?;

    if simulated_years < 1 {
        return Err(run_config.invalid(
            cio_keys::SIMULATED_YEARS,
            format!("expected at least 1 simulated year, found {simulated_years}"),
        ));
    }
    if warmup_years < 0 {
        return Err(run_config.invalid(
            cio_keys::WARMUP_YEARS,
            format!("expected a non-negative number of warm-up years, found {warmup_years}"),
        ));
    }

    let first_year = shift_year(run_config, start_year, warmup_years)?;
    let last_year = shift_year(run_config, start_year, simulated_years - 1)?;

    let start = offset_from_new_year(run_config, cio_keys::WARMUP_YEARS, first_year, first_day)?;
    let mut end = offset_from_new_year(run_config, cio_keys::SIMULATED_YEARS, last_year, last_day)?;

    if cadence == Frequency::Annual && !(end.month() == 12 && end.day() == 31) {
        let anchored_year = shift_year(run_config, start_year, simulated_years - 2)?;
        let anchored = NaiveDate::from_ymd_opt(anchored_year, 12, 31).ok_or_else(|| {
            run_config.invalid(
                cio_keys::SIMULATED_YEARS,
                format!("year {anchored_year} is out of range"),
            )
        })?;
        debug!("Annual window end {} re-anchored to {}", end, anchored);
        end = anchored;
    }

    if end < start {
        return Err(run_config.invalid(
            cio_keys::WARMUP_YEARS,
            format!("printed window is empty: starts {start}, ends {end}"),
        ));
    }

    Ok((start, end))
}

/// Closed range of period ends from `start` to `end` at `cadence`
pub fn date_range(start: NaiveDate, end: NaiveDate, cadence: Frequency) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = cadence.period_end(start);
    while let Some(date) = current {
        if date > end {
            break;
        }
        dates.push(date);
        current = cadence.next_period_end(date);
    }
    dates
}

fn julian_day(run_config: &RunConfig, key: &str) -> Result<u32> {
    let day = run_config.require_int(key)?;
    if !(1..=366).contains(&day) {
        return Err(run_config.invalid(key, format!("expected a julian day in 1..=366, found {day}")));
    }
    Ok(day as u32)
}

fn shift_year(run_config: &RunConfig, start_year: i32, years: i32) -> Result<i32> {
    start_year.checked_add(years).ok_or_else(|| {
        run_config.invalid(
            cio_keys::START_YEAR,
            format!("year {start_year} shifted by {years} years is out of range"),
        )
    })
}

fn offset_from_new_year(run_config: &RunConfig, key: &str, year: i32, julian_day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .and_then(|new_year| new_year.checked_add_days(Days::new(u64::from(julian_day - 1))))
        .ok_or_else(|| run_config.invalid(key, format!("year {year} day {julian_day} is out of range")))
}
