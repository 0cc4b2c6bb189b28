//! Core data structures and types for SWAT output processing.
//!
//! Defines reporting cadences, column layouts, aggregation functions, the
//! decoded output table and the filter request/result types used
//! throughout the library.

use crate::constants::{
    CALENDAR_LEADING_COLUMNS, CALENDAR_LEADING_WIDTHS, COMPACT_LEADING_COLUMNS,
    COMPACT_LEADING_WIDTHS, reach_variable_base_name,
};
use crate::error::{Result, SwatError};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Reporting cadence of an output report, also used as a resample frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Monthly,
    Annual,
}

impl Frequency {
    /// Map a `file.cio` print code to a cadence
    pub fn from_print_code(code: &str) -> Result<Self> {
        match code.trim() {
            "0" => Ok(Frequency::Monthly),
            "1" => Ok(Frequency::Daily),
            "2" => Ok(Frequency::Annual),
            other => Err(SwatError::UnsupportedCadence {
                code: other.to_string(),
            }),
        }
    }

    /// Last day of the period containing `date`
    pub fn period_end(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Daily => Some(date),
            Frequency::Monthly => month_end(date.year(), date.month()),
            Frequency::Annual => NaiveDate::from_ymd_opt(date.year(), 12, 31),
        }
    }

    /// Period end following the period that ends on `period_end`
    pub fn next_period_end(&self, period_end: NaiveDate) -> Option<NaiveDate> {
        let next_day = period_end.succ_opt()?;
        self.period_end(next_day)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Daily => "daily",
            Frequency::Monthly => "monthly",
            Frequency::Annual => "annual",
        };
        f.write_str(name)
    }
}

impl FromStr for Frequency {
    type Err = SwatError;

    /// Accepts long names and offset aliases (`D`, `M`/`ME`, `A`/`Y`/`YE`)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "d" | "day" | "daily" => Ok(Frequency::Daily),
            "m" | "me" | "month" | "monthly" => Ok(Frequency::Monthly),
            "a" | "y" | "ye" | "year" | "yearly" | "annual" => Ok(Frequency::Annual),
            other => Err(SwatError::spec(format!(
                "unknown resample frequency '{other}' (expected daily, monthly or annual)"
            ))),
        }
    }
}

fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// Aggregation applied to one variable when resampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Mean,
    Std,
    Sem,
    Max,
    Min,
    Median,
    First,
    Last,
}

impl Aggregation {
    pub const ALL: [Aggregation; 9] = [
        Aggregation::Sum,
        Aggregation::Mean,
        Aggregation::Std,
        Aggregation::Sem,
        Aggregation::Max,
        Aggregation::Min,
        Aggregation::Median,
        Aggregation::First,
        Aggregation::Last,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Aggregation::Sum => "sum",
            Aggregation::Mean => "mean",
            Aggregation::Std => "std",
            Aggregation::Sem => "sem",
            Aggregation::Max => "max",
            Aggregation::Min => "min",
            Aggregation::Median => "median",
            Aggregation::First => "first",
            Aggregation::Last => "last",
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Aggregation {
    type Err = SwatError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Aggregation::ALL
            .into_iter()
            .find(|aggregation| aggregation.name() == wanted)
            .ok_or_else(|| {
                SwatError::spec(format!(
                    "unknown aggregation '{}' (expected one of sum, mean, std, sem, max, min, median, first, last)",
                    s.trim()
                ))
            })
    }
}

/// Column layout of an output report, selected by the calendar flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnLayout {
    /// TYPE RCH GIS MO DA YR AREAkm2, dates embedded per row
    Calendar,
    /// TYPE RCH GIS MON AREAkm2, dates reconstructed from the schedule
    Compact,
}

impl ColumnLayout {
    pub fn leading_columns(&self) -> &'static [&'static str] {
        match self {
            ColumnLayout::Calendar => CALENDAR_LEADING_COLUMNS,
            ColumnLayout::Compact => COMPACT_LEADING_COLUMNS,
        }
    }

    pub fn leading_widths(&self) -> &'static [usize] {
        match self {
            ColumnLayout::Calendar => CALENDAR_LEADING_WIDTHS,
            ColumnLayout::Compact => COMPACT_LEADING_WIDTHS,
        }
    }

    /// Character offset of the first variable column
    pub fn variables_offset(&self) -> usize {
        self.leading_widths().iter().sum()
    }
}

/// One decoded row: reporting unit, timestamp and variable values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub unit: u32,
    pub date: NaiveDate,
    /// Values in the owning table's variable order; `None` marks a missing value
    pub values: Vec<Option<f64>>,
}

/// Counters collected while decoding an output report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Non-blank lines after the preamble
    pub lines_read: usize,
    /// Records kept in the table
    pub records_decoded: usize,
    /// Compact summary rows removed (step limit, trailing block)
    pub summary_rows_dropped: usize,
    /// Rows skipped because the unit id was blank or not numeric
    pub rows_without_unit: usize,
    /// Calendar rows whose year/month/day is not a real date
    pub invalid_dates: usize,
    /// Variable fields that were blank or not numeric
    pub missing_values: usize,
}

/// Read access shared by decoded and filtered tables
pub trait RecordTable {
    /// Variable column names in value order
    fn variables(&self) -> &[String];

    /// Records in table order
    fn records(&self) -> &[OutputRecord];

    /// Frequency the records were resampled to; `None` for raw report rows
    fn frequency(&self) -> Option<Frequency> {
        None
    }

    /// Column index of a variable, by exact label or by reach base name
    fn variable_index(&self, name: &str) -> Option<usize> {
        let variables = self.variables();
        variables.iter().position(|v| v == name).or_else(|| {
            let wanted = reach_variable_base_name(name)?;
            variables
                .iter()
                .position(|v| reach_variable_base_name(v) == Some(wanted))
        })
    }

    /// Distinct reporting units present
    fn units(&self) -> BTreeSet<u32> {
        self.records().iter().map(|r| r.unit).collect()
    }

    /// Record for a `(unit, date)` key
    fn get(&self, unit: u32, date: NaiveDate) -> Option<&OutputRecord> {
        self.records()
            .iter()
            .find(|r| r.unit == unit && r.date == date)
    }

    /// Single value for a `(unit, date, variable)` key
    fn value(&self, unit: u32, date: NaiveDate, variable: &str) -> Option<f64> {
        let index = self.variable_index(variable)?;
        self.get(unit, date)?.values.get(index).copied().flatten()
    }

    /// Records of one unit in table order
    fn records_for_unit(&self, unit: u32) -> Vec<&OutputRecord> {
        self.records().iter().filter(|r| r.unit == unit).collect()
    }

    fn len(&self) -> usize {
        self.records().len()
    }

    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// Full decoded output report, grouped by unit
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable {
    /// Report the table was decoded from
    pub source: PathBuf,
    pub layout: ColumnLayout,
    /// Cadence of the rows; `None` for calendar reports
    pub cadence: Option<Frequency>,
    pub variables: Vec<String>,
    pub records: Vec<OutputRecord>,
    pub stats: DecodeStats,
}

impl RecordTable for OutputTable {
    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn records(&self) -> &[OutputRecord] {
        &self.records
    }
}

/// Query over an [`OutputTable`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub units: BTreeSet<u32>,
    pub variables: Vec<String>,
    pub frequency: Option<Frequency>,
    /// One function for all variables, or one per variable
    pub aggregations: Vec<Aggregation>,
}

impl FilterSpec {
    pub fn new<U, V, S>(units: U, variables: V) -> Self
    where
        U: IntoIterator<Item = u32>,
        V: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            units: units.into_iter().collect(),
            variables: variables.into_iter().map(Into::into).collect(),
            frequency: None,
            aggregations: Vec::new(),
        }
    }

    /// Resample to `frequency` with the given aggregation functions
    pub fn resample(
        mut self,
        frequency: Frequency,
        aggregations: impl IntoIterator<Item = Aggregation>,
    ) -> Self {
        self.frequency = Some(frequency);
        self.aggregations = aggregations.into_iter().collect();
        self
    }

    /// One aggregation per variable, broadcasting a single function.
    ///
    /// Fails when the arity is neither 1 nor the number of variables, or when
    /// a frequency and aggregations are not given together.
    pub fn resolved_aggregations(&self) -> Result<Vec<Aggregation>> {
        match (self.frequency, self.aggregations.len()) {
            (None, 0) => Ok(Vec::new()),
            (None, n) => Err(SwatError::spec(format!(
                "{n} aggregation function(s) given without a resample frequency"
            ))),
            (Some(frequency), 0) => Err(SwatError::spec(format!(
                "resample frequency '{frequency}' given without an aggregation function"
            ))),
            (Some(_), 1) => Ok(vec![self.aggregations[0]; self.variables.len()]),
            (Some(_), n) if n == self.variables.len() => Ok(self.aggregations.clone()),
            (Some(_), n) => Err(SwatError::spec(format!(
                "expected 1 or {} aggregation functions, found {n}",
                self.variables.len()
            ))),
        }
    }
}

/// Result of filtering an output table, sorted by unit then timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    pub variables: Vec<String>,
    /// Resample frequency the rows were aggregated to, if any
    pub frequency: Option<Frequency>,
    pub records: Vec<OutputRecord>,
}

impl RecordTable for FilteredTable {
    fn variables(&self) -> &[String] {
        &self.variables
    }

    fn records(&self) -> &[OutputRecord] {
        &self.records
    }

    fn frequency(&self) -> Option<Frequency> {
        self.frequency
    }
}
