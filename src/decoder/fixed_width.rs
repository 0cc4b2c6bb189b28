//! Fixed-width field slicing for output report rows
//!
//! Slices are taken by character offset from the column widths of the
//! selected layout. Rows shorter than the full layout simply yield empty
//! trailing fields, which parse as missing values.

use crate::constants::VARIABLE_COLUMN_WIDTH;
use crate::models::ColumnLayout;
use chrono::NaiveDate;
use std::ops::Range;

/// Position of the time information carried by a row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowStamp {
    /// Compact layout step index (day, month or year number)
    Step(Option<f64>),
    /// Calendar layout date; `None` when year/month/day is not a real date
    Date(Option<NaiveDate>),
}

/// One parsed row before timestamps are assigned
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub unit: u32,
    pub stamp: RowStamp,
    pub values: Vec<Option<f64>>,
}

impl RawRow {
    /// Step index of a compact row
    pub fn step(&self) -> Option<f64> {
        match self.stamp {
            RowStamp::Step(step) => step,
            RowStamp::Date(_) => None,
        }
    }

    pub fn missing_values(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }
}

/// Parses report lines for one column layout
#[derive(Debug, Clone)]
pub struct RowParser {
    layout: ColumnLayout,
    leading: Vec<Range<usize>>,
    variables: Vec<Range<usize>>,
}

impl RowParser {
    pub fn new(layout: ColumnLayout, variable_count: usize) -> Self {
        let leading = column_ranges(0, layout.leading_widths());
        let variables = column_ranges(
            layout.variables_offset(),
            &vec![VARIABLE_COLUMN_WIDTH; variable_count],
        );
        Self {
            layout,
            leading,
            variables,
        }
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    /// Parse one report line; `None` when the unit id is blank or not numeric
    pub fn parse(&self, line: &str) -> Option<RawRow> {
        let leading = |index: usize| slice_field(line, &self.leading[index]);

        let unit = parse_optional_u32(leading(1))?;
        let stamp = match self.layout {
            ColumnLayout::Calendar => {
                let month = parse_optional_u32(leading(3));
                let day = parse_optional_u32(leading(4));
                let year = parse_optional_i32(leading(5));
                RowStamp::Date(match (year, month, day) {
                    (Some(year), Some(month), Some(day)) => NaiveDate::from_ymd_opt(year, month, day),
                    _ => None,
                })
            }
            ColumnLayout::Compact => RowStamp::Step(parse_optional_f64(leading(3))),
        };
        let values = self
            .variables
            .iter()
            .map(|range| parse_optional_f64(slice_field(line, range)))
            .collect();

        Some(RawRow {
            unit,
            stamp,
            values,
        })
    }
}

/// Consecutive ranges of the given widths starting at `offset`
pub fn column_ranges(offset: usize, widths: &[usize]) -> Vec<Range<usize>> {
    let mut start = offset;
    widths
        .iter()
        .map(|width| {
            let range = start..start + width;
            start += width;
            range
        })
        .collect()
}

/// Trimmed slice of `line` covering `range`, clamped to the line length
pub fn slice_field<'a>(line: &'a str, range: &Range<usize>) -> &'a str {
    let end = range.end.min(line.len());
    line.get(range.start..end).map(str::trim).unwrap_or("")
}

/// Numeric field; blank, non-numeric and NaN fields are missing
pub fn parse_optional_f64(field: &str) -> Option<f64> {
    field.parse::<f64>().ok().filter(|v| !v.is_nan())
}

pub fn parse_optional_u32(field: &str) -> Option<u32> {
    field.parse::<u32>().ok()
}

pub fn parse_optional_i32(field: &str) -> Option<i32> {
    field.parse::<i32>().ok()
}
