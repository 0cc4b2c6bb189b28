//! Selection, projection and resampling of decoded tables
//!
//! - [`aggregation`] - per-bin aggregation functions
//! - [`resample`] - calendar-aligned binning per reporting unit
//!
//! [`filter_table`] is pure: it never mutates its input and its output is
//! always sorted by unit then timestamp, whatever the row order of the input.

pub mod aggregation;
pub mod resample;

#[cfg(test)]
mod tests;

use crate::error::{Result, SwatError};
use crate::models::{FilterSpec, FilteredTable, OutputRecord, RecordTable};
use tracing::debug;

/// Apply a filter request to a decoded or already filtered table
pub fn filter_table<T: RecordTable + ?Sized>(table: &T, spec: &FilterSpec) -> Result<FilteredTable> {
    let aggregations = spec.resolved_aggregations()?;
    let columns = resolve_columns(table, &spec.variables)?;

    let mut records: Vec<OutputRecord> = table
        .records()
        .iter()
        .filter(|record| spec.units.contains(&record.unit))
        .map(|record| OutputRecord {
            unit: record.unit,
            date: record.date,
            values: columns
                .iter()
                .map(|&column| record.values.get(column).copied().flatten())
                .collect(),
        })
        .collect();
    records.sort_by_key(|record| (record.unit, record.date));

    // Rows already binned at the requested frequency hold one value per bin
    let records = match spec.frequency {
        Some(frequency) if table.frequency() != Some(frequency) => {
            resample::resample(&records, frequency, &aggregations)
        }
        _ => records,
    };

    debug!(
        "Filtered {} of {} records ({} units, {} variables)",
        records.len(),
        table.len(),
        spec.units.len(),
        spec.variables.len()
    );

    Ok(FilteredTable {
        variables: spec.variables.clone(),
        frequency: spec.frequency.or(table.frequency()),
        records,
    })
}

/// Column index of every requested variable
fn resolve_columns<T: RecordTable + ?Sized>(table: &T, variables: &[String]) -> Result<Vec<usize>> {
    variables
        .iter()
        .map(|variable| {
            table.variable_index(variable).ok_or_else(|| {
                SwatError::spec(format!(
                    "unknown variable '{variable}' (table has {})",
                    table.variables().join(", ")
                ))
            })
        })
        .collect()
}
