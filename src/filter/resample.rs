//! Calendar-aligned resampling of per-unit series
//!
//! Bins are labelled with their period end (the day itself, the month end or
//! 31 December). Every bin between a unit's first and last observation is
//! emitted, including bins without observations.

use crate::models::{Aggregation, Frequency, OutputRecord};
use chrono::NaiveDate;

/// Resample records sorted by `(unit, date)`, one aggregation per column
pub fn resample(
    records: &[OutputRecord],
    frequency: Frequency,
    aggregations: &[Aggregation],
) -> Vec<OutputRecord> {
    let mut resampled = Vec::new();

    for unit_records in records.chunk_by(|a, b| a.unit == b.unit) {
        let (Some(first), Some(last)) = (unit_records.first(), unit_records.last()) else {
            continue;
        };
        let (Some(mut bin), Some(last_bin)) = (
            frequency.period_end(first.date),
            frequency.period_end(last.date),
        ) else {
            continue;
        };

        let mut rest = unit_records;
        loop {
            let split = rest
                .iter()
                .position(|record| record.date > bin)
                .unwrap_or(rest.len());
            let (in_bin, tail) = rest.split_at(split);
            resampled.push(aggregate_bin(first.unit, bin, in_bin, aggregations));
            rest = tail;

            if bin >= last_bin {
                break;
            }
            match frequency.next_period_end(bin) {
                Some(next) => bin = next,
                None => break,
            }
        }
    }

    resampled
}

fn aggregate_bin(
    unit: u32,
    bin: NaiveDate,
    records: &[OutputRecord],
    aggregations: &[Aggregation],
) -> OutputRecord {
    let values = aggregations
        .iter()
        .enumerate()
        .map(|(column, aggregation)| {
            let column_values: Vec<Option<f64>> = records
                .iter()
                .map(|record| record.values.get(column).copied().flatten())
                .collect();
            aggregation.apply(&column_values)
        })
        .collect();

    OutputRecord {
        unit,
        date: bin,
        values,
    }
}
