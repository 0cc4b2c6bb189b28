//! Summary row removal for compact reports
//!
//! Compact reports interleave rows that are not time steps: annual totals
//! carrying the year in the step column, and for monthly runs a closing
//! block of run averages with one row per unit.

use super::fixed_width::RawRow;
use crate::models::Frequency;
use std::collections::BTreeSet;
use tracing::debug;

/// Remove summary rows for the given cadence, returning how many were dropped
pub fn strip_summary_rows(rows: &mut Vec<RawRow>, cadence: Frequency, step_limit: f64) -> usize {
    match cadence {
        // Annual rows carry the year as their step index
        Frequency::Annual => 0,
        Frequency::Daily => drop_rows_past_step_limit(rows, step_limit),
        Frequency::Monthly => {
            drop_rows_past_step_limit(rows, step_limit) + drop_trailing_block(rows)
        }
    }
}

/// Drop rows whose step index exceeds `step_limit` or is missing
pub fn drop_rows_past_step_limit(rows: &mut Vec<RawRow>, step_limit: f64) -> usize {
    let before = rows.len();
    rows.retain(|row| row.step().is_some_and(|step| step <= step_limit));
    let dropped = before - rows.len();
    if dropped > 0 {
        debug!("Dropped {} rows with step index above {}", dropped, step_limit);
    }
    dropped
}

/// Drop the closing block of one row per reporting unit
pub fn drop_trailing_block(rows: &mut Vec<RawRow>) -> usize {
    let unit_count = rows.iter().map(|row| row.unit).collect::<BTreeSet<_>>().len();
    let keep = rows.len().saturating_sub(unit_count);
    rows.truncate(keep);
    debug!("Dropped trailing block of {} run-average rows", unit_count);
    unit_count
}
