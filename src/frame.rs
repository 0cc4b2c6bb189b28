//! Polars `DataFrame` export
//!
//! Hands decoded or filtered tables to columnar consumers (CSV export,
//! plotting, joins against observed series) as one frame with a unit
//! column, a date column and one nullable `f64` column per variable.

use crate::constants::{TIME_COLUMN, UNIT_COLUMN};
use crate::error::Result;
use crate::models::RecordTable;
use chrono::Datelike;
use polars::prelude::*;
use tracing::debug;

/// `num_days_from_ce` of 1970-01-01
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Build a frame with columns `RCH`, `time` and the table's variables
pub fn to_dataframe<T: RecordTable + ?Sized>(table: &T) -> Result<DataFrame> {
    let records = table.records();
    let mut columns: Vec<Column> = Vec::with_capacity(table.variables().len() + 2);

    let units: Vec<u32> = records.iter().map(|record| record.unit).collect();
    columns.push(Series::new(UNIT_COLUMN.into(), units).into());

    let days: Vec<i32> = records
        .iter()
        .map(|record| record.date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
        .collect();
    let time = Series::new(TIME_COLUMN.into(), days).cast(&DataType::Date)?;
    columns.push(time.into());

    for (index, variable) in table.variables().iter().enumerate() {
        let values: Vec<Option<f64>> = records
            .iter()
            .map(|record| record.values.get(index).copied().flatten())
            .collect();
        columns.push(Series::new(variable.as_str().into(), values).into());
    }

    let df = DataFrame::new(columns)?;
    debug!("Built frame with shape {:?}", df.shape());
    Ok(df)
}
