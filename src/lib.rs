//! SWAT Output Processor Library
//!
//! A Rust library for decoding the fixed-width output reports of SWAT2012
//! watershed model runs into dated, per-unit tables.
//!
//! This library provides tools for:
//! - Parsing the line-indexed run configuration (`file.cio`)
//! - Reconstructing the reporting calendar from the simulation window and print cadence
//! - Decoding `output.rch` in both the calendar and the compact column layout
//! - Removing annual summary rows and the closing run-average block
//! - Selecting units and variables, and resampling with per-variable aggregations
//! - Converting flow units and exporting to Polars DataFrames
//!
//! ## Usage
//!
//! ```rust,no_run
//! use swat_processor::{Aggregation, FilterSpec, Frequency, ReaderConfig, SwatReader};
//!
//! # fn example() -> swat_processor::Result<()> {
//! let reader = SwatReader::open("TxtInOut", ReaderConfig::default())?;
//! let spec = FilterSpec::new([1, 2], ["FLOW_OUT"])
//!     .resample(Frequency::Monthly, [Aggregation::Mean]);
//! let monthly = reader.filter(&spec)?;
//! let df = swat_processor::frame::to_dataframe(&monthly)?;
//! println!("{df}");
//! # Ok(())
//! # }
//! ```

pub mod cio;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod discovery;
pub mod error;
pub mod filter;
pub mod frame;
pub mod logging;
pub mod models;
pub mod reader;
pub mod schedule;
pub mod units;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use cio::RunConfig;
pub use config::ReaderConfig;
pub use error::{ErrorKind, Result, SwatError};
pub use filter::filter_table;
pub use models::{
    Aggregation, ColumnLayout, DecodeStats, FilterSpec, FilteredTable, Frequency, OutputRecord,
    OutputTable, RecordTable,
};
pub use reader::SwatReader;
pub use schedule::ReportingSchedule;
pub use units::{FlowConversion, TimeUnit, VolumeUnit};
