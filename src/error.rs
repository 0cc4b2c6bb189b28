//! Error handling for SWAT output decoding.
//!
//! Provides error types with context for run-configuration parsing,
//! reporting-schedule resolution, fixed-width decoding and table filtering
//! failures.

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SwatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Configuration error in {path} (key '{key}'): {message}")]
    Configuration {
        path: PathBuf,
        key: String,
        message: String,
    },

    #[error("Run configuration could not be read: {path} - {source}")]
    ConfigUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed configuration line {line} in {path}: {reason}")]
    Format {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Output file missing or run incomplete: {path}")]
    OutputMissing { path: PathBuf },

    #[error("Output file could not be read: {path} - {source}")]
    OutputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Reporting schedule mismatch in {path}: unit {unit} expected {expected} rows, found {found}"
    )]
    ScheduleMismatch {
        path: PathBuf,
        unit: u32,
        expected: usize,
        found: usize,
    },

    #[error("Duplicate record in {path}: unit {unit} at {date}")]
    DuplicateRecord {
        path: PathBuf,
        unit: u32,
        date: NaiveDate,
    },

    #[error("Unsupported print frequency code '{code}' (expected 0 = monthly, 1 = daily, 2 = annual)")]
    UnsupportedCadence { code: String },

    #[error("Invalid filter specification: {reason}")]
    Spec { reason: String },

    #[error("Logging setup failed: {message}")]
    Logging { message: String },
}

/// Coarse classification of [`SwatError`] variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Format,
    Data,
    UnsupportedCadence,
    Spec,
    Io,
    Frame,
    Logging,
}

impl SwatError {
    /// Which part of the taxonomy this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            SwatError::Configuration { .. } | SwatError::ConfigUnreadable { .. } => {
                ErrorKind::Config
            }
            SwatError::Format { .. } => ErrorKind::Format,
            SwatError::OutputMissing { .. }
            | SwatError::OutputUnreadable { .. }
            | SwatError::ScheduleMismatch { .. }
            | SwatError::DuplicateRecord { .. } => ErrorKind::Data,
            SwatError::UnsupportedCadence { .. } => ErrorKind::UnsupportedCadence,
            SwatError::Spec { .. } => ErrorKind::Spec,
            SwatError::Io(_) => ErrorKind::Io,
            SwatError::Polars(_) => ErrorKind::Frame,
            SwatError::Logging { .. } => ErrorKind::Logging,
        }
    }

    pub(crate) fn spec(reason: impl Into<String>) -> Self {
        SwatError::Spec {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SwatError>;
